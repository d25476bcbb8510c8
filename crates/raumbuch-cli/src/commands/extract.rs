//! Extract command - room areas from a single floor-plan PDF.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use raumbuch_core::{
    AreaExtractor, ExtractionOptions, ExtractionResult, LopdfExtractor, PlainTextExtractor,
    RaumbuchConfig,
};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Blueprint style (haardtring, leiq, omniturm); auto-detected when omitted
    #[arg(short, long)]
    style: Option<String>,

    /// Comma-separated 0-based page indices (default: all pages)
    #[arg(short, long, value_delimiter = ',')]
    pages: Option<Vec<usize>>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print a summary with totals per category
    #[arg(long)]
    summary: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per room
    Csv,
    /// Plain text table
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;

    // Reject a bad style before touching the file
    let mut options = ExtractionOptions::new();
    if let Some(hint) = &args.style {
        options = options.with_style_hint(hint)?;
    }
    if let Some(pages) = &args.pages {
        options = options.with_pages(pages.clone());
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Extracting room areas...");

    let data = fs::read(&args.input)?;
    let result = extract_bytes(&data, &options, &config)?;

    pb.finish_and_clear();

    for warning in &result.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.summary {
        print_summary(&result);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Run the pipeline on raw PDF bytes with the shipped backends.
pub(crate) fn extract_bytes(
    data: &[u8],
    options: &ExtractionOptions,
    config: &RaumbuchConfig,
) -> anyhow::Result<ExtractionResult> {
    let extractor = AreaExtractor::from_config(config)?;
    let result = extractor.extract_with_fallback(
        data,
        options,
        &mut LopdfExtractor::new(),
        &mut PlainTextExtractor::new(),
    )?;
    Ok(result)
}

pub(crate) fn format_result(
    result: &ExtractionResult,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "room_number",
        "room_name",
        "area_m2",
        "counted_m2",
        "factor",
        "category",
        "page",
        "extraction_pattern",
        "perimeter_m",
        "height_m",
        "source_text",
    ])?;

    for room in &result.rooms {
        wtr.write_record([
            room.room_number.as_str(),
            room.room_name.as_str(),
            &room.area_m2.to_string(),
            &room.counted_m2.to_string(),
            &room.factor.to_string(),
            room.category.as_str(),
            &room.page.to_string(),
            room.extraction_pattern.as_str(),
            &room.perimeter_m.map(|p| p.to_string()).unwrap_or_default(),
            &room.height_m.map(|h| h.to_string()).unwrap_or_default(),
            room.source_text.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Style: {} ({} pages, {})\n\n",
        result.blueprint_style, result.page_count, result.extraction_method
    ));

    output.push_str(&format!(
        "{:<16} {:<28} {:>10} {:>10} {:>6}  {}\n",
        "Room", "Name", "Area m²", "Counted", "Factor", "Category"
    ));
    for room in &result.rooms {
        output.push_str(&format!(
            "{:<16} {:<28} {:>10} {:>10} {:>6}  {}\n",
            room.room_number,
            room.room_name,
            room.area_m2,
            room.counted_m2,
            room.factor,
            room.category
        ));
    }

    output.push('\n');
    output.push_str(&format!("Rooms:   {}\n", result.room_count));
    output.push_str(&format!("Area:    {} m²\n", result.total_area_m2));
    output.push_str(&format!("Counted: {} m²\n", result.total_counted_m2));

    output
}

fn print_summary(result: &ExtractionResult) {
    let summary = result.summary();

    eprintln!();
    eprintln!(
        "{} {} rooms, style {}",
        style("ℹ").blue(),
        summary.total_rooms,
        summary.blueprint_style
    );
    eprintln!(
        "{} Total area {} m², counted {} m²",
        style("ℹ").blue(),
        summary.total_area_m2,
        summary.total_counted_m2
    );
    for (category, total) in &summary.categories {
        eprintln!("   {:<12} {:>10} m²", category.as_str(), total);
    }
    if summary.has_warnings {
        eprintln!(
            "{} {} warning(s)",
            style("⚠").yellow(),
            result.warnings.len()
        );
    }
}
