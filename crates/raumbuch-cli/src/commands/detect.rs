//! Detect command - report the blueprint style of a PDF.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{info, warn};

use raumbuch_core::{LopdfExtractor, PdfProcessor, PlainTextExtractor, StyleSignals};

/// Arguments for the detect command.
#[derive(Args)]
pub struct DetectArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Also print the individual probe results as JSON
    #[arg(long)]
    signals: bool,
}

pub async fn run(args: DetectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let data = fs::read(&args.input)?;

    let mut primary = LopdfExtractor::new();
    let pages = match read_pages(&data, &mut primary) {
        Err(e) if e.is_backend_unavailable() && config.pdf.plain_text_fallback => {
            warn!("{}, detecting on plain text", e);
            read_pages(&data, &mut PlainTextExtractor::new())?
        }
        other => other?,
    };

    // Same text the extraction pipeline classifies
    let signals = StyleSignals::probe(&pages.join("\n"));
    let detected = signals.style();
    info!("Detected {} over {} pages", detected, pages.len());

    println!(
        "{} {} ({} pages)",
        style("✓").green(),
        style(detected).bold(),
        pages.len()
    );

    if args.signals {
        println!("{}", serde_json::to_string_pretty(&signals)?);
    }

    Ok(())
}

fn read_pages(
    data: &[u8],
    processor: &mut dyn PdfProcessor,
) -> raumbuch_core::Result<Vec<String>> {
    processor.load(data)?;
    Ok(processor.page_texts()?)
}
