//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use raumbuch_core::RaumbuchConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "extraction.lookahead_lines")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value (JSON, or a bare string)
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

/// Runs against `--config` when given, else the default location.
pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init(init_args) => init_config(init_args, path),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

/// `<config_dir>/raumbuch/config.json`, or `./raumbuch/config.json` when the
/// platform has no config directory.
pub(crate) fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("raumbuch")
        .join("config.json")
}

fn load_or_default(path: &Path) -> anyhow::Result<RaumbuchConfig> {
    if path.exists() {
        Ok(RaumbuchConfig::from_file(path)?)
    } else {
        Ok(RaumbuchConfig::default())
    }
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }
    let config = load_or_default(path)?;

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, path: PathBuf) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or(path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    RaumbuchConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(load_or_default(path)?)?;
    println!("{}", serde_json::to_string_pretty(lookup(&json, key)?)?);
    Ok(())
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let config = load_or_default(path)?;

    // Bare words such as `leiq` are taken as strings
    let parsed_value: Value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));

    let config = with_value(&config, key, parsed_value.clone())?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed_value)?
    );

    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'raumbuch config init' to create a configuration file.");
    }

    Ok(())
}

/// Resolve a dotted key in the JSON form of the configuration.
fn lookup<'a>(json: &'a Value, key: &str) -> anyhow::Result<&'a Value> {
    key.split('.').try_fold(json, |current, part| {
        current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
    })
}

/// Copy of `config` with `key` replaced. Only existing keys can be set and
/// the result must pass validation.
fn with_value(config: &RaumbuchConfig, key: &str, value: Value) -> anyhow::Result<RaumbuchConfig> {
    let mut json = serde_json::to_value(config)?;

    let (parent, leaf) = match key.rsplit_once('.') {
        Some((parent, leaf)) => (parent, leaf),
        None => ("", key),
    };

    let mut current = &mut json;
    for part in parent.split('.').filter(|p| !p.is_empty()) {
        current = current
            .get_mut(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
    }

    let slot = current
        .as_object_mut()
        .and_then(|obj| obj.get_mut(leaf))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    if slot.is_object() {
        anyhow::bail!("Cannot replace section {}; set its fields instead", key);
    }
    *slot = value;

    let updated: RaumbuchConfig = serde_json::from_value(json)?;
    updated.validate()?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested_key() {
        let json = serde_json::to_value(RaumbuchConfig::default()).unwrap();
        assert_eq!(lookup(&json, "extraction.lookahead_lines").unwrap(), &json!(14));
        assert!(lookup(&json, "extraction.nope").is_err());
    }

    #[test]
    fn test_set_updates_field() {
        let config = with_value(
            &RaumbuchConfig::default(),
            "extraction.default_style",
            json!("leiq"),
        )
        .unwrap();
        assert_eq!(config.extraction.default_style.as_deref(), Some("leiq"));

        let config = with_value(&config, "pdf.plain_text_fallback", json!(false)).unwrap();
        assert!(!config.pdf.plain_text_fallback);
    }

    #[test]
    fn test_set_rejects_unknown_key() {
        assert!(with_value(&RaumbuchConfig::default(), "extraction.dpi", json!(300)).is_err());
        assert!(with_value(&RaumbuchConfig::default(), "report.title", json!(1)).is_err());
    }

    #[test]
    fn test_set_rejects_invalid_value() {
        let err = with_value(
            &RaumbuchConfig::default(),
            "extraction.lookahead_lines",
            json!(0),
        );
        assert!(err.is_err());

        let err = with_value(
            &RaumbuchConfig::default(),
            "extraction.default_style",
            json!("autocad"),
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_set_rejects_whole_section() {
        assert!(with_value(&RaumbuchConfig::default(), "pdf", json!({})).is_err());
    }
}
