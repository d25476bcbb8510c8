//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod detect;
pub mod extract;

use std::path::Path;

use raumbuch_core::RaumbuchConfig;
use tracing::debug;

/// Load the configuration from `--config`, else from the default location,
/// else fall back to built-in defaults.
pub(crate) fn load_config(config_path: Option<&str>) -> anyhow::Result<RaumbuchConfig> {
    if let Some(path) = config_path {
        return Ok(RaumbuchConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(RaumbuchConfig::from_file(&default_path)?)
    } else {
        Ok(RaumbuchConfig::default())
    }
}
