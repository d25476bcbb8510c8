//! Configuration structures for the extraction pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{RaumbuchError, Result};
use crate::models::room::BlueprintStyle;

/// Upper bound for line-window settings.
pub const MAX_WINDOW_LINES: usize = 1000;

/// Main configuration for the raumbuch pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaumbuchConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Area extraction configuration.
    pub extraction: ExtractionConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Fall back to whole-document plain-text extraction when the
    /// per-page backend is unavailable.
    pub plain_text_fallback: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            plain_text_fallback: true,
        }
    }
}

/// Area extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Lines scanned after a room anchor while looking for its area.
    pub lookahead_lines: usize,

    /// Counting factor for outdoor rooms without a printed reduced figure.
    pub outdoor_factor: Decimal,

    /// Generic extractor: maximum line distance between identifier and area.
    pub proximity_limit: usize,

    /// Generic extractor: smallest area accepted.
    pub min_plausible_area: Decimal,

    /// Generic extractor: largest area accepted.
    pub max_plausible_area: Decimal,

    /// Style to use instead of auto-detection (haardtring, leiq, omniturm).
    pub default_style: Option<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            lookahead_lines: 14,
            outdoor_factor: Decimal::new(5, 1),
            proximity_limit: 15,
            min_plausible_area: Decimal::new(5, 1),
            max_plausible_area: Decimal::new(10_000, 0),
            default_style: None,
        }
    }
}

impl ExtractionConfig {
    /// Parsed `default_style`, if set.
    pub fn style(&self) -> Result<Option<BlueprintStyle>> {
        self.default_style
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse::<BlueprintStyle>().map_err(RaumbuchError::from))
            .transpose()
    }
}

impl RaumbuchConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let ex = &self.extraction;
        if ex.lookahead_lines == 0 || ex.lookahead_lines > MAX_WINDOW_LINES {
            return Err(RaumbuchError::Config(format!(
                "extraction.lookahead_lines must be in 1..={}, got {}",
                MAX_WINDOW_LINES, ex.lookahead_lines
            )));
        }
        if ex.proximity_limit == 0 || ex.proximity_limit > MAX_WINDOW_LINES {
            return Err(RaumbuchError::Config(format!(
                "extraction.proximity_limit must be in 1..={}, got {}",
                MAX_WINDOW_LINES, ex.proximity_limit
            )));
        }
        if ex.outdoor_factor <= Decimal::ZERO || ex.outdoor_factor > Decimal::ONE {
            return Err(RaumbuchError::Config(format!(
                "extraction.outdoor_factor must be in (0, 1], got {}",
                ex.outdoor_factor
            )));
        }
        if ex.min_plausible_area > ex.max_plausible_area {
            return Err(RaumbuchError::Config(format!(
                "extraction.min_plausible_area ({}) exceeds max_plausible_area ({})",
                ex.min_plausible_area, ex.max_plausible_area
            )));
        }
        ex.style()?;
        Ok(())
    }
}
