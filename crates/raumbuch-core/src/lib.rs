//! Core library for room-area extraction from German floor-plan PDFs.
//!
//! This crate provides:
//! - PDF text backends (per-page lopdf, whole-document pdf-extract)
//! - Blueprint style detection for the haardtring, leiq and omniturm
//!   labeling conventions
//! - Per-style room extractors plus a proximity-based generic extractor
//! - Room-area data models where every area is traceable to page text

pub mod areas;
pub mod error;
pub mod models;
pub mod pdf;

pub use areas::{detect_blueprint_style, AreaExtractor, ExtractionOptions, StyleSignals};
pub use error::{ExtractionError, PdfError, RaumbuchError, Result};
pub use models::config::RaumbuchConfig;
pub use models::room::{
    BlueprintStyle, ExtractedRoom, ExtractionResult, ExtractionSummary, RoomCategory,
};
pub use pdf::{LopdfExtractor, PdfProcessor, PlainTextExtractor};

/// Extract room areas with the default backends and settings.
///
/// Falls back to plain-text extraction when the lopdf backend is not
/// compiled in.
pub fn extract_room_areas(data: &[u8], options: &ExtractionOptions) -> Result<ExtractionResult> {
    AreaExtractor::new().extract_with_fallback(
        data,
        options,
        &mut LopdfExtractor::new(),
        &mut PlainTextExtractor::new(),
    )
}

/// Extract room areas and serialize the result as pretty-printed JSON.
pub fn extract_to_json(data: &[u8], options: &ExtractionOptions) -> Result<String> {
    let result = extract_room_areas(data, options)?;
    Ok(serde_json::to_string_pretty(&result)?)
}
