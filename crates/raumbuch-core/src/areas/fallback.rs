//! Reduced-fidelity extraction over a plain-text backend.
//!
//! Only `NRF:` labels are recognized. Room names cannot be recovered and
//! rooms get sequential identifiers (`room_001`, `room_002`, ...).

use tracing::{debug, info};

use super::parser::ExtractionOptions;
use super::rules::numbers::parse_capture;
use super::rules::patterns::FALLBACK_NRF;
use crate::error::Result;
use crate::models::room::{
    BlueprintStyle, ExtractedRoom, ExtractionResult, MatchedRule, RoomCategory,
    METHOD_PLAIN_TEXT_FALLBACK, UNKNOWN_ROOM_NAME,
};
use crate::pdf::PdfProcessor;
use rust_decimal::Decimal;

/// First warning of every degraded result.
pub const FALLBACK_WARNING: &str = "Used plain-text fallback";

/// Run the degraded path. The style hint in `options` is ignored.
pub fn extract(
    data: &[u8],
    options: &ExtractionOptions,
    processor: &mut dyn PdfProcessor,
) -> Result<ExtractionResult> {
    processor.load(data)?;
    let page_count = processor.page_count();
    info!(
        "Plain-text fallback via {} ({} pages)",
        processor.backend_name(),
        page_count
    );

    let mut warnings = vec![FALLBACK_WARNING.to_string()];
    let mut rooms = Vec::new();
    let mut counter = 0usize;

    for page in options.page_indices(page_count) {
        if page >= page_count {
            warnings.push(format!("Page {} does not exist", page));
            continue;
        }

        let text = processor.extract_page_text(page)?;
        for caps in FALLBACK_NRF.captures_iter(&text) {
            counter += 1;
            let (Some(whole), Some(value)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let token = value.as_str().trim_end_matches([',', '.']);
            let Some(area) = parse_capture("area", token) else {
                continue;
            };
            if area.is_zero() {
                debug!("Skipping zero area at {:?}", whole.as_str());
                continue;
            }

            rooms.push(ExtractedRoom {
                room_number: format!("room_{:03}", counter),
                room_name: UNKNOWN_ROOM_NAME.to_string(),
                area_m2: area,
                counted_m2: area,
                factor: Decimal::ONE,
                page,
                source_text: whole.as_str().to_string(),
                bbox: None,
                category: RoomCategory::Other,
                extraction_pattern: MatchedRule::FallbackAreaLabel,
                perimeter_m: None,
                height_m: None,
                factor_source: None,
            });
        }
    }

    Ok(ExtractionResult::from_rooms(
        rooms,
        page_count,
        BlueprintStyle::Unknown,
        METHOD_PLAIN_TEXT_FALLBACK,
        warnings,
    ))
}
