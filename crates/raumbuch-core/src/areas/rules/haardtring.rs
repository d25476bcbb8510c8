//! Haardtring (residential) extractor.
//!
//! Rooms look like:
//!
//! ```text
//! R2.E5.3.5
//! Schlafen
//! F: 12,34 m²
//! ```
//!
//! Balconies may carry a reduced figure on the line after the area
//! (`50%: 5,00 m²`).

use rust_decimal::Decimal;
use tracing::trace;

use super::numbers::parse_capture;
use super::patterns::{
    haardtring_room_patterns, HAARDTRING_AREA, HAARDTRING_AREA_VALUE, HAARDTRING_NOT_A_NAME,
    HAARDTRING_OVERRIDE,
};
use super::{capture_on_line, name_after_anchor, window_end, LineMatch, RoomDraft, RoomExtractor};
use crate::models::config::ExtractionConfig;
use crate::models::room::{ExtractedRoom, MatchedRule};

/// Extractor for `F:` labeled residential plans.
#[derive(Debug, Clone)]
pub struct HaardtringExtractor {
    lookahead: usize,
    outdoor_factor: Decimal,
}

impl HaardtringExtractor {
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            lookahead: config.lookahead_lines,
            outdoor_factor: config.outdoor_factor,
        }
    }

    /// Set the number of lines scanned after an anchor.
    pub fn with_lookahead(mut self, lines: usize) -> Self {
        self.lookahead = lines;
        self
    }

    /// Set the counting factor for outdoor rooms.
    pub fn with_outdoor_factor(mut self, factor: Decimal) -> Self {
        self.outdoor_factor = factor;
        self
    }

    fn room_number(line: &str) -> Option<&str> {
        haardtring_room_patterns()
            .iter()
            .find_map(|p| p.captures(line).and_then(|c| c.get(1)))
            .map(|m| m.as_str())
    }

    fn is_anchor(line: &str) -> bool {
        haardtring_room_patterns().iter().any(|p| p.is_match(line))
    }

    /// Scan the window after an anchor. `None` means a captured token
    /// failed to parse and the candidate is dropped.
    fn scan(&self, lines: &[&str], anchor: usize, mut draft: RoomDraft) -> Option<RoomDraft> {
        for j in anchor + 1..window_end(lines, anchor, self.lookahead) {
            let curr = lines[j].trim();
            if Self::is_anchor(curr) {
                break;
            }

            if let Some((text, value)) = capture_on_line(lines, j, &HAARDTRING_AREA) {
                let area = parse_capture("area", value)?;
                draft.set_area(LineMatch::new(area, j, text), MatchedRule::ColonAreaLabel);
                draft.override_counted = override_at(lines, j + 1)?;
                break;
            }

            if curr == "F:" {
                if let Some((text, value)) = capture_on_line(lines, j + 1, &HAARDTRING_AREA_VALUE) {
                    let area = parse_capture("area", value)?;
                    draft.set_area(LineMatch::new(area, j + 1, text), MatchedRule::ColonAreaLabel);
                    draft.override_counted = override_at(lines, j + 2)?;
                    break;
                }
            }
        }
        Some(draft)
    }
}

impl Default for HaardtringExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Reduced `50%:` figure on the given line, if present.
fn override_at(lines: &[&str], index: usize) -> Option<Option<Decimal>> {
    match capture_on_line(lines, index, &HAARDTRING_OVERRIDE) {
        Some((_, value)) => parse_capture("override", value).map(Some),
        None => Some(None),
    }
}

impl RoomExtractor for HaardtringExtractor {
    fn name(&self) -> &'static str {
        "haardtring"
    }

    fn extract(&self, lines: &[&str], page: usize) -> Vec<ExtractedRoom> {
        let mut rooms = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            let Some(number) = Self::room_number(line.trim()) else {
                continue;
            };
            let name = name_after_anchor(lines, i, &HAARDTRING_NOT_A_NAME, Self::is_anchor);
            let draft = RoomDraft::new(number, name);

            if let Some(room) = self
                .scan(lines, i, draft)
                .and_then(|d| d.finish(page, self.outdoor_factor))
            {
                trace!("haardtring room {} = {} m²", room.room_number, room.area_m2);
                rooms.push(room);
            }
        }

        rooms
    }
}
