//! LeiQ (office) extractor.
//!
//! Modern plans label areas `NRF: 3,45 m2`, older ones `F= 50.37 m²`.
//! Perimeter (`U:`) and clear height (`LH:` / `LRH=`) follow the area.

use rust_decimal::Decimal;
use tracing::trace;

use super::numbers::parse_capture;
use super::patterns::{
    LEIQ_AREA_LEGACY, LEIQ_AREA_MODERN, LEIQ_AREA_VALUE, LEIQ_HEIGHT, LEIQ_NOT_A_NAME,
    LEIQ_PERIMETER, LEIQ_ROOM,
};
use super::{capture_on_line, name_after_anchor, window_end, LineMatch, RoomDraft, RoomExtractor};
use crate::models::config::ExtractionConfig;
use crate::models::room::{ExtractedRoom, MatchedRule};

/// Split label forms: the label stands alone and the value follows.
const SPLIT_LABELS: [(&str, MatchedRule); 4] = [
    ("NRF:", MatchedRule::ModernAreaLabel),
    ("NRF=", MatchedRule::ModernAreaLabel),
    ("F:", MatchedRule::LegacyAreaLabel),
    ("F=", MatchedRule::LegacyAreaLabel),
];

/// Extractor for `NRF:` / `F=` labeled office plans.
#[derive(Debug, Clone)]
pub struct LeiqExtractor {
    lookahead: usize,
    outdoor_factor: Decimal,
}

impl LeiqExtractor {
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

    fn is_anchor(line: &str) -> bool {
        LEIQ_ROOM.is_match(line)
    }

    /// Scan the whole window; the area is taken once, perimeter and height
    /// are collected until the window ends or the next room starts.
    fn scan(&self, lines: &[&str], anchor: usize, mut draft: RoomDraft) -> Option<RoomDraft> {
        for j in anchor + 1..window_end(lines, anchor, self.lookahead) {
            let curr = lines[j].trim();
            if Self::is_anchor(curr) {
                break;
            }

            if !draft.has_area() {
                if let Some((text, value)) = capture_on_line(lines, j, &LEIQ_AREA_MODERN) {
                    let area = parse_capture("area", value)?;
                    draft.set_area(LineMatch::new(area, j, text), MatchedRule::ModernAreaLabel);
                    continue;
                }
                if let Some((text, value)) = capture_on_line(lines, j, &LEIQ_AREA_LEGACY) {
                    let area = parse_capture("area", value)?;
                    draft.set_area(LineMatch::new(area, j, text), MatchedRule::LegacyAreaLabel);
                    continue;
                }
                if let Some((_, rule)) = SPLIT_LABELS.iter().find(|(label, _)| *label == curr) {
                    if let Some((text, value)) = capture_on_line(lines, j + 1, &LEIQ_AREA_VALUE) {
                        let area = parse_capture("area", value)?;
                        draft.set_area(LineMatch::new(area, j + 1, text), *rule);
                        continue;
                    }
                }
            }

            if let Some((_, value)) = capture_on_line(lines, j, &LEIQ_PERIMETER) {
                draft.perimeter_m = Some(parse_capture("perimeter", value)?);
                continue;
            }
            if let Some((_, value)) = capture_on_line(lines, j, &LEIQ_HEIGHT) {
                draft.height_m = Some(parse_capture("height", value)?);
            }
        }
        Some(draft)
    }
}

impl Default for LeiqExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomExtractor for LeiqExtractor {
    fn name(&self) -> &'static str {
        "leiq"
    }

    fn extract(&self, lines: &[&str], page: usize) -> Vec<ExtractedRoom> {
        let mut rooms = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            let Some(number) = LEIQ_ROOM
                .captures(line.trim())
                .and_then(|c| c.get(1))
                .map(|m| m.as_str())
            else {
                continue;
            };
            let name = name_after_anchor(lines, i, &LEIQ_NOT_A_NAME, Self::is_anchor);
            let draft = RoomDraft::new(number, name);

            if let Some(room) = self
                .scan(lines, i, draft)
                .and_then(|d| d.finish(page, self.outdoor_factor))
            {
                trace!("leiq room {} = {} m²", room.room_number, room.area_m2);
                rooms.push(room);
            }
        }

        rooms
    }
}
