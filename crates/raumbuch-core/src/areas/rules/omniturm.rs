//! Omniturm (high-rise) extractor.
//!
//! Rooms are numbered on a grid (`03_b6.12`) or by building part
//! (`BT1.TR.01`) and labeled `NGF: 20,00 m2`. Technical shafts are printed as
//! a block:
//!
//! ```text
//! Schacht 01
//! Lüftung
//! 1,25 m2
//! ```

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::trace;

use super::numbers::parse_capture;
use super::patterns::{
    OMNITURM_AREA, OMNITURM_AREA_VALUE, OMNITURM_NOT_A_NAME, OMNITURM_ROOM, OMNITURM_SHAFT,
    OMNITURM_SHAFT_AREA,
};
use super::{capture_on_line, name_after_anchor, window_end, LineMatch, RoomDraft, RoomExtractor};
use crate::models::config::ExtractionConfig;
use crate::models::room::{ExtractedRoom, MatchedRule};

/// Extractor for `NGF:` labeled high-rise plans.
#[derive(Debug, Clone)]
pub struct OmniturmExtractor {
    lookahead: usize,
    outdoor_factor: Decimal,
}

impl OmniturmExtractor {
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
        OMNITURM_ROOM.is_match(line)
    }

    fn scan(&self, lines: &[&str], anchor: usize, mut draft: RoomDraft) -> Option<RoomDraft> {
        for j in anchor + 1..window_end(lines, anchor, self.lookahead) {
            let curr = lines[j].trim();
            if Self::is_anchor(curr) {
                break;
            }

            if let Some((text, value)) = capture_on_line(lines, j, &OMNITURM_AREA) {
                let area = parse_capture("area", value)?;
                draft.set_area(LineMatch::new(area, j, text), MatchedRule::NetFloorAreaLabel);
                break;
            }

            if curr == "NGF:" {
                if let Some((text, value)) = capture_on_line(lines, j + 1, &OMNITURM_AREA_VALUE) {
                    let area = parse_capture("area", value)?;
                    draft.set_area(
                        LineMatch::new(area, j + 1, text),
                        MatchedRule::NetFloorAreaLabel,
                    );
                    break;
                }
            }

            if let Some(shaft) = OMNITURM_SHAFT.captures(curr).and_then(|c| c.get(1)) {
                let shaft = shaft.as_str();
                draft.room_name = Some(shaft.to_string());

                if j + 2 < lines.len() {
                    let kind = lines[j + 1].trim();
                    if !kind.is_empty()
                        && !kind.starts_with(|c: char| c.is_ascii_digit() || c == ',')
                    {
                        draft.room_name = Some(format!("{} ({})", shaft, kind));
                    }
                    if let Some((text, value)) = capture_on_line(lines, j + 2, &OMNITURM_SHAFT_AREA)
                    {
                        let area = parse_capture("shaft area", value)?;
                        draft.set_area(LineMatch::new(area, j + 2, text), MatchedRule::ShaftArea);
                        break;
                    }
                }
            }
        }
        Some(draft)
    }
}

impl Default for OmniturmExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomExtractor for OmniturmExtractor {
    fn name(&self) -> &'static str {
        "omniturm"
    }

    fn extract(&self, lines: &[&str], page: usize) -> Vec<ExtractedRoom> {
        let mut rooms = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();

        for (i, line) in lines.iter().enumerate() {
            let Some(number) = OMNITURM_ROOM
                .captures(line.trim())
                .and_then(|c| c.get(1))
                .map(|m| m.as_str())
            else {
                continue;
            };
            if visited.contains(number) {
                trace!("omniturm room {} already emitted", number);
                continue;
            }

            let name = name_after_anchor(lines, i, &OMNITURM_NOT_A_NAME, Self::is_anchor);
            let draft = RoomDraft::new(number, name);

            if let Some(room) = self
                .scan(lines, i, draft)
                .and_then(|d| d.finish(page, self.outdoor_factor))
            {
                trace!("omniturm room {} = {} m²", room.room_number, room.area_m2);
                visited.insert(room.room_number.clone());
                rooms.push(room);
            }
        }

        rooms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::room::RoomCategory;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_grid_room() {
        let lines = ["03_b6.12", "Büro", "NGF: 20,00 m2", "LRH: 3,00"];
        let rooms = OmniturmExtractor::new().extract(&lines, 0);

        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].room_number, "03_b6.12");
        assert_eq!(rooms[0].room_name, "Büro");
        assert_eq!(rooms[0].area_m2, dec("20.00"));
        assert_eq!(rooms[0].source_text, "NGF: 20,00 m2");
        assert_eq!(rooms[0].extraction_pattern, MatchedRule::NetFloorAreaLabel);
    }

    #[test]
    fn test_thousands_separator() {
        let lines = ["BT1.TR.01", "Lobby", "NGF: 1.070,55 m2"];
        let rooms = OmniturmExtractor::new().extract(&lines, 0);

        assert_eq!(rooms[0].area_m2, dec("1070.55"));
        assert_eq!(rooms[0].category, RoomCategory::Circulation);
    }

    #[test]
    fn test_split_label() {
        let lines = ["12_c4.26", "Lager", "NGF:", "6,30 m2"];
        let rooms = OmniturmExtractor::new().extract(&lines, 0);
        assert_eq!(rooms[0].area_m2, dec("6.30"));
        assert_eq!(rooms[0].source_text, "6,30 m2");
    }

    #[test]
    fn test_shaft_block() {
        let lines = ["03_b6.40", "Schacht 01", "Lüftung", "1,25 m2"];
        let rooms = OmniturmExtractor::new().extract(&lines, 0);

        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].room_name, "Schacht 01 (Lüftung)");
        assert_eq!(rooms[0].area_m2, dec("1.25"));
        assert_eq!(rooms[0].category, RoomCategory::Shafts);
        assert_eq!(rooms[0].extraction_pattern, MatchedRule::ShaftArea);
        assert_eq!(rooms[0].source_text, "1,25 m2");
    }

    #[test]
    fn test_shaft_without_type_line() {
        let lines = ["03_b6.41", "Schacht 02", "0,80 m2", "0,80 m2"];
        let rooms = OmniturmExtractor::new().extract(&lines, 0);
        assert_eq!(rooms[0].room_name, "Schacht 02");
    }

    #[test]
    fn test_repeated_anchor_emitted_once() {
        let lines = [
            "03_b6.12",
            "Büro",
            "NGF: 20,00 m2",
            "03_b6.12",
            "Büro",
            "NGF: 20,00 m2",
        ];
        let rooms = OmniturmExtractor::new().extract(&lines, 0);
        assert_eq!(rooms.len(), 1);
    }

    #[test]
    fn test_visited_set_is_per_call() {
        let lines = ["03_b6.12", "Büro", "NGF: 20,00 m2"];
        let extractor = OmniturmExtractor::new();
        assert_eq!(extractor.extract(&lines, 0).len(), 1);
        assert_eq!(extractor.extract(&lines, 1).len(), 1);
    }
}
