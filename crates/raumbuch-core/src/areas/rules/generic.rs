//! Style-agnostic extractor for plans that follow none of the known
//! conventions.
//!
//! Area labels and room identifiers are collected independently and then
//! paired by line distance.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::{debug, trace};

use super::categories::categorize_room;
use super::numbers::parse_capture;
use super::patterns::{
    generic_area_patterns, generic_room_patterns, GENERIC_LABEL_LINE, GENERIC_NUMERIC_LINE,
    GENERIC_VALUE_LINE,
};
use super::{LineMatch, RoomExtractor};
use crate::models::config::ExtractionConfig;
use crate::models::room::{ExtractedRoom, MatchedRule, UNKNOWN_ROOM_NAME};

/// Lines after an identifier searched for its name.
const NAME_SEARCH_LINES: usize = 5;

/// Proximity-based extractor.
#[derive(Debug, Clone)]
pub struct GenericExtractor {
    proximity_limit: usize,
    min_area: Decimal,
    max_area: Decimal,
}

impl GenericExtractor {
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            proximity_limit: config.proximity_limit,
            min_area: config.min_plausible_area,
            max_area: config.max_plausible_area,
        }
    }

    /// Set the maximum line distance between an identifier and its area.
    pub fn with_proximity_limit(mut self, lines: usize) -> Self {
        self.proximity_limit = lines;
        self
    }

    /// Set the accepted area range.
    pub fn with_plausible_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.min_area = min;
        self.max_area = max;
        self
    }

    /// First pass: area labels anywhere in a line, first pattern wins.
    fn find_areas(&self, lines: &[&str]) -> Vec<LineMatch<Decimal>> {
        let mut areas = Vec::new();

        for (i, raw) in lines.iter().enumerate() {
            let line = raw.trim();
            let Some(caps) = generic_area_patterns()
                .iter()
                .find_map(|p| p.captures(line))
            else {
                continue;
            };
            let Some(area) = caps.get(1).and_then(|m| parse_capture("area", m.as_str())) else {
                continue;
            };
            if area < self.min_area || area > self.max_area {
                debug!("Discarding implausible area {} on line {}", area, i);
                continue;
            }
            areas.push(LineMatch::new(area, i, line));
        }

        areas
    }

    /// Second pass: identifiers at line start, first line per identifier.
    fn find_identifiers(lines: &[&str]) -> Vec<LineMatch<String>> {
        let mut seen = HashSet::new();
        let mut identifiers = Vec::new();

        for (i, raw) in lines.iter().enumerate() {
            let line = raw.trim();
            let Some(id) = generic_room_patterns()
                .iter()
                .find_map(|p| p.captures(line).and_then(|c| c.get(1)))
                .map(|m| m.as_str())
            else {
                continue;
            };
            if seen.insert(id.to_string()) {
                identifiers.push(LineMatch::new(id.to_string(), i, line));
            }
        }

        identifiers
    }

    /// Distance score in half lines. Areas after the identifier get a
    /// half-line bonus.
    fn score(id_line: usize, area_line: usize) -> usize {
        let distance = 2 * id_line.abs_diff(area_line);
        if area_line > id_line {
            distance - 1
        } else {
            distance
        }
    }

    fn name_between(lines: &[&str], id_line: usize, area_line: usize) -> Option<String> {
        let end = area_line.min(id_line + 1 + NAME_SEARCH_LINES).min(lines.len());
        (id_line + 1..end)
            .map(|j| lines[j].trim())
            .find(|candidate| {
                candidate.chars().count() > 1
                    && !GENERIC_NUMERIC_LINE.is_match(candidate)
                    && !GENERIC_LABEL_LINE.is_match(candidate)
                    && !GENERIC_VALUE_LINE.is_match(candidate)
            })
            .map(str::to_string)
    }
}

impl Default for GenericExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomExtractor for GenericExtractor {
    fn name(&self) -> &'static str {
        "generic"
    }

    /// Third pass: greedy assignment in identifier discovery order. An area
    /// taken by an earlier identifier is unavailable to later ones, even
    /// closer ones.
    fn extract(&self, lines: &[&str], page: usize) -> Vec<ExtractedRoom> {
        let areas = self.find_areas(lines);
        let identifiers = Self::find_identifiers(lines);
        let limit = self.proximity_limit.saturating_mul(2);

        let mut used = vec![false; areas.len()];
        let mut rooms = Vec::new();

        for id in &identifiers {
            let mut best: Option<(usize, usize)> = None;
            for (k, area) in areas.iter().enumerate() {
                if used[k] {
                    continue;
                }
                let score = Self::score(id.line, area.line);
                if score < limit && best.is_none_or(|(_, s)| score < s) {
                    best = Some((k, score));
                }
            }

            let Some((k, _)) = best else {
                trace!("No area near generic identifier {}", id.value);
                continue;
            };
            used[k] = true;
            let area = &areas[k];

            let name = Self::name_between(lines, id.line, area.line);
            let category = categorize_room(name.as_deref().unwrap_or(""));

            rooms.push(ExtractedRoom {
                room_number: id.value.clone(),
                room_name: name.unwrap_or_else(|| UNKNOWN_ROOM_NAME.to_string()),
                area_m2: area.value,
                counted_m2: area.value,
                factor: Decimal::ONE,
                page,
                source_text: area.source.clone(),
                bbox: None,
                category,
                extraction_pattern: MatchedRule::GenericProximity,
                perimeter_m: None,
                height_m: None,
                factor_source: None,
            });
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
    fn test_basic_pairing() {
        let lines = ["OG1_101", "Büro", "Fläche: 18,50 m²"];
        let rooms = GenericExtractor::new().extract(&lines, 0);

        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].room_number, "OG1_101");
        assert_eq!(rooms[0].room_name, "Büro");
        assert_eq!(rooms[0].area_m2, dec("18.50"));
        assert_eq!(rooms[0].factor, Decimal::ONE);
        assert_eq!(rooms[0].source_text, "Fläche: 18,50 m²");
        assert_eq!(rooms[0].category, RoomCategory::Office);
        assert_eq!(rooms[0].extraction_pattern, MatchedRule::GenericProximity);
    }

    #[test]
    fn test_qm_unit() {
        let lines = ["A.101", "Lager", "NGF = 7,5 qm"];
        let rooms = GenericExtractor::new().extract(&lines, 0);
        assert_eq!(rooms[0].area_m2, dec("7.5"));
    }

    #[test]
    fn test_earlier_identifier_keeps_area_even_when_later_is_closer() {
        let lines = ["EG.001", "Flur", "Text", "Text", "EG.002", "NRF: 12,00 m2"];
        let rooms = GenericExtractor::new().extract(&lines, 0);

        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].room_number, "EG.001");
        assert_eq!(rooms[0].room_name, "Flur");
    }

    #[test]
    fn test_area_after_identifier_preferred_on_equal_distance() {
        let lines = ["NRF: 5,00 m2", "x", "EG.010", "x", "NRF: 9,00 m2"];
        let rooms = GenericExtractor::new().extract(&lines, 0);

        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].area_m2, dec("9.00"));
    }

    #[test]
    fn test_each_area_used_once() {
        let lines = ["EG.001", "EG.002", "NRF: 4,00 m2", "NRF: 6,00 m2"];
        let rooms = GenericExtractor::new().extract(&lines, 0);

        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].area_m2, dec("4.00"));
        assert_eq!(rooms[1].area_m2, dec("6.00"));
    }

    #[test]
    fn test_proximity_limit() {
        let mut lines = vec!["EG.001"];
        lines.extend(std::iter::repeat("-").take(15));
        lines.push("NRF: 4,00 m2");

        assert!(GenericExtractor::new().extract(&lines, 0).is_empty());
        assert_eq!(
            GenericExtractor::new()
                .with_proximity_limit(20)
                .extract(&lines, 0)
                .len(),
            1
        );
    }

    #[test]
    fn test_unbounded_proximity_limit() {
        let lines = ["EG.001", "Flur", "NRF: 8,00 m2"];
        let rooms = GenericExtractor::new()
            .with_proximity_limit(usize::MAX)
            .extract(&lines, 0);
        assert_eq!(rooms.len(), 1);
    }

    #[test]
    fn test_implausible_areas_discarded() {
        let lines = ["EG.001", "NRF: 0,20 m2", "EG.002", "NRF: 25.000,00 m2"];
        assert!(GenericExtractor::new().extract(&lines, 0).is_empty());

        let widened = GenericExtractor::new().with_plausible_range(dec("0.1"), dec("50000"));
        let rooms = widened.extract(&lines, 0);
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[1].area_m2, dec("25000.00"));
    }

    #[test]
    fn test_name_skips_values_and_labels() {
        let lines = ["EG.001", "12,5", "U: 14 m", "Abstellraum", "NRF: 4,00 m2"];
        let rooms = GenericExtractor::new().extract(&lines, 0);
        assert_eq!(rooms[0].room_name, "Abstellraum");
        assert_eq!(rooms[0].category, RoomCategory::Storage);
    }

    #[test]
    fn test_area_before_identifier_has_no_name() {
        let lines = ["NRF: 4,00 m2", "EG.001", "Küche"];
        let rooms = GenericExtractor::new().extract(&lines, 0);
        assert_eq!(rooms[0].room_name, "Unknown");
    }
}
