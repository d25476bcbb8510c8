//! Rule-based room extractors for German floor-plan text.

pub mod categories;
pub mod generic;
pub mod haardtring;
pub mod leiq;
pub mod numbers;
pub mod omniturm;
pub mod patterns;
pub mod style;

pub use categories::{categorize_room, is_outdoor_room};
pub use generic::GenericExtractor;
pub use haardtring::HaardtringExtractor;
pub use leiq::LeiqExtractor;
pub use numbers::parse_german_number;
pub use omniturm::OmniturmExtractor;
pub use style::{detect_blueprint_style, StyleSignals};

use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::room::{ExtractedRoom, FactorSource, MatchedRule, UNKNOWN_ROOM_NAME};

/// Trait for per-page room extractors.
pub trait RoomExtractor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Extract rooms from the lines of one page.
    fn extract(&self, lines: &[&str], page: usize) -> Vec<ExtractedRoom>;
}

/// A value captured from one page line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineMatch<T> {
    /// Parsed value.
    pub value: T,
    /// Index of the line the value was read from.
    pub line: usize,
    /// Literal text that was matched.
    pub source: String,
}

impl<T> LineMatch<T> {
    pub fn new(value: T, line: usize, source: impl Into<String>) -> Self {
        Self {
            value,
            line,
            source: source.into(),
        }
    }
}

/// Room candidate collected while scanning, finished into an [`ExtractedRoom`].
#[derive(Debug, Clone)]
pub(crate) struct RoomDraft {
    pub room_number: String,
    pub room_name: Option<String>,
    pub area: Option<LineMatch<Decimal>>,
    pub rule: Option<MatchedRule>,
    pub override_counted: Option<Decimal>,
    pub perimeter_m: Option<Decimal>,
    pub height_m: Option<Decimal>,
}

impl RoomDraft {
    pub fn new(room_number: impl Into<String>, room_name: Option<String>) -> Self {
        Self {
            room_number: room_number.into(),
            room_name,
            area: None,
            rule: None,
            override_counted: None,
            perimeter_m: None,
            height_m: None,
        }
    }

    pub fn has_area(&self) -> bool {
        self.area.is_some()
    }

    pub fn set_area(&mut self, area: LineMatch<Decimal>, rule: MatchedRule) {
        self.area = Some(area);
        self.rule = Some(rule);
    }

    /// Apply the counting-factor policy and build the room.
    ///
    /// Returns `None` when no (non-zero) area was found.
    pub fn finish(self, page: usize, outdoor_factor: Decimal) -> Option<ExtractedRoom> {
        let area = self.area?;
        let rule = self.rule?;
        if area.value.is_zero() {
            return None;
        }

        let name = self.room_name.as_deref().unwrap_or("");
        let category = categorize_room(name);

        let (counted, factor, factor_source) = match self.override_counted {
            Some(counted) => {
                let Some(ratio) = counted.checked_div(area.value) else {
                    debug!(
                        "Dropping room {}: override {} is out of range for area {}",
                        self.room_number, counted, area.value
                    );
                    return None;
                };
                (counted, ratio.round_dp(2), Some(FactorSource::ExplicitOverride))
            }
            None if is_outdoor_room(name) => (
                area.value.saturating_mul(outdoor_factor).round_dp(2),
                outdoor_factor,
                Some(FactorSource::DefaultOutdoor),
            ),
            None => (area.value, Decimal::ONE, None),
        };

        Some(ExtractedRoom {
            room_number: self.room_number,
            room_name: self
                .room_name
                .unwrap_or_else(|| UNKNOWN_ROOM_NAME.to_string()),
            area_m2: area.value,
            counted_m2: counted,
            factor,
            page,
            source_text: area.source,
            bbox: None,
            category,
            extraction_pattern: rule,
            perimeter_m: self.perimeter_m,
            height_m: self.height_m,
            factor_source,
        })
    }
}

/// Room name from the line right after an anchor.
///
/// Rejected when empty, when it matches the style's label/value pattern, or
/// when it is itself an anchor.
pub(crate) fn name_after_anchor(
    lines: &[&str],
    anchor: usize,
    not_a_name: &Regex,
    is_anchor: impl Fn(&str) -> bool,
) -> Option<String> {
    let next = lines.get(anchor + 1)?.trim();
    if next.is_empty() || not_a_name.is_match(next) || is_anchor(next) {
        return None;
    }
    Some(next.to_string())
}

/// Capture a value with `pattern` on the trimmed line at `index`.
pub(crate) fn capture_on_line<'a>(
    lines: &[&'a str],
    index: usize,
    pattern: &Regex,
) -> Option<(&'a str, &'a str)> {
    let line: &'a str = lines.get(index).copied()?.trim();
    let caps = pattern.captures(line)?;
    let whole = caps.get(0)?.as_str();
    let value = caps.get(1)?.as_str();
    Some((whole, value))
}

/// End (exclusive) of the lookahead window after `anchor`.
pub(crate) fn window_end(lines: &[&str], anchor: usize, lookahead: usize) -> usize {
    lines.len().min(anchor.saturating_add(1).saturating_add(lookahead))
}
