//! Room-area data models with source traceability.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Extraction method label for the line-scanning pipeline.
pub const METHOD_UNIFIED: &str = "unified_extraction";

/// Extraction method label for the degraded plain-text path.
pub const METHOD_PLAIN_TEXT_FALLBACK: &str = "plain_text_fallback";

/// Room name used when no name line could be recovered.
pub const UNKNOWN_ROOM_NAME: &str = "Unknown";

/// Number of rooms included in a summary preview.
const PREVIEW_ROOMS: usize = 20;

/// Labeling convention of a floor-plan document family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlueprintStyle {
    /// Residential plans: `F:` area labels, `R2.E5.3.5` / `R1A` room numbers.
    Haardtring,
    /// Office plans: `NRF:` (or legacy `F=`) labels, `B.00.2.002` room numbers.
    Leiq,
    /// High-rise plans: `NGF:` labels, `03_b6.12` room numbers.
    Omniturm,
    /// No known convention detected.
    Unknown,
}

impl BlueprintStyle {
    /// The styles with a dedicated extractor, in fallback order.
    pub const KNOWN: [BlueprintStyle; 3] = [
        BlueprintStyle::Haardtring,
        BlueprintStyle::Leiq,
        BlueprintStyle::Omniturm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlueprintStyle::Haardtring => "haardtring",
            BlueprintStyle::Leiq => "leiq",
            BlueprintStyle::Omniturm => "omniturm",
            BlueprintStyle::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BlueprintStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlueprintStyle {
    type Err = ExtractionError;

    /// Parse a caller-supplied style hint. Only the three known styles are
    /// accepted; `unknown` is a detection outcome, not a valid hint.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "haardtring" => Ok(BlueprintStyle::Haardtring),
            "leiq" => Ok(BlueprintStyle::Leiq),
            "omniturm" => Ok(BlueprintStyle::Omniturm),
            _ => Err(ExtractionError::InvalidStyle(s.to_string())),
        }
    }
}

/// Semantic room category used for grouping totals.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RoomCategory {
    Office,
    Residential,
    Circulation,
    Stairs,
    Elevators,
    Shafts,
    Technical,
    Sanitary,
    Storage,
    Outdoor,
    #[default]
    Other,
}

impl RoomCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomCategory::Office => "office",
            RoomCategory::Residential => "residential",
            RoomCategory::Circulation => "circulation",
            RoomCategory::Stairs => "stairs",
            RoomCategory::Elevators => "elevators",
            RoomCategory::Shafts => "shafts",
            RoomCategory::Technical => "technical",
            RoomCategory::Sanitary => "sanitary",
            RoomCategory::Storage => "storage",
            RoomCategory::Outdoor => "outdoor",
            RoomCategory::Other => "other",
        }
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammar rule that produced a room's area value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchedRule {
    /// `F: 12,34 m²` (haardtring).
    #[serde(rename = "colon area label")]
    ColonAreaLabel,
    /// `NRF: 3,45 m2` (leiq).
    #[serde(rename = "modern area label")]
    ModernAreaLabel,
    /// `F= 50.37 m²` (older leiq plans).
    #[serde(rename = "legacy area label")]
    LegacyAreaLabel,
    /// `NGF: 20,00 m2` (omniturm).
    #[serde(rename = "net floor area label")]
    NetFloorAreaLabel,
    /// `Schacht 01` block with a bare value line (omniturm).
    #[serde(rename = "shaft area")]
    ShaftArea,
    /// Proximity pairing of loose labels and identifiers.
    #[serde(rename = "generic proximity")]
    GenericProximity,
    /// Plain-text backend, `NRF:` only.
    #[serde(rename = "fallback area label")]
    FallbackAreaLabel,
}

impl MatchedRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchedRule::ColonAreaLabel => "colon area label",
            MatchedRule::ModernAreaLabel => "modern area label",
            MatchedRule::LegacyAreaLabel => "legacy area label",
            MatchedRule::NetFloorAreaLabel => "net floor area label",
            MatchedRule::ShaftArea => "shaft area",
            MatchedRule::GenericProximity => "generic proximity",
            MatchedRule::FallbackAreaLabel => "fallback area label",
        }
    }
}

impl fmt::Display for MatchedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a counting factor other than 1.0 was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactorSource {
    /// A printed reduced figure (e.g. `50%: 5,00 m²`) supplied the counted area.
    #[serde(rename = "explicit override")]
    ExplicitOverride,
    /// Outdoor room without a printed reduced figure.
    #[serde(rename = "default outdoor")]
    DefaultOutdoor,
}

impl fmt::Display for FactorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactorSource::ExplicitOverride => write!(f, "explicit override"),
            FactorSource::DefaultOutdoor => write!(f, "default outdoor"),
        }
    }
}

/// PDF bounding box coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

/// A single extracted room.
///
/// Every numeric area comes from a regex capture on the page text, and
/// `source_text` is the literal span that capture came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRoom {
    /// Room identifier as printed (grammar depends on the style).
    pub room_number: String,

    /// Room name, or `"Unknown"`.
    pub room_name: String,

    /// Printed area in m².
    pub area_m2: Decimal,

    /// Area counted toward totals after applying `factor`.
    pub counted_m2: Decimal,

    /// Counting factor.
    pub factor: Decimal,

    /// 0-based page index.
    pub page: usize,

    /// Verbatim text span that produced `area_m2`.
    pub source_text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,

    pub category: RoomCategory,

    /// Rule that matched the area value.
    pub extraction_pattern: MatchedRule,

    /// Perimeter (`U:`), leiq only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perimeter_m: Option<Decimal>,

    /// Clear height (`LH:` / `LRH=`), leiq only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_m: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor_source: Option<FactorSource>,
}

impl ExtractedRoom {
    /// Whether `source_text` occurs verbatim in the given page text.
    pub fn is_traceable_in(&self, page_text: &str) -> bool {
        !self.source_text.is_empty() && page_text.contains(&self.source_text)
    }
}

/// Complete extraction result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub success: bool,
    pub rooms: Vec<ExtractedRoom>,
    pub total_area_m2: Decimal,
    pub total_counted_m2: Decimal,
    pub room_count: usize,
    pub page_count: usize,
    pub blueprint_style: BlueprintStyle,
    pub extraction_method: String,
    pub warnings: Vec<String>,
    pub totals_by_category: BTreeMap<RoomCategory, Decimal>,
}

impl ExtractionResult {
    /// Assemble a result, computing totals from the rooms.
    pub fn from_rooms(
        rooms: Vec<ExtractedRoom>,
        page_count: usize,
        blueprint_style: BlueprintStyle,
        extraction_method: &str,
        warnings: Vec<String>,
    ) -> Self {
        // Totals clamp at Decimal::MAX instead of overflowing
        let total_area_m2 = rooms
            .iter()
            .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.area_m2))
            .round_dp(2);
        let total_counted_m2 = rooms
            .iter()
            .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.counted_m2))
            .round_dp(2);

        let mut totals_by_category: BTreeMap<RoomCategory, Decimal> = BTreeMap::new();
        for room in &rooms {
            let total = totals_by_category.entry(room.category).or_default();
            *total = total.saturating_add(room.counted_m2);
        }
        for total in totals_by_category.values_mut() {
            *total = total.round_dp(2);
        }

        Self {
            success: true,
            room_count: rooms.len(),
            rooms,
            total_area_m2,
            total_counted_m2,
            page_count,
            blueprint_style,
            extraction_method: extraction_method.to_string(),
            warnings,
            totals_by_category,
        }
    }

    /// Condensed view of the result.
    pub fn summary(&self) -> ExtractionSummary {
        ExtractionSummary {
            total_rooms: self.room_count,
            total_area_m2: self.total_area_m2,
            total_counted_m2: self.total_counted_m2,
            blueprint_style: self.blueprint_style,
            categories: self.totals_by_category.clone(),
            has_warnings: !self.warnings.is_empty(),
            rooms_preview: self
                .rooms
                .iter()
                .take(PREVIEW_ROOMS)
                .map(|r| RoomPreview {
                    room_number: r.room_number.clone(),
                    room_name: r.room_name.clone(),
                    area_m2: r.area_m2,
                    source_text: r.source_text.clone(),
                })
                .collect(),
        }
    }
}

/// Summary of an extraction result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub total_rooms: usize,
    pub total_area_m2: Decimal,
    pub total_counted_m2: Decimal,
    pub blueprint_style: BlueprintStyle,
    pub categories: BTreeMap<RoomCategory, Decimal>,
    pub has_warnings: bool,
    /// First rooms of the result, for quick inspection.
    pub rooms_preview: Vec<RoomPreview>,
}

/// Short form of a room for summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomPreview {
    pub room_number: String,
    pub room_name: String,
    pub area_m2: Decimal,
    pub source_text: String,
}
