//! End-to-end pipeline tests over an in-memory text backend.

use std::str::FromStr;

use pretty_assertions::assert_eq;
use raumbuch_core::areas::UNKNOWN_STYLE_WARNING;
use raumbuch_core::models::room::{MatchedRule, METHOD_PLAIN_TEXT_FALLBACK, METHOD_UNIFIED};
use raumbuch_core::pdf::Result as PdfResult;
use raumbuch_core::{
    AreaExtractor, BlueprintStyle, ExtractionOptions, ExtractionResult, PdfError, PdfProcessor,
    RaumbuchConfig, RaumbuchError, RoomCategory,
};
use rust_decimal::Decimal;

/// Serves fixed page texts; fails to load when `data` does not start with
/// `%PDF`.
struct MockPdf {
    pages: Vec<String>,
    loaded: bool,
}

impl MockPdf {
    fn new(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|p| p.to_string()).collect(),
            loaded: false,
        }
    }
}

impl PdfProcessor for MockPdf {
    fn load(&mut self, data: &[u8]) -> PdfResult<()> {
        if !data.starts_with(b"%PDF") {
            return Err(PdfError::Parse("missing header".to_string()));
        }
        self.loaded = true;
        Ok(())
    }

    fn page_count(&self) -> usize {
        if self.loaded { self.pages.len() } else { 0 }
    }

    fn extract_text(&self) -> PdfResult<String> {
        Ok(self.pages.join("\n"))
    }

    fn extract_page_text(&self, page: usize) -> PdfResult<String> {
        self.pages
            .get(page)
            .cloned()
            .ok_or(PdfError::InvalidPage(page))
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}

/// Backend that is never available.
struct MissingBackend;

impl PdfProcessor for MissingBackend {
    fn load(&mut self, _data: &[u8]) -> PdfResult<()> {
        Err(PdfError::BackendUnavailable("not compiled in".to_string()))
    }

    fn page_count(&self) -> usize {
        0
    }

    fn extract_text(&self) -> PdfResult<String> {
        Err(PdfError::BackendUnavailable("not compiled in".to_string()))
    }

    fn extract_page_text(&self, _page: usize) -> PdfResult<String> {
        Err(PdfError::BackendUnavailable("not compiled in".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "missing"
    }
}

const PDF: &[u8] = b"%PDF-1.7";

const HAARDTRING_PAGE: &str = "Grundriss 2.OG\n\
R2.E5.3.5\n\
Schlafen\n\
F: 12,34 m²\n\
BA: 2\n\
R2.E5.3.6\n\
Balkon\n\
F: 10,00 m²\n\
50%: 5,00 m²\n\
R2.E5.3.7\n\
Loggia\n\
F:\n\
6,25 m²\n\
R2.E5.3.8\n\
Diele\n\
F: 40,55 m²\n";

const LEIQ_PAGE: &str = "B.00.2.002\n\
Büro\n\
NRF: 20,50 m2\n\
U: 18,40 m\n\
LH: 2,80 m\n\
B.00.2.003\n\
WC\n\
F= 3.45 m²\n";

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn run(pages: &[&str], options: &ExtractionOptions) -> ExtractionResult {
    AreaExtractor::new()
        .extract(PDF, options, &mut MockPdf::new(pages))
        .unwrap()
}

#[test]
fn test_haardtring_document() {
    let result = run(&[HAARDTRING_PAGE], &ExtractionOptions::new());

    assert!(result.success);
    assert_eq!(result.blueprint_style, BlueprintStyle::Haardtring);
    assert_eq!(result.extraction_method, METHOD_UNIFIED);
    assert_eq!(result.room_count, 4);
    assert!(result.warnings.is_empty());

    let balcony = &result.rooms[1];
    assert_eq!(balcony.counted_m2, dec("5.00"));
    assert_eq!(balcony.factor, dec("0.5"));

    let loggia = &result.rooms[2];
    assert_eq!(loggia.area_m2, dec("6.25"));
    assert_eq!(loggia.counted_m2, dec("3.12"));

    assert_eq!(result.rooms[3].category, RoomCategory::Circulation);
    assert_eq!(result.total_area_m2, dec("69.14"));
    assert_eq!(result.total_counted_m2, dec("61.01"));
}

#[test]
fn test_oversized_areas_are_dropped_without_overflow() {
    let page = "R2.E5.3.1\n\
Lager\n\
F: 50000000000000000000000000000 m²\n\
R2.E5.3.2\n\
Lager\n\
F: 50000000000000000000000000000 m²\n\
R2.E5.3.8\n\
Diele\n\
F: 40,55 m²\n";
    let result = run(&[page], &ExtractionOptions::new().with_style(BlueprintStyle::Haardtring));

    assert_eq!(result.room_count, 1);
    assert_eq!(result.rooms[0].room_number, "R2.E5.3.8");
    assert_eq!(result.total_area_m2, dec("40.55"));
}

#[test]
fn test_every_excerpt_is_on_its_page() {
    let pages = [HAARDTRING_PAGE, LEIQ_PAGE, "EG.001\nFlur\nFläche: 8,00 m²"];
    let result = run(&pages, &ExtractionOptions::new());

    assert!(!result.rooms.is_empty());
    for room in &result.rooms {
        assert!(
            pages[room.page].contains(&room.source_text),
            "{:?} not found on page {}",
            room.source_text,
            room.page
        );
    }
}

#[test]
fn test_factor_invariants() {
    let result = run(&[HAARDTRING_PAGE, LEIQ_PAGE], &ExtractionOptions::new());

    for room in &result.rooms {
        if room.factor == Decimal::ONE {
            assert_eq!(room.counted_m2, room.area_m2);
        } else {
            assert!(room.counted_m2 <= room.area_m2);
        }
    }
}

#[test]
fn test_category_totals_match_counted_total() {
    let result = run(&[HAARDTRING_PAGE, LEIQ_PAGE], &ExtractionOptions::new());

    let sum: Decimal = result.totals_by_category.values().copied().sum();
    let tolerance = Decimal::new(1, 2) * Decimal::from(result.totals_by_category.len());
    assert!((sum - result.total_counted_m2).abs() <= tolerance);
    assert_eq!(result.totals_by_category[&RoomCategory::Office], dec("20.50"));
    assert_eq!(result.totals_by_category[&RoomCategory::Sanitary], dec("3.45"));
}

#[test]
fn test_pipeline_is_idempotent() {
    let pages = [HAARDTRING_PAGE, LEIQ_PAGE];
    let first = run(&pages, &ExtractionOptions::new());
    let second = run(&pages, &ExtractionOptions::new());

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_leiq_attributes_survive_pipeline() {
    let result = run(&[LEIQ_PAGE], &ExtractionOptions::new());

    assert_eq!(result.blueprint_style, BlueprintStyle::Leiq);
    assert_eq!(result.rooms[0].perimeter_m, Some(dec("18.40")));
    assert_eq!(result.rooms[0].height_m, Some(dec("2.80")));
    assert_eq!(result.rooms[1].extraction_pattern, MatchedRule::LegacyAreaLabel);
}

#[test]
fn test_unknown_style_uses_generic_extractor() {
    let page = "Projekt Musterhaus\nEG.001\nFlur\nFläche: 8,00 m²\nEG.002\nAbstellraum\nFläche: 2,50 m²";
    let result = run(&[page], &ExtractionOptions::new());

    assert_eq!(result.blueprint_style, BlueprintStyle::Unknown);
    assert!(!result.warnings.is_empty());
    assert_eq!(result.warnings[0], UNKNOWN_STYLE_WARNING);
    assert_eq!(result.room_count, 2);
    assert!(result
        .rooms
        .iter()
        .all(|r| r.extraction_pattern == MatchedRule::GenericProximity));
}

#[test]
fn test_out_of_range_pages_are_warnings() {
    let options = ExtractionOptions::new().with_pages(vec![0, 7]);
    let result = run(&[HAARDTRING_PAGE], &options);

    assert_eq!(result.room_count, 4);
    assert_eq!(result.page_count, 1);
    assert_eq!(result.warnings, vec!["Page 7 does not exist".to_string()]);
}

#[test]
fn test_invalid_style_hint_rejected() {
    let err = ExtractionOptions::new().with_style_hint("archicad").unwrap_err();
    assert!(matches!(err, RaumbuchError::Extraction(_)));
}

#[test]
fn test_style_hint_overrides_detection() {
    let options = ExtractionOptions::new().with_style_hint("omniturm").unwrap();
    let result = run(&[LEIQ_PAGE], &options);

    assert_eq!(result.blueprint_style, BlueprintStyle::Omniturm);
    assert_eq!(result.room_count, 2);
    assert_eq!(
        result.warnings,
        vec!["Page 0: Used leiq pattern as fallback".to_string()]
    );
}

#[test]
fn test_malformed_input_is_parse_error() {
    let err = AreaExtractor::new()
        .extract(b"garbage", &ExtractionOptions::new(), &mut MockPdf::new(&[]))
        .unwrap_err();
    assert!(matches!(err, RaumbuchError::Pdf(PdfError::Parse(_))));
}

#[test]
fn test_unavailable_backend_degrades_to_plain_text() {
    let mut fallback = MockPdf::new(&["Büro NRF: 20,50 m2 U: 18,40 m\nWC NRF: 3,45 m2"]);
    let result = AreaExtractor::new()
        .extract_with_fallback(
            PDF,
            &ExtractionOptions::new(),
            &mut MissingBackend,
            &mut fallback,
        )
        .unwrap();

    assert_eq!(result.extraction_method, METHOD_PLAIN_TEXT_FALLBACK);
    assert_eq!(result.blueprint_style, BlueprintStyle::Unknown);
    assert_eq!(result.warnings[0], "Used plain-text fallback");
    assert_eq!(result.room_count, 2);
    assert_eq!(result.rooms[0].room_number, "room_001");
    assert_eq!(result.rooms[1].room_number, "room_002");
    assert_eq!(result.total_area_m2, dec("23.95"));
}

#[test]
fn test_fallback_disabled_by_config() {
    let mut config = RaumbuchConfig::default();
    config.pdf.plain_text_fallback = false;
    let extractor = AreaExtractor::from_config(&config).unwrap();

    let err = extractor
        .extract_with_fallback(
            PDF,
            &ExtractionOptions::new(),
            &mut MissingBackend,
            &mut MockPdf::new(&["NRF: 1,00 m2"]),
        )
        .unwrap_err();
    assert!(err.is_backend_unavailable());
}

#[test]
fn test_parse_errors_are_not_degraded() {
    let err = AreaExtractor::new()
        .extract_with_fallback(
            b"garbage",
            &ExtractionOptions::new(),
            &mut MockPdf::new(&[]),
            &mut MockPdf::new(&["NRF: 1,00 m2"]),
        )
        .unwrap_err();
    assert!(matches!(err, RaumbuchError::Pdf(PdfError::Parse(_))));
}

#[test]
fn test_summary() {
    let result = run(&[HAARDTRING_PAGE], &ExtractionOptions::new());
    let summary = result.summary();

    assert_eq!(summary.total_rooms, 4);
    assert_eq!(summary.blueprint_style, BlueprintStyle::Haardtring);
    assert!(!summary.has_warnings);
    assert_eq!(summary.rooms_preview[0].room_number, "R2.E5.3.5");
    assert_eq!(summary.rooms_preview[0].source_text, "F: 12,34 m²");
}

#[test]
fn test_top_level_json_rejects_garbage() {
    let err = raumbuch_core::extract_to_json(b"not a pdf", &ExtractionOptions::new()).unwrap_err();
    assert!(matches!(err, RaumbuchError::Pdf(PdfError::Parse(_))));
}
