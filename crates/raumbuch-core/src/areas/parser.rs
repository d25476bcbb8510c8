//! Extraction pipeline: style detection, per-page dispatch, fallback
//! cascade and aggregation.

use tracing::{debug, info, warn};

use super::fallback;
use super::rules::{
    detect_blueprint_style, GenericExtractor, HaardtringExtractor, LeiqExtractor,
    OmniturmExtractor, RoomExtractor,
};
use crate::error::Result;
use crate::models::config::{ExtractionConfig, RaumbuchConfig};
use crate::models::room::{BlueprintStyle, ExtractedRoom, ExtractionResult, METHOD_UNIFIED};
use crate::pdf::PdfProcessor;

/// Warning emitted when no known style was detected.
pub const UNKNOWN_STYLE_WARNING: &str = "Unknown blueprint style, trying flexible extraction";

/// Per-call extraction options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionOptions {
    /// Style to use instead of auto-detection.
    pub style: Option<BlueprintStyle>,
    /// 0-based pages to process (all pages when `None`).
    pub pages: Option<Vec<usize>>,
}

impl ExtractionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a style.
    pub fn with_style(mut self, style: BlueprintStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Force a style from a user-supplied name. An empty hint means
    /// auto-detect; any other unknown name is rejected.
    pub fn with_style_hint(mut self, hint: &str) -> Result<Self> {
        self.style = if hint.trim().is_empty() {
            None
        } else {
            Some(hint.parse::<BlueprintStyle>()?)
        };
        Ok(self)
    }

    /// Restrict processing to the given pages.
    pub fn with_pages(mut self, pages: Vec<usize>) -> Self {
        self.pages = Some(pages);
        self
    }

    /// Requested page indices, defaulting to every page.
    pub fn page_indices(&self, page_count: usize) -> Vec<usize> {
        match &self.pages {
            Some(pages) => pages.clone(),
            None => (0..page_count).collect(),
        }
    }
}

/// Room-area extraction pipeline.
///
/// Immutable once built; one instance can serve concurrent calls.
pub struct AreaExtractor {
    /// Style extractors in fallback order.
    styles: Vec<(BlueprintStyle, Box<dyn RoomExtractor>)>,
    generic: GenericExtractor,
    default_style: Option<BlueprintStyle>,
    plain_text_fallback: bool,
}

impl AreaExtractor {
    /// Create a pipeline with default settings.
    pub fn new() -> Self {
        Self::build(&ExtractionConfig::default(), None, true)
    }

    /// Create a pipeline from configuration. The configuration is validated
    /// first.
    pub fn from_config(config: &RaumbuchConfig) -> Result<Self> {
        config.validate()?;
        let default_style = config.extraction.style()?;
        Ok(Self::build(
            &config.extraction,
            default_style,
            config.pdf.plain_text_fallback,
        ))
    }

    fn build(
        config: &ExtractionConfig,
        default_style: Option<BlueprintStyle>,
        plain_text_fallback: bool,
    ) -> Self {
        let styles = BlueprintStyle::KNOWN
            .into_iter()
            .filter_map(|style| Self::style_extractor(style, config).map(|e| (style, e)))
            .collect();

        Self {
            styles,
            generic: GenericExtractor::from_config(config),
            default_style,
            plain_text_fallback,
        }
    }

    fn style_extractor(
        style: BlueprintStyle,
        config: &ExtractionConfig,
    ) -> Option<Box<dyn RoomExtractor>> {
        match style {
            BlueprintStyle::Haardtring => {
                Some(Box::new(HaardtringExtractor::from_config(config)) as Box<dyn RoomExtractor>)
            }
            BlueprintStyle::Leiq => {
                Some(Box::new(LeiqExtractor::from_config(config)) as Box<dyn RoomExtractor>)
            }
            BlueprintStyle::Omniturm => {
                Some(Box::new(OmniturmExtractor::from_config(config)) as Box<dyn RoomExtractor>)
            }
            BlueprintStyle::Unknown => None,
        }
    }

    /// Extract rooms from PDF bytes using `processor` for page text.
    pub fn extract(
        &self,
        data: &[u8],
        options: &ExtractionOptions,
        processor: &mut dyn PdfProcessor,
    ) -> Result<ExtractionResult> {
        processor.load(data)?;
        let page_count = processor.page_count();
        debug!(
            "Reading {} pages via {}",
            page_count,
            processor.backend_name()
        );

        let pages = processor.page_texts()?;

        Ok(self.extract_from_pages(&pages, options))
    }

    /// Like [`extract`](Self::extract), but falls back to the plain-text
    /// path when the primary backend is unavailable.
    pub fn extract_with_fallback(
        &self,
        data: &[u8],
        options: &ExtractionOptions,
        primary: &mut dyn PdfProcessor,
        fallback: &mut dyn PdfProcessor,
    ) -> Result<ExtractionResult> {
        match self.extract(data, options, primary) {
            Err(e) if e.is_backend_unavailable() && self.plain_text_fallback => {
                warn!(
                    "{} backend unavailable ({}), using {} plain-text fallback",
                    primary.backend_name(),
                    e,
                    fallback.backend_name()
                );
                fallback::extract(data, options, fallback)
            }
            other => other,
        }
    }

    /// Run the pipeline on already extracted page texts.
    pub fn extract_from_pages<S: AsRef<str>>(
        &self,
        pages: &[S],
        options: &ExtractionOptions,
    ) -> ExtractionResult {
        let page_count = pages.len();
        let full_text = pages
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join("\n");

        let style = options
            .style
            .or(self.default_style)
            .unwrap_or_else(|| detect_blueprint_style(&full_text));
        info!("Blueprint style: {}", style);

        let mut warnings = Vec::new();
        let primary: &dyn RoomExtractor = match self.extractor_for(style) {
            Some(extractor) => extractor,
            None => {
                warnings.push(UNKNOWN_STYLE_WARNING.to_string());
                &self.generic
            }
        };

        let mut rooms = Vec::new();
        for page in options.page_indices(page_count) {
            let Some(text) = pages.get(page).map(|p| p.as_ref()) else {
                warnings.push(format!("Page {} does not exist", page));
                continue;
            };

            let lines: Vec<&str> = text.lines().collect();
            let mut page_rooms = primary.extract(&lines, page);
            if page_rooms.is_empty() {
                page_rooms = self.fallback_rooms(&lines, page, style, &mut warnings);
            }
            debug!("Page {}: {} rooms", page, page_rooms.len());

            rooms.extend(retain_traceable(page_rooms, text));
        }

        ExtractionResult::from_rooms(rooms, page_count, style, METHOD_UNIFIED, warnings)
    }

    fn extractor_for(&self, style: BlueprintStyle) -> Option<&dyn RoomExtractor> {
        self.styles
            .iter()
            .find(|(s, _)| *s == style)
            .map(|(_, extractor)| &**extractor)
    }

    /// Try the other styles in fixed order, then the generic extractor.
    fn fallback_rooms(
        &self,
        lines: &[&str],
        page: usize,
        primary: BlueprintStyle,
        warnings: &mut Vec<String>,
    ) -> Vec<ExtractedRoom> {
        for (style, extractor) in self.styles.iter().filter(|(s, _)| *s != primary) {
            let rooms = extractor.extract(lines, page);
            if !rooms.is_empty() {
                warnings.push(format!("Page {}: Used {} pattern as fallback", page, style));
                return rooms;
            }
        }

        if primary != BlueprintStyle::Unknown {
            let rooms = self.generic.extract(lines, page);
            if !rooms.is_empty() {
                warnings.push(format!("Page {}: Used generic flexible extraction", page));
                return rooms;
            }
        }

        warnings.push(format!("Page {}: No rooms found", page));
        Vec::new()
    }
}

impl Default for AreaExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop rooms whose excerpt does not occur in the page text.
fn retain_traceable(rooms: Vec<ExtractedRoom>, page_text: &str) -> Vec<ExtractedRoom> {
    rooms
        .into_iter()
        .filter(|room| {
            let ok = room.is_traceable_in(page_text);
            if !ok {
                warn!(
                    "Dropping room {}: excerpt {:?} not found on page {}",
                    room.room_number, room.source_text, room.page
                );
            }
            ok
        })
        .collect()
}
