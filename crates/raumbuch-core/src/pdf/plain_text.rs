//! Plain-text extraction using pdf-extract.

use tracing::debug;

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// Degraded text backend. pdf-extract yields one text block per page in
/// document order, without layout or font information.
#[derive(Debug, Default)]
pub struct PlainTextExtractor {
    pages: Vec<String>,
}

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PdfProcessor for PlainTextExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        self.pages = pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| PdfError::Parse(e.to_string()))?;

        debug!(
            "Extracted {} chars of plain text in {} page(s)",
            self.pages.iter().map(String::len).sum::<usize>(),
            self.pages.len()
        );
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn extract_text(&self) -> Result<String> {
        Ok(self.pages.join("\n"))
    }

    fn extract_page_text(&self, page: usize) -> Result<String> {
        self.pages
            .get(page)
            .cloned()
            .ok_or(PdfError::InvalidPage(page))
    }

    fn backend_name(&self) -> &'static str {
        "pdf-extract"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_out_of_range() {
        let extractor = PlainTextExtractor::new();
        assert_eq!(extractor.page_count(), 0);
        assert!(matches!(
            extractor.extract_page_text(0),
            Err(PdfError::InvalidPage(0))
        ));
    }

    #[test]
    fn test_garbage_is_error() {
        let mut extractor = PlainTextExtractor::new();
        assert!(extractor.load(b"not a pdf").is_err());
    }
}
