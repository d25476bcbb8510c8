//! Per-page text extraction using lopdf.

#[cfg(feature = "lopdf-backend")]
use lopdf::Document;
use tracing::debug;

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// Primary text backend. Reads each page's content stream separately so
/// page boundaries are exact.
///
/// Without the `lopdf-backend` feature every load fails with
/// [`PdfError::BackendUnavailable`].
#[derive(Default)]
pub struct LopdfExtractor {
    #[cfg(feature = "lopdf-backend")]
    document: Option<Document>,
    /// Page numbers as stored in the document (1-based), in page order.
    page_numbers: Vec<u32>,
}

impl LopdfExtractor {
    /// Create a new extractor with no document loaded.
    pub fn new() -> Self {
        Self::default()
    }

    fn page_number(&self, page: usize) -> Result<u32> {
        self.page_numbers
            .get(page)
            .copied()
            .ok_or(PdfError::InvalidPage(page))
    }
}

#[cfg(feature = "lopdf-backend")]
impl PdfProcessor for LopdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
        }

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_numbers.len());
        self.page_numbers = page_numbers;
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn extract_text(&self) -> Result<String> {
        let mut text = String::new();
        for page in 0..self.page_count() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&self.extract_page_text(page)?);
        }
        Ok(text)
    }

    fn extract_page_text(&self, page: usize) -> Result<String> {
        let number = self.page_number(page)?;
        let doc = self
            .document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))?;

        doc.extract_text(&[number])
            .map_err(|e| PdfError::TextExtraction(format!("page {}: {}", page, e)))
    }

    fn backend_name(&self) -> &'static str {
        "lopdf"
    }
}

#[cfg(not(feature = "lopdf-backend"))]
impl PdfProcessor for LopdfExtractor {
    fn load(&mut self, _data: &[u8]) -> Result<()> {
        debug!("lopdf backend not compiled in");
        Err(PdfError::BackendUnavailable(
            "lopdf backend disabled at compile time".to_string(),
        ))
    }

    fn page_count(&self) -> usize {
        0
    }

    fn extract_text(&self) -> Result<String> {
        Err(PdfError::BackendUnavailable(
            "lopdf backend disabled at compile time".to_string(),
        ))
    }

    fn extract_page_text(&self, page: usize) -> Result<String> {
        self.page_number(page)?;
        self.extract_text()
    }

    fn backend_name(&self) -> &'static str {
        "lopdf"
    }
}
