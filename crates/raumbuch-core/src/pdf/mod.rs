//! PDF text backends.

mod extractor;
mod plain_text;

pub use extractor::LopdfExtractor;
pub use plain_text::PlainTextExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text backends.
///
/// Page indices are 0-based.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Number of pages in the loaded PDF.
    fn page_count(&self) -> usize;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;

    /// Extract text from a single page.
    fn extract_page_text(&self, page: usize) -> Result<String>;

    /// Text of every page, in page order.
    fn page_texts(&self) -> Result<Vec<String>> {
        (0..self.page_count())
            .map(|page| self.extract_page_text(page))
            .collect()
    }

    /// Short backend name for logs and diagnostics.
    fn backend_name(&self) -> &'static str;
}
