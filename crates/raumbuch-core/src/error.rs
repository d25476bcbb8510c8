//! Error types for the raumbuch-core library.

use thiserror::Error;

/// Main error type for the raumbuch library.
#[derive(Error, Debug)]
pub enum RaumbuchError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Area extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl RaumbuchError {
    /// Whether the error means the text backend itself is missing, so a
    /// lower-fidelity backend may still be able to serve the request.
    pub fn is_backend_unavailable(&self) -> bool {
        matches!(self, RaumbuchError::Pdf(PdfError::BackendUnavailable(_)))
    }
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(usize),

    /// The text extraction backend is not compiled in or cannot run.
    #[error("text extraction backend unavailable: {0}")]
    BackendUnavailable(String),
}

/// Errors related to room-area extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Style hint is not one of the known blueprint styles.
    #[error("invalid style '{0}'. Use: haardtring, leiq, omniturm, or leave empty for auto-detect")]
    InvalidStyle(String),

    /// Failed to parse a value.
    #[error("failed to parse {field}: {value}")]
    Parse { field: String, value: String },
}

/// Result type for the raumbuch library.
pub type Result<T> = std::result::Result<T, RaumbuchError>;
