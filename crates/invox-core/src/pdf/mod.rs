//! PDF processing module.

mod extractor;

pub use extractor::{PdfDocumentReader, PdfExtractor};

use std::path::Path;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;
}

/// Source of document text for the extraction pipeline.
///
/// Implementations must be shareable across worker threads.
pub trait DocumentReader: Send + Sync {
    /// Read the full text of the document at `path`.
    fn read_text(&self, path: &Path) -> Result<String>;
}
