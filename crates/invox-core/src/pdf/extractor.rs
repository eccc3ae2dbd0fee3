//! PDF text extraction using lopdf and pdf-extract.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use lopdf::Document;
use tracing::debug;

use super::{DocumentReader, PdfProcessor, Result};
use crate::error::PdfError;

/// PDF content extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads from bytes, so keep the decrypted copy
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        // pdf-extract panics on some malformed content streams
        let extracted = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(&self.raw_data)
        }))
        .map_err(|payload| PdfError::TextExtraction(panic_message(payload.as_ref())))?;

        extracted.map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("extractor panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("extractor panicked: {}", s)
    } else {
        "extractor panicked".to_string()
    }
}

/// Reads document text from PDF files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfDocumentReader;

impl PdfDocumentReader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentReader for PdfDocumentReader {
    fn read_text(&self, path: &Path) -> Result<String> {
        let data = std::fs::read(path).map_err(|source| PdfError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let mut extractor = PdfExtractor::new();
        extractor.load(&data)?;
        debug!(
            "Loaded {} with {} pages",
            path.display(),
            extractor.page_count()
        );
        extractor.extract_text()
    }
}
