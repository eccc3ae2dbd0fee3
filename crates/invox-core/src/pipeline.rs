//! Document-level processing: read text, extract fields, never fail.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::PipelineError;
use crate::invoice::InvoiceFieldExtractor;
use crate::models::invoice::InvoiceRecord;
use crate::pdf::DocumentReader;

/// Result of processing one document.
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    /// Path of the document.
    pub path: PathBuf,
    /// Extracted record; all fields empty when reading failed.
    pub record: InvoiceRecord,
    /// Fields no rule matched.
    pub missing_fields: Vec<&'static str>,
    /// Why the document could not be read, if it could not.
    pub error: Option<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl DocumentOutcome {
    pub fn is_read(&self) -> bool {
        self.error.is_none()
    }
}

/// Reads documents and extracts one record from each.
pub struct InvoicePipeline<R> {
    reader: R,
    extractor: InvoiceFieldExtractor,
}

impl<R: DocumentReader> InvoicePipeline<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            extractor: InvoiceFieldExtractor::new(),
        }
    }

    /// Process a single document.
    ///
    /// Read failures and panics from the reader are contained here and turn
    /// into an all-empty record tagged with the file name.
    pub fn process_document(&self, path: &Path) -> DocumentOutcome {
        let start = Instant::now();
        let source_file = source_file_name(path);
        info!("Processing document: {}", source_file);

        let read = panic::catch_unwind(AssertUnwindSafe(|| self.reader.read_text(path)));

        let (record, missing_fields, error) = match read {
            Ok(Ok(text)) => {
                let result = self.extractor.parse(&text, &source_file);
                debug!(
                    "Extracted fields from {} in {} ms",
                    source_file, result.processing_time_ms
                );
                (result.record, result.missing_fields, None)
            }
            Ok(Err(e)) => {
                warn!("Failed to read {}: {}", path.display(), e);
                let record = InvoiceRecord::empty(source_file);
                let missing = record.missing_fields();
                (record, missing, Some(e.to_string()))
            }
            Err(_) => {
                warn!("Reader panicked on {}", path.display());
                let record = InvoiceRecord::empty(source_file);
                let missing = record.missing_fields();
                (record, missing, Some("document reader panicked".to_string()))
            }
        };

        DocumentOutcome {
            path: path.to_path_buf(),
            record,
            missing_fields,
            error,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Process documents one after another.
    pub fn process_all<P: AsRef<Path>>(&self, paths: &[P]) -> BatchOutcome {
        paths
            .iter()
            .map(|p| self.process_document(p.as_ref()))
            .collect()
    }
}

/// File name component of a path, used to tag records.
pub fn source_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub documents: Vec<DocumentOutcome>,
}

impl BatchOutcome {
    /// Number of documents whose text was read.
    pub fn read_count(&self) -> usize {
        self.documents.iter().filter(|d| d.is_read()).count()
    }

    /// Documents that could not be read.
    pub fn failed(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.documents.iter().filter(|d| !d.is_read())
    }

    /// Records that belong in the report.
    ///
    /// Fails when nothing could be read or nothing qualified, both of which
    /// leave nothing to report.
    pub fn reportable_records(&self) -> Result<Vec<InvoiceRecord>, PipelineError> {
        let read = self.read_count();
        if read == 0 {
            return Err(PipelineError::NoDocumentsRead {
                attempted: self.documents.len(),
            });
        }

        let records: Vec<InvoiceRecord> = self
            .documents
            .iter()
            .map(|d| &d.record)
            .filter(|r| r.is_reportable())
            .cloned()
            .collect();

        if records.is_empty() {
            return Err(PipelineError::NoQualifyingRecords { read });
        }

        Ok(records)
    }
}

impl FromIterator<DocumentOutcome> for BatchOutcome {
    fn from_iter<I: IntoIterator<Item = DocumentOutcome>>(iter: I) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdfError;
    use crate::pdf;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    /// Serves canned text per file name; unknown files fail to read.
    struct FakeReader {
        texts: HashMap<&'static str, &'static str>,
    }

    impl DocumentReader for FakeReader {
        fn read_text(&self, path: &Path) -> pdf::Result<String> {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if name == "panic.pdf" {
                panic!("corrupt xref table");
            }
            self.texts
                .get(name)
                .map(|t| t.to_string())
                .ok_or_else(|| PdfError::Parse("not a PDF".to_string()))
        }
    }

    fn pipeline() -> InvoicePipeline<FakeReader> {
        let texts = HashMap::from([
            ("good.pdf", "Acme Corp\nInvoice Number: A-1\nTotal: $10.00"),
            ("boilerplate.pdf", "INVOICE\nInvoice Date: 2024-01-01\nDue Date: 2024-02-01"),
        ]);
        InvoicePipeline::new(FakeReader { texts })
    }

    #[test]
    fn test_unreadable_document_yields_empty_record() {
        let outcome = pipeline().process_document(Path::new("/tmp/in/broken.pdf"));

        assert_eq!(outcome.record, InvoiceRecord::empty("broken.pdf"));
        assert_eq!(outcome.missing_fields.len(), 6);
        assert!(outcome.error.unwrap().contains("not a PDF"));
    }

    #[test]
    fn test_outcome_lists_missing_fields() {
        let outcome = pipeline().process_document(Path::new("good.pdf"));

        assert!(outcome.is_read());
        assert_eq!(
            outcome.missing_fields,
            vec!["invoice_date", "due_date", "payment_status"]
        );
    }

    #[test]
    fn test_reader_panic_is_contained() {
        let outcome = pipeline().process_document(Path::new("panic.pdf"));

        assert_eq!(outcome.record, InvoiceRecord::empty("panic.pdf"));
        assert!(!outcome.is_read());
    }

    #[test]
    fn test_batch_keeps_order_and_filters_reportable() {
        let batch = pipeline().process_all(&["good.pdf", "broken.pdf", "boilerplate.pdf"]);

        let names: Vec<&str> = batch
            .documents
            .iter()
            .map(|d| d.record.source_file.as_str())
            .collect();
        assert_eq!(names, vec!["good.pdf", "broken.pdf", "boilerplate.pdf"]);
        assert_eq!(batch.read_count(), 2);
        assert_eq!(batch.failed().count(), 1);

        let records = batch.reportable_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].invoice_number.as_deref(), Some("A-1"));
    }

    #[test]
    fn test_nothing_read() {
        let batch = pipeline().process_all(&["x.pdf", "y.pdf"]);
        assert_eq!(
            batch.reportable_records(),
            Err(PipelineError::NoDocumentsRead { attempted: 2 })
        );
    }

    #[test]
    fn test_nothing_qualifies() {
        let batch = pipeline().process_all(&["boilerplate.pdf"]);
        assert_eq!(
            batch.reportable_records(),
            Err(PipelineError::NoQualifyingRecords { read: 1 })
        );
    }

    #[test]
    fn test_source_file_name() {
        assert_eq!(source_file_name(Path::new("input/a/b.pdf")), "b.pdf");
        assert_eq!(source_file_name(Path::new("c.pdf")), "c.pdf");
    }
}
