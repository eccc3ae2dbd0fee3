//! Error types for the invox-core library.

use thiserror::Error;

/// Main error type for the invox library.
#[derive(Error, Debug)]
pub enum InvoxError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Mailbox intake error.
    #[error("mail error: {0}")]
    Mail(#[from] MailError),

    /// Report writing error.
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// Batch pipeline error.
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
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

    /// Reading the file from disk failed.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to mailbox intake.
#[derive(Error, Debug)]
pub enum MailError {
    /// The mailbox directory does not exist or cannot be listed.
    #[error("mailbox unavailable at {path}: {reason}")]
    Mailbox { path: String, reason: String },

    /// A message could not be parsed.
    #[error("failed to parse message {path}: {reason}")]
    Parse { path: String, reason: String },

    /// An attachment could not be decoded or written.
    #[error("failed to save attachment {name}: {reason}")]
    Attachment { name: String, reason: String },

    /// I/O error while reading or moving messages.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to report writing.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Spreadsheet generation failed.
    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// CSV generation failed.
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Nothing to write.
    #[error("no records to report")]
    Empty,
}

/// Batch outcomes that leave nothing to report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Every document failed to load.
    #[error("none of the {attempted} documents could be read")]
    NoDocumentsRead { attempted: usize },

    /// Documents were read but no record carried an invoice number, amount or vendor.
    #[error("no invoice data extracted from {read} documents")]
    NoQualifyingRecords { read: usize },
}

/// Result type for the invox library.
pub type Result<T> = std::result::Result<T, InvoxError>;
