//! Core library for invoice intake.
//!
//! This crate provides:
//! - PDF text reading
//! - Rule-based invoice field extraction from document text
//! - Per-document pipeline that never fails on bad input
//! - Mailbox intake of invoice attachments from `.eml` files
//! - Two-sheet XLSX reports

pub mod error;
pub mod invoice;
pub mod mail;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod report;

pub use error::{InvoxError, Result};
pub use invoice::{ExtractionResult, InvoiceFieldExtractor};
pub use mail::{FetchSummary, MailIntake};
pub use models::config::InvoxConfig;
pub use models::invoice::{InvoiceRecord, PaymentStatus};
pub use pdf::{DocumentReader, PdfDocumentReader, PdfExtractor, PdfProcessor};
pub use pipeline::{BatchOutcome, DocumentOutcome, InvoicePipeline};
pub use report::{ReportSummary, ReportWriter};
