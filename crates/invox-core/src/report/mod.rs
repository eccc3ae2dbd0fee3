//! Spreadsheet report output.

mod csv_export;
mod summary;
mod xlsx;

pub use summary::ReportSummary;

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::info;

use crate::error::ReportError;
use crate::models::config::ReportConfig;
use crate::models::invoice::InvoiceRecord;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Writes invoice records as a data sheet plus a summary sheet.
pub struct ReportWriter {
    config: ReportConfig,
}

impl ReportWriter {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Timestamped report path inside `output_dir`.
    pub fn report_path(&self, output_dir: &Path, timestamp: NaiveDateTime) -> PathBuf {
        output_dir.join(format!(
            "{}_{}.xlsx",
            self.config.file_prefix,
            timestamp.format("%Y%m%d_%H%M%S")
        ))
    }

    /// Write the XLSX workbook, and the CSV copy when configured.
    pub fn write(&self, records: &[InvoiceRecord], path: &Path) -> Result<ReportSummary> {
        if records.is_empty() {
            return Err(ReportError::Empty);
        }

        let summary = ReportSummary::from_records(records);
        xlsx::write_workbook(&self.config, records, &summary, path)?;

        if self.config.write_csv {
            self.write_csv(records, &path.with_extension("csv"))?;
        }

        info!(
            "Report written to {}: {} invoices, total {}",
            path.display(),
            summary.total_invoices,
            summary.formatted_total()
        );
        Ok(summary)
    }

    /// Write only the data sheet, as CSV.
    pub fn write_csv(&self, records: &[InvoiceRecord], path: &Path) -> Result<()> {
        let file = File::create(path).map_err(csv::Error::from)?;
        csv_export::write_records(file, records)?;
        Ok(())
    }

    /// Render records as CSV text.
    pub fn to_csv_string(records: &[InvoiceRecord]) -> Result<String> {
        let mut buf = Vec::new();
        csv_export::write_records(&mut buf, records)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
