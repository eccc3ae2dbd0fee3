//! Configuration structures for the intake pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for the invox pipeline.
///
/// Passed explicitly to every collaborator; nothing reads process-wide state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoxConfig {
    /// Working directories.
    pub paths: PathsConfig,

    /// Document processing configuration.
    pub processing: ProcessingConfig,

    /// Mailbox intake configuration.
    pub mail: MailConfig,

    /// Report output configuration.
    pub report: ReportConfig,
}

/// Working directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Where fetched attachments are stored.
    pub input_dir: PathBuf,

    /// Where reports are written.
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl PathsConfig {
    /// Create the input and output directories if missing.
    pub fn ensure_dirs(&self) -> Result<(), std::io::Error> {
        std::fs::create_dir_all(&self.input_dir)?;
        std::fs::create_dir_all(&self.output_dir)
    }
}

/// Document processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of documents processed concurrently.
    pub max_workers: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self { max_workers: 4 }
    }
}

/// Mailbox intake configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// Directory of exported `.eml` messages.
    pub mailbox_dir: PathBuf,

    /// Handled invoice messages are moved here when set.
    pub archive_dir: Option<PathBuf>,

    /// Only messages dated within this many days are considered.
    pub days_back: u32,

    /// Subject keywords marking a message as an invoice (matched lowercase).
    pub invoice_keywords: Vec<String>,

    /// Attachment extensions to save, with leading dot.
    pub supported_extensions: Vec<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            mailbox_dir: PathBuf::from("mailbox"),
            archive_dir: None,
            days_back: 30,
            invoice_keywords: default_invoice_keywords(),
            supported_extensions: [".pdf", ".xlsx", ".xls", ".docx", ".doc"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

fn default_invoice_keywords() -> Vec<String> {
    [
        "invoice", "bill", "receipt", "statement", "payment",
        "INV-", "INVOICE-", "BILL-", "RECEIPT-", "PAYMENT-",
        "invoice #", "bill #", "receipt #", "statement #",
        "invoice number", "bill number", "receipt number",
        "monthly invoice", "monthly bill", "monthly statement",
        "quarterly invoice", "quarterly bill", "quarterly statement",
        "annual invoice", "annual bill", "annual statement",
        "service invoice", "service bill", "service receipt",
        "consulting invoice", "consulting bill",
        "development invoice", "development bill",
        "software invoice", "software bill",
        "maintenance invoice", "maintenance bill",
        "support invoice", "support bill",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Report output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Name of the per-record sheet.
    pub data_sheet: String,

    /// Name of the totals sheet.
    pub summary_sheet: String,

    /// Report file name prefix, followed by a timestamp.
    pub file_prefix: String,

    /// Also write the data sheet as CSV next to the workbook.
    pub write_csv: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_sheet: "Invoice_Data".to_string(),
            summary_sheet: "Summary".to_string(),
            file_prefix: "invoice_report".to_string(),
            write_csv: false,
        }
    }
}

impl InvoxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: InvoxConfig =
            serde_json::from_str(r#"{"processing": {"max_workers": 8}, "mail": {"days_back": 7}}"#)
                .unwrap();

        assert_eq!(config.processing.max_workers, 8);
        assert_eq!(config.mail.days_back, 7);
        assert_eq!(config.mail.supported_extensions.len(), 5);
        assert_eq!(config.report.data_sheet, "Invoice_Data");
        assert_eq!(config.paths.input_dir, PathBuf::from("input"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = InvoxConfig::default();
        config.mail.archive_dir = Some(PathBuf::from("done"));
        config.save(&path).unwrap();

        let loaded = InvoxConfig::from_file(&path).unwrap();
        assert_eq!(loaded.mail.archive_dir, Some(PathBuf::from("done")));
        assert_eq!(loaded.report.file_prefix, "invoice_report");
    }

    #[test]
    fn test_ensure_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathsConfig {
            input_dir: dir.path().join("in"),
            output_dir: dir.path().join("out/nested"),
        };

        paths.ensure_dirs().unwrap();
        assert!(paths.input_dir.is_dir());
        assert!(paths.output_dir.is_dir());
    }
}
