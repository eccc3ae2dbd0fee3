//! Mailbox intake: find invoice emails and save their attachments.
//!
//! Messages are read from a directory of exported `.eml` files.

mod message;
mod naming;

pub use message::{Attachment, MailMessage};
pub use naming::{attachment_file_name, metadata_path, safe_subject, AttachmentMetadata};

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Local, NaiveTime, Utc};
use tracing::{debug, info, warn};

use crate::error::MailError;
use crate::models::config::MailConfig;

/// Result type for mail operations.
pub type Result<T> = std::result::Result<T, MailError>;

/// Outcome of one fetch run.
#[derive(Debug, Clone, Default)]
pub struct FetchSummary {
    /// Messages identified as invoice emails.
    pub emails_found: usize,
    /// Attachments written to the input directory.
    pub files_downloaded: usize,
    /// Paths of the written attachments.
    pub downloaded_files: Vec<PathBuf>,
}

/// A message file that passed the invoice search.
struct InvoiceEmail {
    path: PathBuf,
    message: MailMessage,
}

/// Pulls invoice attachments out of a mailbox directory.
pub struct MailIntake {
    config: MailConfig,
    input_dir: PathBuf,
}

impl MailIntake {
    pub fn new(config: MailConfig, input_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            input_dir: input_dir.into(),
        }
    }

    /// Fetch using the current local time.
    pub fn fetch(&self) -> Result<FetchSummary> {
        self.fetch_at(Local::now())
    }

    /// Search the mailbox, save attachments, and archive handled messages.
    pub fn fetch_at(&self, now: DateTime<Local>) -> Result<FetchSummary> {
        info!("Starting invoice download from {}", self.config.mailbox_dir.display());

        let invoices = self.search(now)?;
        if invoices.is_empty() {
            info!("No invoice emails found");
            return Ok(FetchSummary::default());
        }

        fs::create_dir_all(&self.input_dir)?;

        let mut downloaded_files = Vec::new();
        for email in &invoices {
            debug!(
                "Processing email: {}",
                email.message.subject.as_deref().unwrap_or("Unknown")
            );
            downloaded_files.extend(self.save_attachments(&email.message, now));
        }

        if let Some(archive_dir) = &self.config.archive_dir {
            self.archive(&invoices, archive_dir);
        }

        info!(
            "Downloaded {} files from {} emails",
            downloaded_files.len(),
            invoices.len()
        );

        Ok(FetchSummary {
            emails_found: invoices.len(),
            files_downloaded: downloaded_files.len(),
            downloaded_files,
        })
    }

    /// Whether the subject contains any invoice keyword, ignoring case.
    pub fn is_invoice_subject(&self, subject: &str) -> bool {
        let subject = subject.to_lowercase();
        self.config
            .invoice_keywords
            .iter()
            .any(|keyword| subject.contains(&keyword.to_lowercase()))
    }

    /// Whether the attachment has one of the supported extensions.
    pub fn is_supported(&self, attachment: &Attachment) -> bool {
        let ext = attachment.extension();
        !ext.is_empty()
            && self
                .config
                .supported_extensions
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(&ext))
    }

    fn search(&self, now: DateTime<Local>) -> Result<Vec<InvoiceEmail>> {
        let cutoff = self.cutoff(now);
        let mut invoices = Vec::new();

        let paths = list_messages(&self.config.mailbox_dir)?;
        info!("Found {} emails to check", paths.len());

        for path in paths {
            let message = match fs::read(&path)
                .map_err(MailError::from)
                .and_then(|raw| MailMessage::parse(&raw, &path.display().to_string()))
            {
                Ok(message) => message,
                Err(e) => {
                    warn!("Error processing email {}: {}", path.display(), e);
                    continue;
                }
            };

            if message
                .sent_at
                .zip(cutoff)
                .is_some_and(|(sent, cutoff)| sent < cutoff)
            {
                continue;
            }

            let keyword_match = message
                .subject
                .as_deref()
                .is_some_and(|s| self.is_invoice_subject(s));
            let has_attachments = message.attachments.iter().any(|a| self.is_supported(a));

            if keyword_match || has_attachments {
                info!(
                    "Found invoice email: {} (keywords: {}, attachments: {})",
                    message.subject.as_deref().unwrap_or("No Subject"),
                    keyword_match,
                    has_attachments
                );
                invoices.push(InvoiceEmail { path, message });
            }
        }

        info!("Found {} potential invoice emails", invoices.len());
        Ok(invoices)
    }

    /// Unix timestamp of midnight UTC, `days_back` days before `now`.
    ///
    /// `None` when the window reaches past the representable date range.
    fn cutoff(&self, now: DateTime<Local>) -> Option<i64> {
        let since = now
            .with_timezone(&Utc)
            .checked_sub_signed(Duration::days(i64::from(self.config.days_back)))?;
        Some(since.date_naive().and_time(NaiveTime::MIN).and_utc().timestamp())
    }

    fn save_attachments(&self, message: &MailMessage, now: DateTime<Local>) -> Vec<PathBuf> {
        let subject = message.subject.as_deref().unwrap_or("Unknown");
        let saved_at = now.naive_local();
        let mut saved = Vec::new();

        for attachment in &message.attachments {
            if !self.is_supported(attachment) {
                debug!("Skipping unsupported file: {}", attachment.filename);
                continue;
            }

            let name = attachment_file_name(
                subject,
                &attachment.stem(),
                &attachment.extension(),
                saved_at,
            );
            let file_path = self.input_dir.join(&name);

            if let Err(e) = fs::write(&file_path, &attachment.data) {
                let err = MailError::Attachment {
                    name: attachment.filename.clone(),
                    reason: e.to_string(),
                };
                warn!("{}", err);
                continue;
            }
            info!("Downloaded: {}", name);

            let metadata = AttachmentMetadata {
                subject,
                from: message.from.as_deref().unwrap_or("Unknown"),
                date: message.date.as_deref().unwrap_or("Unknown"),
                downloaded_at: saved_at,
            };
            if let Err(e) = metadata.write_for(&file_path) {
                warn!("Error creating metadata file for {}: {}", name, e);
            }

            saved.push(file_path);
        }

        saved
    }

    fn archive(&self, invoices: &[InvoiceEmail], archive_dir: &Path) {
        if let Err(e) = fs::create_dir_all(archive_dir) {
            warn!("Cannot create archive directory {}: {}", archive_dir.display(), e);
            return;
        }

        for email in invoices {
            let Some(name) = email.path.file_name() else {
                continue;
            };
            if let Err(e) = fs::rename(&email.path, archive_dir.join(name)) {
                warn!("Error archiving {}: {}", email.path.display(), e);
            }
        }
        debug!("Archived {} emails", invoices.len());
    }
}

/// `.eml` files in the mailbox directory, sorted by name.
fn list_messages(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| MailError::Mailbox {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("eml"))
        })
        .collect();
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use super::message::tests::sample_eml;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 20, 12, 0, 0).unwrap()
    }

    fn intake(root: &Path, archive: bool) -> MailIntake {
        let config = MailConfig {
            mailbox_dir: root.join("mailbox"),
            archive_dir: archive.then(|| root.join("archive")),
            ..MailConfig::default()
        };
        MailIntake::new(config, root.join("input"))
    }

    fn write_message(root: &Path, name: &str, content: &str) {
        let mailbox = root.join("mailbox");
        fs::create_dir_all(&mailbox).unwrap();
        fs::write(mailbox.join(name), content).unwrap();
    }

    #[test]
    fn test_keyword_match_ignores_case() {
        let dir = tempfile::tempdir().unwrap();
        let intake = intake(dir.path(), false);

        assert!(intake.is_invoice_subject("Your INVOICE for January"));
        assert!(intake.is_invoice_subject("inv-2024-001 attached"));
        assert!(!intake.is_invoice_subject("Lunch on Friday?"));
    }

    #[test]
    fn test_fetch_saves_supported_attachments() {
        let dir = tempfile::tempdir().unwrap();
        write_message(
            dir.path(),
            "001.eml",
            &sample_eml("Your invoice #42", "Mon, 15 Jan 2024 10:00:00 +0000"),
        );
        write_message(dir.path(), "002.eml", "Subject: Lunch\r\n\r\nSee you\r\n");

        let summary = intake(dir.path(), false).fetch_at(now()).unwrap();

        assert_eq!(summary.emails_found, 1);
        assert_eq!(summary.files_downloaded, 1);

        let saved = &summary.downloaded_files[0];
        let name = saved.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("Your-invoice-42_Invoice 42_20240120_"));
        assert!(name.ends_with(".pdf"));
        assert_eq!(fs::read(saved).unwrap(), b"%PDF-1.4\n".to_vec());
        assert!(metadata_path(saved).exists());
        assert!(dir.path().join("mailbox/001.eml").exists());
    }

    #[test]
    fn test_fetch_skips_old_messages() {
        let dir = tempfile::tempdir().unwrap();
        write_message(
            dir.path(),
            "old.eml",
            &sample_eml("Invoice", "Fri, 01 Sep 2023 10:00:00 +0000"),
        );

        let summary = intake(dir.path(), false).fetch_at(now()).unwrap();
        assert_eq!(summary.emails_found, 0);
        assert!(summary.downloaded_files.is_empty());
    }

    #[test]
    fn test_fetch_archives_handled_messages() {
        let dir = tempfile::tempdir().unwrap();
        write_message(
            dir.path(),
            "001.eml",
            &sample_eml("Statement", "Mon, 15 Jan 2024 10:00:00 +0000"),
        );

        let summary = intake(dir.path(), true).fetch_at(now()).unwrap();

        assert_eq!(summary.emails_found, 1);
        assert!(!dir.path().join("mailbox/001.eml").exists());
        assert!(dir.path().join("archive/001.eml").exists());
    }

    #[test]
    fn test_huge_days_back_disables_cutoff() {
        let dir = tempfile::tempdir().unwrap();
        write_message(
            dir.path(),
            "old.eml",
            &sample_eml("Invoice", "Fri, 01 Sep 2023 10:00:00 +0000"),
        );
        let config = MailConfig {
            mailbox_dir: dir.path().join("mailbox"),
            days_back: u32::MAX,
            ..MailConfig::default()
        };
        let intake = MailIntake::new(config, dir.path().join("input"));

        assert_eq!(intake.cutoff(now()), None);
        let summary = intake.fetch_at(now()).unwrap();
        assert_eq!(summary.emails_found, 1);
    }

    #[test]
    fn test_cutoff_is_midnight_utc() {
        let dir = tempfile::tempdir().unwrap();
        let intake = intake(dir.path(), false);
        let expected = Utc
            .with_ymd_and_hms(2023, 12, 21, 0, 0, 0)
            .unwrap()
            .timestamp();

        let now = Utc
            .with_ymd_and_hms(2024, 1, 20, 12, 0, 0)
            .unwrap()
            .with_timezone(&Local);

        assert_eq!(intake.cutoff(now), Some(expected));
    }

    #[test]
    fn test_missing_mailbox_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = intake(dir.path(), false).fetch_at(now());
        assert!(matches!(result, Err(MailError::Mailbox { .. })));
    }
}
