//! File names and metadata sidecars for saved attachments.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref UNSAFE_CHARS: Regex = Regex::new(r"[^\w\s-]").unwrap();
    static ref SEPARATOR_RUNS: Regex = Regex::new(r"[-\s]+").unwrap();
}

const MAX_SUBJECT_CHARS: usize = 50;

/// Subject reduced to characters safe in a file name, at most 50 long.
pub fn safe_subject(subject: &str) -> String {
    let cleaned = UNSAFE_CHARS.replace_all(subject, "");
    let collapsed = SEPARATOR_RUNS.replace_all(&cleaned, "-");
    collapsed.chars().take(MAX_SUBJECT_CHARS).collect()
}

/// `<safe_subject>_<stem>_<YYYYmmdd_HHMMSS><ext>`
pub fn attachment_file_name(subject: &str, stem: &str, ext: &str, saved_at: NaiveDateTime) -> String {
    format!(
        "{}_{}_{}{}",
        safe_subject(subject),
        stem,
        saved_at.format("%Y%m%d_%H%M%S"),
        ext
    )
}

/// Sidecar path: `invoice.pdf` -> `invoice.metadata.txt`.
pub fn metadata_path(file_path: &Path) -> PathBuf {
    file_path.with_extension("metadata.txt")
}

/// Describes where a saved attachment came from.
#[derive(Debug, Clone)]
pub struct AttachmentMetadata<'a> {
    pub subject: &'a str,
    pub from: &'a str,
    pub date: &'a str,
    pub downloaded_at: NaiveDateTime,
}

impl AttachmentMetadata<'_> {
    pub fn render(&self, file_name: &str) -> String {
        format!(
            "Original Email Subject: {}\nFrom: {}\nDate: {}\nDownloaded: {}\nFile: {}\n",
            self.subject,
            self.from,
            self.date,
            self.downloaded_at.format("%Y-%m-%dT%H:%M:%S%.6f"),
            file_name
        )
    }

    /// Write the sidecar next to `file_path`.
    pub fn write_for(&self, file_path: &Path) -> Result<PathBuf, std::io::Error> {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let path = metadata_path(file_path);
        fs::write(&path, self.render(&file_name))?;
        Ok(path)
    }
}
