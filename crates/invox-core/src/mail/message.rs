//! Parsing of RFC 822 messages into subject, sender, date and attachments.

use std::path::Path;

use mailparse::{parse_mail, MailHeaderMap, ParsedMail};
use tracing::warn;

use crate::error::MailError;

/// A named attachment with its decoded content.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub data: Vec<u8>,
}

impl Attachment {
    /// Lowercased extension with leading dot, empty when there is none.
    pub fn extension(&self) -> String {
        Path::new(&self.filename)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default()
    }

    /// File name without directories or extension.
    pub fn stem(&self) -> String {
        Path::new(&self.filename)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Headers and attachments of one message.
#[derive(Debug, Clone)]
pub struct MailMessage {
    pub subject: Option<String>,
    pub from: Option<String>,
    pub date: Option<String>,
    /// `Date` header as a Unix timestamp, when it parses.
    pub sent_at: Option<i64>,
    pub attachments: Vec<Attachment>,
}

impl MailMessage {
    /// Parse raw message bytes. `origin` is only used in error messages.
    pub fn parse(raw: &[u8], origin: &str) -> Result<Self, MailError> {
        let mail = parse_mail(raw).map_err(|e| MailError::Parse {
            path: origin.to_string(),
            reason: e.to_string(),
        })?;

        let date = mail.headers.get_first_value("Date");
        let sent_at = date
            .as_deref()
            .and_then(|d| mailparse::dateparse(d).ok());

        let mut leaves = Vec::new();
        collect_leaves(&mail, &mut leaves);

        let mut attachments = Vec::new();
        for part in leaves {
            let Some(filename) = attachment_name(part) else {
                continue;
            };
            match part.get_body_raw() {
                Ok(data) => attachments.push(Attachment { filename, data }),
                Err(e) => warn!("Could not decode attachment {} in {}: {}", filename, origin, e),
            }
        }

        Ok(Self {
            subject: mail.headers.get_first_value("Subject"),
            from: mail.headers.get_first_value("From"),
            date,
            sent_at,
            attachments,
        })
    }
}

/// Non-multipart parts, depth first.
fn collect_leaves<'a>(part: &'a ParsedMail<'a>, out: &mut Vec<&'a ParsedMail<'a>>) {
    if part.ctype.mimetype.starts_with("multipart/") {
        for sub in &part.subparts {
            collect_leaves(sub, out);
        }
    } else {
        out.push(part);
    }
}

/// Disposition `filename`, falling back to the content-type `name`.
fn attachment_name(part: &ParsedMail<'_>) -> Option<String> {
    part.get_content_disposition()
        .params
        .get("filename")
        .or_else(|| part.ctype.params.get("name"))
        .filter(|name| !name.is_empty())
        .cloned()
}
