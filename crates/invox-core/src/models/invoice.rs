//! Invoice record model produced by field extraction.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Column names in field declaration order.
pub const RECORD_COLUMNS: [&str; 7] = [
    "invoice_number",
    "vendor_name",
    "invoice_date",
    "invoice_amount",
    "due_date",
    "payment_status",
    "source_file",
];

/// Structured fields extracted from one source document.
///
/// Every field except `source_file` is optional: `None` means the rule for
/// that field found no qualifying line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Value of the first `Invoice Number:` line.
    pub invoice_number: Option<String>,

    /// First line of real text that is not boilerplate.
    pub vendor_name: Option<String>,

    /// Raw value of the first `Invoice Date:` line.
    pub invoice_date: Option<String>,

    /// Last currency amount on the first line that yields one.
    pub invoice_amount: Option<f64>,

    /// Raw value of the first `Due Date:` line.
    pub due_date: Option<String>,

    /// Normalized value of the first `Payment Status:` line.
    pub payment_status: Option<PaymentStatus>,

    /// File name of the originating document.
    pub source_file: String,
}

impl InvoiceRecord {
    /// Record with every field empty, tagged with its source file.
    pub fn empty(source_file: impl Into<String>) -> Self {
        Self {
            invoice_number: None,
            vendor_name: None,
            invoice_date: None,
            invoice_amount: None,
            due_date: None,
            payment_status: None,
            source_file: source_file.into(),
        }
    }

    /// Whether the record carries enough data to appear in a report.
    ///
    /// A record with no invoice number, no amount and no vendor is dropped.
    pub fn is_reportable(&self) -> bool {
        self.invoice_number.is_some() || self.invoice_amount.is_some() || self.vendor_name.is_some()
    }

    /// Names of the extracted fields that are missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let present = [
            self.invoice_number.is_some(),
            self.vendor_name.is_some(),
            self.invoice_date.is_some(),
            self.invoice_amount.is_some(),
            self.due_date.is_some(),
            self.payment_status.is_some(),
        ];

        RECORD_COLUMNS
            .iter()
            .zip(present)
            .filter(|(_, found)| !found)
            .map(|(name, _)| *name)
            .collect()
    }

    /// Cell values in column order, `None` for blank cells.
    pub fn to_row(&self) -> [Option<String>; 7] {
        [
            self.invoice_number.clone(),
            self.vendor_name.clone(),
            self.invoice_date.clone(),
            self.invoice_amount.map(|a| a.to_string()),
            self.due_date.clone(),
            self.payment_status.as_ref().map(|s| s.to_string()),
            Some(self.source_file.clone()),
        ]
    }
}

/// Payment status as printed on the invoice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    /// Any other wording, kept verbatim.
    Other(String),
}

impl PaymentStatus {
    /// Normalize a raw status value.
    ///
    /// "unpaid" is checked before "paid" since the former contains the latter.
    pub fn from_raw(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if lower.contains("unpaid") {
            Self::Unpaid
        } else if lower.contains("paid") {
            Self::Paid
        } else {
            Self::Other(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Paid => "Paid",
            Self::Unpaid => "Unpaid",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for PaymentStatus {
    fn from(raw: String) -> Self {
        Self::from_raw(&raw)
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        status.as_str().to_string()
    }
}
