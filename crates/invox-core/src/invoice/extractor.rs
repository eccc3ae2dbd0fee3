//! Rule-based invoice field extractor.

use std::time::Instant;

use tracing::debug;

use crate::models::invoice::InvoiceRecord;

use super::rules::{
    AmountExtractor, FieldExtractor, LabeledFieldExtractor, PaymentStatusExtractor,
    VendorExtractor, DUE_DATE_LABEL, INVOICE_DATE_LABEL, INVOICE_NUMBER_LABEL,
};

/// Result of extracting one document, with diagnostics.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: InvoiceRecord,
    /// Fields no rule matched.
    pub missing_fields: Vec<&'static str>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Turns document text into an [`InvoiceRecord`].
///
/// The extractor holds no per-document state, so one instance can be shared
/// between threads and reused for any number of documents.
pub struct InvoiceFieldExtractor {
    invoice_number: LabeledFieldExtractor,
    vendor: VendorExtractor,
    invoice_date: LabeledFieldExtractor,
    amount: AmountExtractor,
    due_date: LabeledFieldExtractor,
    payment_status: PaymentStatusExtractor,
}

impl InvoiceFieldExtractor {
    pub fn new() -> Self {
        Self {
            invoice_number: LabeledFieldExtractor::new(INVOICE_NUMBER_LABEL),
            vendor: VendorExtractor::new(),
            invoice_date: LabeledFieldExtractor::new(INVOICE_DATE_LABEL),
            amount: AmountExtractor::new(),
            due_date: LabeledFieldExtractor::new(DUE_DATE_LABEL),
            payment_status: PaymentStatusExtractor::new(),
        }
    }

    /// Extract a record from the full text of a document.
    ///
    /// Never fails: fields without a qualifying line are `None`.
    pub fn extract(&self, text: &str, source_file: &str) -> InvoiceRecord {
        let lines: Vec<&str> = text.split('\n').collect();
        self.extract_lines(&lines, source_file)
    }

    /// Extract a record from pre-split lines.
    pub fn extract_lines(&self, lines: &[&str], source_file: &str) -> InvoiceRecord {
        let record = InvoiceRecord {
            invoice_number: labeled_value(&self.invoice_number, lines),
            vendor_name: self.vendor.extract(lines).map(|m| m.value),
            invoice_date: labeled_value(&self.invoice_date, lines),
            invoice_amount: self.amount.extract(lines).map(|m| m.value),
            due_date: labeled_value(&self.due_date, lines),
            payment_status: self.payment_status.extract(lines).map(|m| m.value),
            source_file: source_file.to_string(),
        };

        debug!(
            "Extracted {}: invoice={:?}, vendor={:?}, date={:?}, amount={:?}, due={:?}, status={:?}",
            record.source_file,
            record.invoice_number,
            record.vendor_name,
            record.invoice_date,
            record.invoice_amount,
            record.due_date,
            record.payment_status
        );

        record
    }

    /// Extract a record and report which fields were not found.
    pub fn parse(&self, text: &str, source_file: &str) -> ExtractionResult {
        let start = Instant::now();
        let record = self.extract(text, source_file);
        let missing_fields = record.missing_fields();

        ExtractionResult {
            record,
            missing_fields,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl Default for InvoiceFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Value of the first labeled line, `None` when absent or blank.
fn labeled_value(rule: &LabeledFieldExtractor, lines: &[&str]) -> Option<String> {
    rule.extract(lines)
        .map(|m| m.value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoice::PaymentStatus;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "INVOICE\n\
        Northwind Traders\n\
        123 Harbor Road, Seattle WA\n\
        Invoice Number: INV-2024-001\n\
        Invoice Date: 2024-01-15\n\
        Due Date: 2024-02-14\n\
        Description        Qty   Unit Price   Amount\n\
        Consulting          10     $150.00   $1,500.00\n\
        Total Due: $1,500.00\n\
        Payment Status: UNPAID\n";

    #[test]
    fn test_extract_full_invoice() {
        let record = InvoiceFieldExtractor::new().extract(SAMPLE, "northwind.pdf");

        assert_eq!(
            record,
            InvoiceRecord {
                invoice_number: Some("INV-2024-001".to_string()),
                vendor_name: Some("Northwind Traders".to_string()),
                invoice_date: Some("2024-01-15".to_string()),
                invoice_amount: Some(1500.0),
                due_date: Some("2024-02-14".to_string()),
                payment_status: Some(PaymentStatus::Unpaid),
                source_file: "northwind.pdf".to_string(),
            }
        );
    }

    #[test]
    fn test_invoice_number() {
        let record =
            InvoiceFieldExtractor::new().extract("Invoice Number: INV-2024-001", "a.pdf");
        assert_eq!(record.invoice_number.as_deref(), Some("INV-2024-001"));
    }

    #[test]
    fn test_amount_skips_bad_line() {
        let text = "Total Due: $abc\nBalance: $75.25";
        let record = InvoiceFieldExtractor::new().extract(text, "a.pdf");
        assert_eq!(record.invoice_amount, Some(75.25));
    }

    #[test]
    fn test_paid_in_full() {
        let record =
            InvoiceFieldExtractor::new().extract("Payment Status: Paid in full", "a.pdf");
        assert_eq!(record.payment_status, Some(PaymentStatus::Paid));
    }

    #[test]
    fn test_unlabeled_text_gives_nulls() {
        let text = "INVOICE\nThank you\nTotal 120 EUR";
        let record = InvoiceFieldExtractor::new().extract(text, "plain.pdf");

        assert_eq!(record.invoice_number, None);
        assert_eq!(record.invoice_date, None);
        assert_eq!(record.due_date, None);
        assert_eq!(record.invoice_amount, None);
        assert_eq!(record.payment_status, None);
        assert_eq!(record.vendor_name.as_deref(), Some("Thank you"));
        assert_eq!(record.source_file, "plain.pdf");
    }

    #[test]
    fn test_empty_text() {
        let record = InvoiceFieldExtractor::new().extract("", "empty.pdf");
        assert_eq!(record, InvoiceRecord::empty("empty.pdf"));
        assert!(!record.is_reportable());
    }

    #[test]
    fn test_blank_label_value_is_none() {
        let text = "Invoice Number:\nInvoice Number: INV-5";
        let record = InvoiceFieldExtractor::new().extract(text, "a.pdf");
        assert_eq!(record.invoice_number, None);
    }

    #[test]
    fn test_crlf_text() {
        let text = "Acme Supplies\r\nInvoice Date: 03/04/2024\r\nTotal: $10.00\r\n";
        let record = InvoiceFieldExtractor::new().extract(text, "a.pdf");

        assert_eq!(record.vendor_name.as_deref(), Some("Acme Supplies"));
        assert_eq!(record.invoice_date.as_deref(), Some("03/04/2024"));
        assert_eq!(record.invoice_amount, Some(10.0));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = InvoiceFieldExtractor::new();
        let first = extractor.extract(SAMPLE, "x.pdf");
        let second = extractor.extract(SAMPLE, "x.pdf");
        assert_eq!(first, second);
    }

    #[test]
    fn test_odd_input_never_fails() {
        let extractor = InvoiceFieldExtractor::new();
        let inputs = [
            "\n\n\n",
            "$$$$",
            "$,,,.\n$.",
            ":::::",
            "Invoice Number:Invoice Date:Due Date:Payment Status:",
            "\u{feff}Żółć Sp. z o.o.\n$١٢٣",
            "$99999999999999999999999999999999999999999",
        ];

        for input in inputs {
            let record = extractor.extract(input, "odd.pdf");
            assert_eq!(record.source_file, "odd.pdf");
        }
    }

    #[test]
    fn test_parse_reports_missing_fields() {
        let result = InvoiceFieldExtractor::new().parse("Invoice Number: 42", "a.pdf");
        assert_eq!(
            result.missing_fields,
            vec!["vendor_name", "invoice_date", "invoice_amount", "due_date", "payment_status"]
        );
    }
}
