//! Totals shown on the summary sheet.

use std::collections::HashSet;

use crate::invoice::rules::format_currency;
use crate::models::invoice::InvoiceRecord;

/// Aggregate figures over the reported records.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    /// Number of records in the report.
    pub total_invoices: usize,
    /// Sum of all known invoice amounts.
    pub total_amount: f64,
    /// Number of distinct known vendor names.
    pub unique_vendors: usize,
}

impl ReportSummary {
    pub fn from_records(records: &[InvoiceRecord]) -> Self {
        let total_amount = records.iter().filter_map(|r| r.invoice_amount).sum();
        let unique_vendors = records
            .iter()
            .filter_map(|r| r.vendor_name.as_deref())
            .collect::<HashSet<_>>()
            .len();

        Self {
            total_invoices: records.len(),
            total_amount,
            unique_vendors,
        }
    }

    /// Total amount as dollars, e.g. "$1,234.56".
    pub fn formatted_total(&self) -> String {
        format_currency(self.total_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(vendor: Option<&str>, amount: Option<f64>) -> InvoiceRecord {
        let mut r = InvoiceRecord::empty("x.pdf");
        r.vendor_name = vendor.map(str::to_string);
        r.invoice_amount = amount;
        r
    }

    #[test]
    fn test_summary_skips_missing_values() {
        let records = vec![
            record(Some("Acme"), Some(1000.0)),
            record(Some("Acme"), Some(234.56)),
            record(Some("Globex"), None),
            record(None, Some(0.44)),
        ];
        let summary = ReportSummary::from_records(&records);

        assert_eq!(summary.total_invoices, 4);
        assert_eq!(summary.unique_vendors, 2);
        assert_eq!(summary.formatted_total(), "$1,235.00");
    }

    #[test]
    fn test_empty_summary() {
        let summary = ReportSummary::from_records(&[]);
        assert_eq!(summary.total_invoices, 0);
        assert_eq!(summary.formatted_total(), "$0.00");
    }
}
