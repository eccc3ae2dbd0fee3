//! Payment status extraction.

use super::labels::LabeledFieldExtractor;
use super::patterns::PAYMENT_STATUS_LABEL;
use super::{ExtractionMatch, FieldExtractor};
use crate::models::invoice::PaymentStatus;

/// Payment status extractor.
///
/// A `Payment Status:` line with nothing after the colon yields no status.
pub struct PaymentStatusExtractor {
    labeled: LabeledFieldExtractor,
}

impl PaymentStatusExtractor {
    pub fn new() -> Self {
        Self {
            labeled: LabeledFieldExtractor::new(PAYMENT_STATUS_LABEL),
        }
    }
}

impl Default for PaymentStatusExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PaymentStatusExtractor {
    type Output = PaymentStatus;

    fn extract(&self, lines: &[&str]) -> Option<ExtractionMatch<PaymentStatus>> {
        self.labeled
            .extract(lines)
            .filter(|m| !m.value.is_empty())
            .map(|m| m.map(|raw| PaymentStatus::from_raw(&raw)))
    }
}
