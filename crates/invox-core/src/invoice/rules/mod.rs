//! Line-based field rules for invoice text.
//!
//! Every rule scans the lines top to bottom and stops at its first
//! qualifying line. Rules are independent of each other.

pub mod amounts;
pub mod labels;
pub mod patterns;
pub mod status;
pub mod vendor;

pub use amounts::{format_currency, parse_currency_amount, AmountExtractor};
pub use labels::{value_after_colon, LabeledFieldExtractor};
pub use patterns::*;
pub use status::PaymentStatusExtractor;
pub use vendor::VendorExtractor;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from the document lines.
    fn extract(&self, lines: &[&str]) -> Option<ExtractionMatch<Self::Output>>;
}

/// A field value together with the index of the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Zero-based index of the source line.
    pub line: usize,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, line: usize) -> Self {
        Self { value, line }
    }

    /// Transform the value, keeping the source location.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExtractionMatch<U> {
        ExtractionMatch {
            value: f(self.value),
            line: self.line,
        }
    }
}
