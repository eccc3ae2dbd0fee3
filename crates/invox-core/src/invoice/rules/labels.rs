//! Extraction of `Label: value` lines.

use super::{ExtractionMatch, FieldExtractor};

/// Takes the value of the first line containing a fixed label.
///
/// The value is everything after the line's first colon, trimmed. It may be
/// empty; callers decide how to treat that.
#[derive(Debug, Clone, Copy)]
pub struct LabeledFieldExtractor {
    label: &'static str,
}

impl LabeledFieldExtractor {
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl FieldExtractor for LabeledFieldExtractor {
    type Output = String;

    fn extract(&self, lines: &[&str]) -> Option<ExtractionMatch<String>> {
        lines.iter().enumerate().find_map(|(idx, line)| {
            if !line.contains(self.label) {
                return None;
            }
            let value = value_after_colon(line)?;
            Some(ExtractionMatch::new(value.to_string(), idx))
        })
    }
}

/// Text after the first colon, trimmed.
pub fn value_after_colon(line: &str) -> Option<&str> {
    line.split_once(':').map(|(_, rest)| rest.trim())
}
