//! Dollar amount extraction.

use tracing::trace;

use super::patterns::{CURRENCY_AMOUNT, CURRENCY_SYMBOL};
use super::{ExtractionMatch, FieldExtractor};

/// Amount field extractor.
///
/// Looks at lines containing `$`, takes the last dollar amount on the line,
/// and returns the first line where that amount parses.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = f64;

    fn extract(&self, lines: &[&str]) -> Option<ExtractionMatch<f64>> {
        for (idx, line) in lines.iter().enumerate() {
            if !line.contains(CURRENCY_SYMBOL) {
                continue;
            }

            let Some(last) = CURRENCY_AMOUNT.captures_iter(line).last() else {
                continue;
            };

            match parse_currency_amount(&last[1]) {
                Some(amount) => return Some(ExtractionMatch::new(amount, idx)),
                None => {
                    trace!("Skipping unparseable amount {:?} on line {}", &last[0], idx);
                }
            }
        }

        None
    }
}

/// Parse a dollar amount such as "1,234.56" (without the `$`).
pub fn parse_currency_amount(s: &str) -> Option<f64> {
    s.replace(',', "").parse::<f64>().ok()
}

/// Format an amount as dollars with thousands separators ($1,234.56).
pub fn format_currency(amount: f64) -> String {
    let s = format!("{:.2}", amount.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("${}{}.{}", sign, formatted, decimal_part)
}
