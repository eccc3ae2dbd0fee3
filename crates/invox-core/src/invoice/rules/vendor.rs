//! Vendor name heuristic: the first line of real text that is not boilerplate.

use super::patterns::{VENDOR_MIN_CHARS, VENDOR_STOPLIST};
use super::{ExtractionMatch, FieldExtractor};

/// Vendor name extractor.
pub struct VendorExtractor;

impl VendorExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Whether a trimmed line can be taken as the vendor name.
    pub fn is_candidate(line: &str) -> bool {
        if line.is_empty() || line.chars().count() <= VENDOR_MIN_CHARS {
            return false;
        }
        let lower = line.to_lowercase();
        !VENDOR_STOPLIST.iter().any(|word| lower.contains(word))
    }
}

impl Default for VendorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for VendorExtractor {
    type Output = String;

    fn extract(&self, lines: &[&str]) -> Option<ExtractionMatch<String>> {
        lines.iter().enumerate().find_map(|(idx, line)| {
            let trimmed = line.trim();
            Self::is_candidate(trimmed)
                .then(|| ExtractionMatch::new(trimmed.to_string(), idx))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_skips_boilerplate_lines() {
        let lines = [
            "",
            "INVOICE",
            "Bill To: Jane Doe",
            "Phone: 555-0100",
            "   Northwind Traders   ",
            "Contoso Ltd",
        ];
        let found = VendorExtractor::new().extract(&lines).unwrap();

        assert_eq!(found.value, "Northwind Traders");
        assert_eq!(found.line, 4);
    }

    #[test]
    fn test_short_lines_are_skipped() {
        let lines = ["ABC", "  abc  ", "Acme"];
        let found = VendorExtractor::new().extract(&lines).unwrap();
        assert_eq!(found.value, "Acme");
    }

    #[test]
    fn test_stoplist_matches_inside_words() {
        // "unit" inside "Community", "form" inside "Platform"
        assert!(!VendorExtractor::is_candidate("Community Health"));
        assert!(!VendorExtractor::is_candidate("Platform Services"));
        assert!(!VendorExtractor::is_candidate("Payable within 30 days"));
        assert!(VendorExtractor::is_candidate("Globex Corporation"));
    }

    #[test]
    fn test_labeled_lines_can_be_vendor() {
        // Only the stoplist filters lines; a colon alone does not
        let lines = ["Payment Status: Paid"];
        let found = VendorExtractor::new().extract(&lines).unwrap();
        assert_eq!(found.value, "Payment Status: Paid");
    }

    #[test]
    fn test_stoplist_contents() {
        assert_eq!(
            VENDOR_STOPLIST,
            [
                "invoice",
                "bill",
                "date",
                "phone",
                "email",
                "address",
                "description",
                "qty",
                "unit",
                "total",
                "please",
                "share",
                "form",
                "within",
                "hours",
                "recent",
                "infusion",
            ]
        );
    }

    #[test]
    fn test_every_stopword_rejects_line_in_any_case() {
        for word in VENDOR_STOPLIST {
            let upper = word.to_uppercase();
            let mut title = word[..1].to_uppercase();
            title.push_str(&word[1..]);

            for variant in [word.to_string(), upper, title] {
                let line = format!("Acme {} Co", variant);
                assert!(
                    !VendorExtractor::is_candidate(&line),
                    "{:?} should be rejected",
                    line
                );
            }
        }
        assert!(VendorExtractor::is_candidate("Acme Co"));
    }

    #[test]
    fn test_no_candidate() {
        let lines = ["Invoice", "Total", "qty"];
        assert!(VendorExtractor::new().extract(&lines).is_none());
    }
}
