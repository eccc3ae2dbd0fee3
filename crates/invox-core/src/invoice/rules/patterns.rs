//! Labels, patterns and word lists used by the field rules.

use lazy_static::lazy_static;
use regex::Regex;

/// Label of the invoice number line.
pub const INVOICE_NUMBER_LABEL: &str = "Invoice Number:";

/// Label of the invoice date line.
pub const INVOICE_DATE_LABEL: &str = "Invoice Date:";

/// Label of the due date line.
pub const DUE_DATE_LABEL: &str = "Due Date:";

/// Label of the payment status line.
pub const PAYMENT_STATUS_LABEL: &str = "Payment Status:";

/// Marker a line must contain before amounts are looked for.
pub const CURRENCY_SYMBOL: char = '$';

/// Generic words that disqualify a line as the vendor name.
///
/// Membership and order are part of the output contract.
pub const VENDOR_STOPLIST: [&str; 17] = [
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
];

/// Vendor candidates must be longer than this many characters.
pub const VENDOR_MIN_CHARS: usize = 3;

lazy_static! {
    // Dollar amount with optional thousands separators and decimals: $1,234.56
    // ASCII digits only
    pub static ref CURRENCY_AMOUNT: Regex = Regex::new(
        r"\$([0-9,]+\.?[0-9]*)"
    ).unwrap();
}
