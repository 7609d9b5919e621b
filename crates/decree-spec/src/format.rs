//! Shared value formatting used by label templating and document transforms.
//!
//! Both the questionnaire side (interpolated labels) and the document side
//! (mapping transforms, composed prose) must render money and dates the same
//! way, so the primitives live here once.

use chrono::NaiveDate;

/// Two-decimal, `$`-prefixed rendering. Total: non-finite input renders as
/// `$0.00`, negatives as `-$12.34`.
pub fn currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0.00".to_string();
    }
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${:.2}", amount)
    }
}

/// Currency rendering over an optional amount; missing means zero dollars.
pub fn currency_opt(amount: Option<f64>) -> String {
    currency(amount.unwrap_or(0.0))
}

/// `2024-03-18` → `March 18, 2024`. `None` when the input does not parse,
/// leaving the caller to pass the original text through unchanged.
pub fn long_date(iso: &str) -> Option<String> {
    NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%B %-d, %Y").to_string())
}
