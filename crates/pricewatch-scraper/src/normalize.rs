//! Currency-text normalization.
//!
//! Turns arbitrary price-looking text fragments (`"$1,234.56"`, `"£99.00"`,
//! `"1.234,56"`, `"was $199.99 now $149.99"`) into a canonical positive
//! [`Decimal`], or `None` when the fragment carries no usable price.

use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

/// Optional currency symbol, digits, then any number of separator+digits
/// groups — so `"$1,234.56"` is one candidate, not two.
fn candidate_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[$£€¥]?\s*\d+(?:[.,]\d+)*").expect("candidate pattern is valid")
    })
}

fn leading_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+\.?\d*").expect("number pattern is valid"))
}

/// Extracts a positive price from a text fragment.
///
/// The right-most price-looking candidate wins: in observed retailer markup
/// a strikethrough original price precedes the current/sale price. This is a
/// tuned heuristic, deliberately confined to this one function.
///
/// Values ≤ 0 are treated as not-found; placeholder markup like `$0.00`
/// must never become a price signal.
#[must_use]
pub fn parse_price_text(text: &str) -> Option<Decimal> {
    let candidate = candidate_re().find_iter(text.trim()).last()?;

    let cleaned: String = candidate
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = normalize_separators(&cleaned);
    let number = leading_number_re().find(&normalized)?;
    let price: Decimal = number.as_str().parse().ok()?;

    (price > Decimal::ZERO).then_some(price)
}

/// Resolves `,`/`.` ambiguity.
///
/// A comma with no period is a decimal point (`"99,00"` → 99.00). When both
/// appear, the separator occurring last is the decimal point and the other
/// is a thousands separator to drop — this handles `"$1,234.56"` and the
/// European `"1.234,56"` alike.
fn normalize_separators(s: &str) -> String {
    let last_comma = s.rfind(',');
    let last_dot = s.rfind('.');

    match (last_comma, last_dot) {
        (Some(_), None) => s.replace(',', "."),
        (Some(comma), Some(dot)) if comma > dot => {
            s.chars().filter(|c| *c != '.').collect::<String>().replace(',', ".")
        }
        (Some(_), Some(_)) => s.replace(',', ""),
        _ => s.to_owned(),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
