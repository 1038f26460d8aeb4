use super::*;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn plain_dollar_price() {
    assert_eq!(parse_price_text("$19.99"), Some(dec("19.99")));
}

#[test]
fn us_thousands_format() {
    assert_eq!(parse_price_text("$1,234.56"), Some(dec("1234.56")));
}

#[test]
fn european_format() {
    assert_eq!(parse_price_text("1.234,56"), Some(dec("1234.56")));
}

#[test]
fn comma_as_decimal_point() {
    assert_eq!(parse_price_text("£99,00"), Some(dec("99.00")));
}

#[test]
fn pound_sterling() {
    assert_eq!(parse_price_text("£99.00"), Some(dec("99.00")));
}

#[test]
fn symbol_with_whitespace() {
    assert_eq!(parse_price_text("€ 45.50"), Some(dec("45.50")));
}

#[test]
fn last_match_wins_for_sale_markup() {
    assert_eq!(
        parse_price_text("was $199.99 now $149.99"),
        Some(dec("149.99"))
    );
}

#[test]
fn zero_price_is_not_found() {
    assert_eq!(parse_price_text("$0.00"), None);
}

#[test]
fn no_digits_is_not_found() {
    assert_eq!(parse_price_text("Currently unavailable"), None);
    assert_eq!(parse_price_text(""), None);
}

#[test]
fn bare_integer() {
    assert_eq!(parse_price_text("1299"), Some(dec("1299")));
}

#[test]
fn surrounding_text_is_ignored() {
    assert_eq!(
        parse_price_text("  Price:\n  $24.99 (free shipping)  "),
        Some(dec("24.99"))
    );
}

#[test]
fn large_us_price_with_multiple_groups() {
    assert_eq!(parse_price_text("$1,234,567.89"), Some(dec("1234567.89")));
}

#[test]
fn large_european_price_with_multiple_groups() {
    assert_eq!(parse_price_text("1.234.567,89"), Some(dec("1234567.89")));
}

#[test]
fn yen_without_decimals() {
    assert_eq!(parse_price_text("¥2500"), Some(dec("2500")));
}
