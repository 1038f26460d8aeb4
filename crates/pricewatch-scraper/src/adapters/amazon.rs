//! Amazon-specific extraction rules.

use rust_decimal::Decimal;
use scraper::Html;

use super::{select_first, AttrRule, TextRule};
use crate::normalize::parse_price_text;

pub(super) const PRICE: &[&str] = &[
    ".a-price .a-offscreen",
    "#priceblock_ourprice",
    "#priceblock_dealprice",
    "[data-a-color=\"price\"] .a-offscreen",
    "#corePriceDisplay_desktop_feature_div .a-offscreen",
    "#tp_price_block_total_price_ww",
];

pub(super) const NAME: &[TextRule] = &[("#productTitle", None), ("h1.product-title", None)];

pub(super) const IMAGE: &[AttrRule] = &[
    ("#landingImage", "src"),
    (".a-dynamic-image", "src"),
    ("[data-old-hires]", "data-old-hires"),
];

/// Amazon often renders the price as separate whole and fraction nodes
/// (`.a-price-whole` = "1,234" with the decimal point in a pseudo element,
/// `.a-price-fraction` = "56"). Rejoin the parts and normalize; if either
/// node is missing, fall through to the selector list.
pub(super) fn split_price(doc: &Html) -> Option<Decimal> {
    let whole = select_first(doc, ".a-price-whole")?
        .text()
        .collect::<String>();
    let fraction = select_first(doc, ".a-price-fraction")?
        .text()
        .collect::<String>();

    let whole = whole.trim().trim_end_matches('.').replace(',', "");
    let combined = format!("{whole}.{}", fraction.trim());
    parse_price_text(&combined)
}
