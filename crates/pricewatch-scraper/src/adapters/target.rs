//! Target-specific extraction rules.

use super::{AttrRule, TextRule};

pub(super) const PRICE: &[&str] = &[
    "[data-test=\"product-price\"]",
    "[data-test=\"product-price-value\"]",
    "span[data-test=\"product-price\"]",
    ".h-text-bs",
    "[data-test=\"currentPrice\"]",
];

pub(super) const NAME: &[TextRule] = &[("[data-test=\"product-title\"]", None), ("h1", None)];

pub(super) const IMAGE: &[AttrRule] = &[
    ("[data-test=\"product-image\"]", "src"),
    ("img[alt*=\"product\"]", "src"),
];
