//! Fallback selector lists shared by every adapter.
//!
//! Ordered most-specific first; every site adapter appends these after its
//! own rules.

use super::{AttrRule, TextRule};

pub(super) const PRICE: &[&str] = &[
    ".price",
    ".product-price",
    "[itemprop=\"price\"]",
    ".price-current",
    "[data-price]",
];

pub(super) const NAME: &[TextRule] = &[
    ("h1", None),
    ("meta[property=\"og:title\"]", Some("content")),
    ("title", None),
];

pub(super) const IMAGE: &[AttrRule] = &[
    ("meta[property=\"og:image\"]", "content"),
    ("meta[name=\"twitter:image\"]", "content"),
    ("img[itemprop=\"image\"]", "src"),
];
