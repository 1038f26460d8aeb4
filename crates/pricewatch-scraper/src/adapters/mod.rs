//! Per-retailer extraction strategies.
//!
//! An adapter locates price, name, and image in a parsed document by trying
//! an ordered selector list and taking the first non-empty hit. Site-specific
//! adapters prefix their own rules onto the generic list — they extend the
//! fallback tail, never replace it — so a site adapter whose specialized
//! selectors all miss still degrades to the generic extraction.

mod amazon;
mod generic;
mod target;

use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};

use crate::normalize::parse_price_text;

/// Which retailer family a hostname routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    Amazon,
    Target,
    Generic,
}

/// A name/image rule: CSS selector plus an optional attribute to read
/// instead of the element's text.
type TextRule = (&'static str, Option<&'static str>);

/// An image rule always reads an attribute.
type AttrRule = (&'static str, &'static str);

/// Extraction strategy for one retailer family: composed selector lists,
/// site-specific rules first, generic tail last.
#[derive(Debug)]
pub struct SiteAdapter {
    site: Site,
    price_rules: Vec<&'static str>,
    name_rules: Vec<TextRule>,
    image_rules: Vec<AttrRule>,
}

impl SiteAdapter {
    /// Routes a hostname to its adapter. Matching is substring-based on the
    /// marketplace domain, so `smile.amazon.co.uk` and `www.amazon.com` both
    /// route to Amazon. Unrecognized hosts get the generic adapter.
    #[must_use]
    pub fn for_host(host: &str) -> Self {
        let host = host.to_ascii_lowercase();
        if host.contains("amazon.") {
            Self::compose(Site::Amazon, amazon::PRICE, amazon::NAME, amazon::IMAGE)
        } else if host.contains("target.") {
            Self::compose(Site::Target, target::PRICE, target::NAME, target::IMAGE)
        } else {
            Self::compose(Site::Generic, &[], &[], &[])
        }
    }

    fn compose(
        site: Site,
        price: &[&'static str],
        name: &[TextRule],
        image: &[AttrRule],
    ) -> Self {
        Self {
            site,
            price_rules: [price, generic::PRICE].concat(),
            name_rules: [name, generic::NAME].concat(),
            image_rules: [image, generic::IMAGE].concat(),
        }
    }

    #[must_use]
    pub fn site(&self) -> Site {
        self.site
    }

    /// First price any rule locates, normalized to a positive decimal.
    ///
    /// Amazon pages are tried against the split whole+fraction extraction
    /// before the selector list; everything else goes straight to the list.
    /// A rule whose element carries a `data-price` attribute is read from
    /// that attribute rather than the element text.
    #[must_use]
    pub fn extract_price(&self, doc: &Html) -> Option<Decimal> {
        if self.site == Site::Amazon {
            if let Some(price) = amazon::split_price(doc) {
                return Some(price);
            }
        }

        self.price_rules
            .iter()
            .find_map(|selector| try_price_rule(doc, selector))
    }

    /// First non-empty product name any rule locates.
    #[must_use]
    pub fn extract_name(&self, doc: &Html) -> Option<String> {
        self.name_rules.iter().find_map(|(selector, attr)| {
            let element = select_first(doc, selector)?;
            let value = match attr {
                Some(attr) => element.value().attr(attr)?.to_owned(),
                None => element.text().collect::<String>(),
            };
            non_empty(value)
        })
    }

    /// First non-empty image URL any rule locates.
    #[must_use]
    pub fn extract_image(&self, doc: &Html) -> Option<String> {
        self.image_rules.iter().find_map(|(selector, attr)| {
            let element = select_first(doc, selector)?;
            non_empty(element.value().attr(attr)?.to_owned())
        })
    }
}

fn select_first<'a>(doc: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let parsed = Selector::parse(selector).ok()?;
    doc.select(&parsed).next()
}

fn try_price_rule(doc: &Html, selector: &str) -> Option<Decimal> {
    let element = select_first(doc, selector)?;
    if let Some(raw) = element.value().attr("data-price") {
        return parse_price_text(raw);
    }
    parse_price_text(&element.text().collect::<String>())
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
#[path = "adapters_test.rs"]
mod tests;
