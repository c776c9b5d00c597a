// src/fetch/picker.rs
// =============================================================================
// Extracts candidate links from an HTML page.
//
// We use the `scraper` crate which parses HTML into a DOM and lets us query it
// with CSS selectors. The default picker looks at the `href` of every `<a>`
// element, but any tag/attribute pair works (e.g. `img`/`src`).
//
// Every value is resolved against the URL of the page it came from, so
// relative links like `/docs` or `../about` come out absolute.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

use crate::error::CrawlError;

/// A link-extraction strategy: page body in, absolute URLs out.
pub trait Picker: Send + Sync {
    fn pick(&self, base: &Url, body: &str) -> Vec<Url>;
}

// Picks the value of one attribute on one kind of element
//
// Example:
//   AttrPicker::new("a", "href")  -> every <a href="...">
//   AttrPicker::new("img", "src") -> every <img src="...">
#[derive(Debug, Clone)]
pub struct AttrPicker {
    attr: String,
    selector: Selector,
}

impl AttrPicker {
    pub fn new(tag: &str, attr: &str) -> Result<Self, CrawlError> {
        let css = format!("{}[{}]", tag, attr);
        let selector = Selector::parse(&css).map_err(|e| CrawlError::Selector {
            selector: css.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            attr: attr.to_string(),
            selector,
        })
    }

    /// The default picker: `href` on anchor elements
    pub fn anchors() -> Self {
        // "a[href]" is a constant, known-valid selector
        Self {
            attr: "href".to_string(),
            selector: Selector::parse("a[href]").expect("a[href] is a valid selector"),
        }
    }
}

impl Default for AttrPicker {
    fn default() -> Self {
        Self::anchors()
    }
}

impl Picker for AttrPicker {
    fn pick(&self, base: &Url, body: &str) -> Vec<Url> {
        let document = Html::parse_document(body);

        document
            .select(&self.selector)
            .filter_map(|element| element.value().attr(&self.attr))
            .filter_map(|value| resolve(base, value))
            .collect()
    }
}

// Resolves a possibly-relative link against the page it was found on
//
// Skips values that can't lead anywhere new:
//   ""        -> the page itself
//   "#top"    -> a spot on the page itself
//
// Anything with its own scheme (mailto:, javascript:, ftp://...) is returned
// as-is; whether to keep it is a job for the filters.
fn resolve(base: &Url, value: &str) -> Option<Url> {
    let value = value.trim();
    if value.is_empty() || value.starts_with('#') {
        return None;
    }

    base.join(value).ok()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does Url::join do?
//    - Resolves a link the way a browser does
//    - "https://example.com/page/" + "../about" = "https://example.com/about"
//    - An absolute link ("https://other.com") replaces the base entirely
//
// 2. Why parse the selector once in new()?
//    - Selector::parse does real work; a crawl may pick links from
//      thousands of pages with the same selector
// -----------------------------------------------------------------------------
