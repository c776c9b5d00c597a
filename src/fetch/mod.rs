// src/fetch/mod.rs
// =============================================================================
// Turning a URL into the list of URLs it links to.
//
// The scheduler only talks to the Fetcher trait. The default implementation,
// HttpFetcher, does a GET with reqwest and hands the body to a Picker, which
// pulls candidate links out of the HTML.
//
// Submodules:
// - http:   the reqwest-backed fetcher
// - picker: link extraction with scraper
// =============================================================================

mod http;
mod picker;

use async_trait::async_trait;
use url::Url;

use crate::error::CrawlError;

pub use http::{HttpFetcher, DEFAULT_TIMEOUT};
pub use picker::{AttrPicker, Picker};

/// Fetches one page and returns the absolute URLs it links to, in page order.
///
/// Implementations are shared across every crawl task, so they must be
/// Send + Sync. An error fails only the page being fetched.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Vec<Url>, CrawlError>;
}
