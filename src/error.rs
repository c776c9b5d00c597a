// src/error.rs
// =============================================================================
// Every error the crawler library can produce.
//
// Two families live here:
// - Construction errors (bad seed URL, HTTP client or selector that can't be
//   built). These are returned from Crawler::new and the crawl never starts.
// - Fetch errors (transport failure, bad status, unreadable body). These are
//   scoped to a single page: they are handed to the caller's on_error callback
//   and only that branch of the crawl stops.
//
// Filter rejections are not errors at all.
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// The seed URL did not parse as an absolute URL
    #[error("invalid seed url '{url}': {source}")]
    InvalidSeed {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The default HTTP client could not be built
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// A link picker was configured with a selector scraper can't parse
    #[error("invalid link selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    /// The request never produced a response (DNS, connect, timeout, ...)
    #[error("request to {url} failed: {source}")]
    Request {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: Url, status: StatusCode },

    /// The response arrived but its body could not be read
    #[error("failed to read body of {url}: {source}")]
    Body {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
}

impl CrawlError {
    /// The page this error belongs to, if it came from a fetch
    pub fn url(&self) -> Option<&Url> {
        match self {
            CrawlError::Request { url, .. }
            | CrawlError::Status { url, .. }
            | CrawlError::Body { url, .. } => Some(url),
            _ => None,
        }
    }

    /// True for errors raised while a crawl is running (as opposed to while
    /// building the crawler)
    pub fn is_fetch_error(&self) -> bool {
        self.url().is_some()
    }
}
