// src/crawl/config.rs
// =============================================================================
// Everything a Crawler is built from.
//
// Only the seed URL is required. Every other field falls back to a default
// when left unset:
//
//   limit   -> 10 URLs (0 also means "use the default")
//   timeout -> 10 seconds, only used when no client or fetcher is given
//   client  -> a fresh reqwest client with `timeout`
//   fetcher -> HttpFetcher over `client` with the <a href> picker
//   filters -> http(s) + unique
//   scopes  -> http(s) + unique + same host as the seed
//
// Example:
//   let config = Config::new("https://example.com/")
//       .with_limit(50)
//       .with_timeout(Duration::from_secs(5));
// =============================================================================

use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::fetch::{Fetcher, DEFAULT_TIMEOUT};
use crate::filter::FilterChain;

/// Number of URLs reported when no limit is configured
pub const DEFAULT_LIMIT: usize = 10;

#[derive(Clone)]
pub struct Config {
    pub url: String,
    pub limit: usize,
    pub timeout: Duration,
    pub client: Option<Client>,
    pub fetcher: Option<Arc<dyn Fetcher>>,
    pub filters: Option<FilterChain>,
    pub scopes: Option<FilterChain>,
}

impl Config {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            limit: DEFAULT_LIMIT,
            timeout: DEFAULT_TIMEOUT,
            client: None,
            fetcher: None,
            filters: None,
            scopes: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// HTTP client for the default fetcher. Ignored if a fetcher is set.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn with_fetcher<F: Fetcher + 'static>(mut self, fetcher: F) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Replaces the report chain
    pub fn with_filters(mut self, filters: FilterChain) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Replaces the scope chain
    pub fn with_scopes(mut self, scopes: FilterChain) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// The limit actually used: 0 falls back to the default
    pub fn effective_limit(&self) -> usize {
        if self.limit == 0 {
            DEFAULT_LIMIT
        } else {
            self.limit
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("limit", &self.limit)
            .field("timeout", &self.timeout)
            .field("client", &self.client.is_some())
            .field("fetcher", &self.fetcher.is_some())
            .field("filters", &self.filters)
            .field("scopes", &self.scopes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("http://a.test/");
        assert_eq!(config.limit, 10);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.client.is_none());
        assert!(config.fetcher.is_none());
        assert!(config.filters.is_none());
        assert!(config.scopes.is_none());
    }

    #[test]
    fn test_zero_limit_means_default() {
        assert_eq!(Config::new("http://a.test/").with_limit(0).effective_limit(), 10);
        assert_eq!(Config::new("http://a.test/").with_limit(3).effective_limit(), 3);
    }

    #[test]
    fn test_builder_sets_chains() {
        let config = Config::new("http://a.test/")
            .with_filters(FilterChain::new())
            .with_scopes(FilterChain::new().with(|_: &url::Url| false));

        assert_eq!(config.filters.map(|c| c.len()), Some(0));
        assert_eq!(config.scopes.map(|c| c.len()), Some(1));
    }
}
