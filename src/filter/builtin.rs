// src/filter/builtin.rs
// =============================================================================
// The three filters the crawler ships with.
//
// - SchemeFilter:   only http:// and https:// URLs
// - UniqueFilter:   each URL at most once per filter instance
// - SameHostFilter: only URLs on the seed's host
// =============================================================================

use dashmap::DashSet;
use tracing::trace;
use url::Url;

use super::Filter;

/// Accepts only http and https URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemeFilter;

impl Filter for SchemeFilter {
    fn accept(&self, url: &Url) -> bool {
        matches!(url.scheme(), "http" | "https")
    }
}

/// Accepts a URL the first time it is seen and rejects it every time after.
///
/// URLs are compared by their serialized form, so `http://a.test` and
/// `http://a.test/` are the same URL but `http://a.test/x#top` and
/// `http://a.test/x` are not.
///
/// Safe to call from any number of tasks at once: the check and the record
/// happen in a single `DashSet::insert`, so two tasks racing on the same URL
/// can't both get `true`.
#[derive(Debug, Default)]
pub struct UniqueFilter {
    seen: DashSet<String>,
}

impl UniqueFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A filter that already considers the given URLs seen
    pub fn seeded<'a, I>(urls: I) -> Self
    where
        I: IntoIterator<Item = &'a Url>,
    {
        let seen = DashSet::new();
        for url in urls {
            seen.insert(url.as_str().to_owned());
        }
        Self { seen }
    }

    /// Number of URLs recorded so far
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.seen.contains(url.as_str())
    }
}

impl Filter for UniqueFilter {
    fn accept(&self, url: &Url) -> bool {
        let fresh = self.seen.insert(url.as_str().to_owned());
        if !fresh {
            trace!(%url, "already seen");
        }
        fresh
    }
}

/// Accepts URLs whose host (and explicit port) match the seed exactly.
///
/// Subdomains don't count: with a seed of `http://example.com/`,
/// `http://sub.example.com/` is rejected.
#[derive(Debug, Clone)]
pub struct SameHostFilter {
    host: Option<String>,
    port: Option<u16>,
}

impl SameHostFilter {
    pub fn new(seed: &Url) -> Self {
        Self {
            host: seed.host_str().map(str::to_owned),
            port: seed.port(),
        }
    }
}

impl Filter for SameHostFilter {
    fn accept(&self, url: &Url) -> bool {
        // A seed without a host can't have anything on "its" host
        match (&self.host, url.host_str()) {
            (Some(host), Some(candidate)) => host == candidate && self.port == url.port(),
            _ => false,
        }
    }
}
