// src/filter/mod.rs
// =============================================================================
// URL filters and filter chains.
//
// A crawl carries two chains:
// - the report chain decides which discovered URLs the caller hears about
// - the scope chain decides which discovered URLs get crawled themselves
//
// A chain accepts a URL only if every filter in it does. Filters run in the
// order they were added and evaluation stops at the first rejection, so a
// stateful filter later in the chain (like UniqueFilter) never records a URL
// that an earlier filter already turned down.
//
// Filters are shared between every running crawl task, which is why the trait
// requires Send + Sync. Anything stateful must do its own locking.
// =============================================================================

mod builtin;

use std::fmt;
use std::sync::Arc;
use url::Url;

pub use builtin::{SameHostFilter, SchemeFilter, UniqueFilter};

/// A yes/no decision about a single candidate URL.
pub trait Filter: Send + Sync {
    fn accept(&self, url: &Url) -> bool;
}

// Plain closures work as filters:
//   chain.push(|u: &Url| !u.path().ends_with(".pdf"))
impl<F> Filter for F
where
    F: Fn(&Url) -> bool + Send + Sync,
{
    fn accept(&self, url: &Url) -> bool {
        self(url)
    }
}

// An ordered list of filters that must all accept
//
// Filters are held behind Arc so the same instance (for example one seen-set)
// can deliberately be placed in more than one chain.
#[derive(Clone, Default)]
pub struct FilterChain {
    filters: Vec<Arc<dyn Filter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter to the end of the chain
    pub fn with<F: Filter + 'static>(mut self, filter: F) -> Self {
        self.push(filter);
        self
    }

    /// Appends an already shared filter to the end of the chain
    pub fn with_shared(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn push<F: Filter + 'static>(&mut self, filter: F) {
        self.filters.push(Arc::new(filter));
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// True if every filter accepts the URL. An empty chain accepts everything.
    pub fn accept(&self, url: &Url) -> bool {
        self.filters.iter().all(|filter| filter.accept(url))
    }

    // Default report chain: http(s) only, each URL at most once
    //
    // The seen-set starts out containing the seed so the seed itself is never
    // reported back to the caller.
    pub fn default_report(seed: &Url) -> Self {
        FilterChain::new()
            .with(SchemeFilter)
            .with(UniqueFilter::seeded([seed]))
    }

    // Default scope chain: http(s) only, each URL at most once, same host as
    // the seed. Gets its own seen-set, separate from the report chain's.
    pub fn default_scope(seed: &Url) -> Self {
        FilterChain::new()
            .with(SchemeFilter)
            .with(UniqueFilter::seeded([seed]))
            .with(SameHostFilter::new(seed))
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters", &self.filters.len())
            .finish()
    }
}
