// src/crawl/scheduler.rs
// =============================================================================
// The crawl scheduler: one tokio task per page, spawned recursively.
//
// How a crawl runs:
// 1. start() registers a job for the seed and spawns it
// 2. A job fetches its page and walks the links in page order:
//      - links passing the report chain use up one unit of budget and are
//        sent to the caller
//      - links passing the scope chain get a job of their own
//    A link can be reported, crawled, both, or neither.
// 3. The crawl ends the first time either
//      - the budget hits zero (BudgetExhausted), or
//      - the number of live jobs hits zero (Drained)
//
// Shared state (budget, live job count, completion signal) is all atomics, so
// any number of jobs can touch it at once without locking.
//
// Job counting:
// - a job is counted by its *parent* before it is spawned, so the count can't
//   touch zero while a child is still waiting to start
// - a job is uncounted when the Job value drops, so every way out of a job
//   (done, fetch error, crawl already over) uncounts it exactly once
// =============================================================================

use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};
use url::Url;

use super::config::Config;
use super::dispatch::{self, Emitter};
use super::signal::{CompletionSignal, Termination};
use crate::error::CrawlError;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::filter::FilterChain;

/// What a finished crawl did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrawlSummary {
    /// URLs handed to `on_url`
    pub reported: usize,
    /// Errors handed to `on_error`
    pub errors: usize,
    pub termination: Termination,
}

pub struct Crawler {
    seed: Url,
    limit: usize,
    fetcher: Arc<dyn Fetcher>,
    filters: FilterChain,
    scopes: FilterChain,
}

impl Crawler {
    /// Builds a crawler. Fails only if the seed isn't an absolute URL or the
    /// default HTTP client can't be created.
    pub fn new(config: Config) -> Result<Self, CrawlError> {
        let seed = Url::parse(&config.url).map_err(|source| CrawlError::InvalidSeed {
            url: config.url.clone(),
            source,
        })?;
        let limit = config.effective_limit();

        let fetcher: Arc<dyn Fetcher> = match (config.fetcher, config.client) {
            (Some(fetcher), _) => fetcher,
            (None, Some(client)) => Arc::new(HttpFetcher::with_client(client)),
            (None, None) => Arc::new(HttpFetcher::new(config.timeout)?),
        };

        let filters = config
            .filters
            .unwrap_or_else(|| FilterChain::default_report(&seed));
        let scopes = config
            .scopes
            .unwrap_or_else(|| FilterChain::default_scope(&seed));

        Ok(Self {
            seed,
            limit,
            fetcher,
            filters,
            scopes,
        })
    }

    pub fn seed(&self) -> &Url {
        &self.seed
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    // Crawls from the seed until the budget runs out or nothing is left to
    // crawl, calling `on_url` for each reported URL and `on_error` for each
    // page that failed to fetch
    //
    // Both callbacks run on the caller's task, one at a time, and must not
    // block for long: while a callback runs no other event is delivered.
    //
    // Filters keep their state between runs, so a second start() with the
    // default chains won't report URLs the first one already did.
    pub async fn start<U, E>(&self, on_url: U, on_error: E) -> CrawlSummary
    where
        U: FnMut(String),
        E: FnMut(CrawlError),
    {
        info!(seed = %self.seed, limit = self.limit, "starting crawl");

        let signal = CompletionSignal::new();
        let (emitter, dispatcher) = dispatch::channel(signal.clone());

        let shared = Arc::new(Shared {
            fetcher: self.fetcher.clone(),
            filters: self.filters.clone(),
            scopes: self.scopes.clone(),
            budget: AtomicUsize::new(self.limit),
            workers: AtomicUsize::new(0),
            signal: signal.clone(),
            emitter,
        });

        // The root job takes our only handle on the shared state; once every
        // job is gone the channels close and the dispatcher returns
        Job::register(shared).spawn(self.seed.clone());

        let delivered = dispatcher.run(on_url, on_error).await;
        let termination = signal.reason().unwrap_or(Termination::Drained);

        info!(
            reported = delivered.urls,
            errors = delivered.errors,
            ?termination,
            "crawl finished"
        );

        CrawlSummary {
            reported: delivered.urls,
            errors: delivered.errors,
            termination,
        }
    }
}

impl fmt::Debug for Crawler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crawler")
            .field("seed", &self.seed.as_str())
            .field("limit", &self.limit)
            .field("filters", &self.filters)
            .field("scopes", &self.scopes)
            .finish()
    }
}

// State for one run of start(), shared by every job in it
struct Shared {
    fetcher: Arc<dyn Fetcher>,
    filters: FilterChain,
    scopes: FilterChain,
    budget: AtomicUsize,
    workers: AtomicUsize,
    signal: CompletionSignal,
    emitter: Emitter,
}

impl Shared {
    // Reserves one unit of budget, returning how much is left after it.
    // None means the budget was already gone.
    fn take_budget(&self) -> Option<usize> {
        self.budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .ok()
            .map(|before| before - 1)
    }
}

// One outstanding crawl of one page
struct Job {
    shared: Arc<Shared>,
}

impl Job {
    fn register(shared: Arc<Shared>) -> Self {
        let active = shared.workers.fetch_add(1, Ordering::SeqCst) + 1;
        trace!(active, "job registered");
        Job { shared }
    }

    fn spawn(self, url: Url) {
        // Boxed so the recursive spawn has a concrete, Send future type
        let task: BoxFuture<'static, ()> = self.run(url).boxed();
        tokio::spawn(task);
    }

    async fn run(self, url: Url) {
        let shared = &self.shared;
        if shared.signal.is_fired() {
            return;
        }

        debug!(%url, "crawling");
        let fetched = tokio::select! {
            _ = shared.signal.fired() => {
                trace!(%url, "crawl complete, abandoning fetch");
                return;
            }
            fetched = shared.fetcher.fetch(&url) => fetched,
        };

        match fetched {
            Ok(links) => self.visit(&url, links),
            Err(err) => {
                warn!(%url, error = %err, "fetch failed");
                if !shared.signal.is_fired() {
                    shared.emitter.error(err);
                }
            }
        }
    }

    fn visit(&self, page: &Url, links: Vec<Url>) {
        let shared = &self.shared;

        for link in links {
            if shared.signal.is_fired() {
                trace!(%page, "crawl complete, skipping remaining links");
                return;
            }

            if shared.filters.accept(&link) {
                match shared.take_budget() {
                    Some(left) => {
                        trace!(%link, left, "reporting");
                        shared.emitter.url(link.to_string());
                        if left == 0 {
                            shared.signal.fire(Termination::BudgetExhausted);
                            return;
                        }
                    }
                    None => {
                        shared.signal.fire(Termination::BudgetExhausted);
                        return;
                    }
                }
            }

            if shared.scopes.accept(&link) {
                Job::register(shared.clone()).spawn(link);
            }
        }
    }
}

impl Drop for Job {
    fn drop(&mut self) {
        let active = self.shared.workers.fetch_sub(1, Ordering::SeqCst) - 1;
        trace!(active, "job finished");
        if active == 0 {
            self.shared.signal.fire(Termination::Drained);
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why AtomicUsize instead of a plain usize?
//    - Many jobs run at the same time, possibly on different threads
//    - fetch_add / fetch_sub / fetch_update read and change the value in one
//      step, so two jobs can never both see "1 left" and both take it
//
// 2. What is fetch_update?
//    - Retries a closure until it can swap the old value for the new one
//    - checked_sub(1) returns None at zero, which makes fetch_update give up
//      instead of wrapping around to usize::MAX
//
// 3. Why is the job count decremented in Drop?
//    - Drop runs however the job ends: normal return, early return, or panic
//    - Putting the bookkeeping there means no exit path can forget it
//
// 4. Why Box the spawned future?
//    - run() spawns more run() futures; boxing gives that recursion a single
//      named type (BoxFuture) that tokio::spawn can accept
// -----------------------------------------------------------------------------
