// src/crawl/mod.rs
// =============================================================================
// This module runs the crawl itself.
//
// Submodules:
// - config:    what a crawler is built from, with defaults
// - scheduler: Crawler, the recursive per-page jobs and their bookkeeping
// - dispatch:  channels from jobs to the caller's callbacks
// - signal:    the one-shot "crawl is over" broadcast
// =============================================================================

mod config;
mod dispatch;
mod scheduler;
mod signal;

pub use config::{Config, DEFAULT_LIMIT};
pub use scheduler::{CrawlSummary, Crawler};
pub use signal::{CompletionSignal, Termination};
