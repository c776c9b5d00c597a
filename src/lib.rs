// src/lib.rs
// =============================================================================
// A bounded, concurrent web crawler.
//
// Start from a seed URL, follow links concurrently (one tokio task per page),
// and report each discovered URL to a callback until either a discovery limit
// is hit or there is nothing left to crawl.
//
// Example:
//   let crawler = Crawler::new(Config::new("https://example.com/").with_limit(20))?;
//   let summary = crawler
//       .start(|url| println!("{}", url), |err| eprintln!("error: {}", err))
//       .await;
//
// Modules:
// - crawl:  the scheduler, its configuration and termination logic
// - fetch:  turning a URL into the links on that page
// - filter: deciding which links get reported and which get crawled
// - error:  the library's error type
// =============================================================================

pub mod crawl;
pub mod error;
pub mod fetch;
pub mod filter;

pub use crawl::{CompletionSignal, Config, CrawlSummary, Crawler, Termination, DEFAULT_LIMIT};
pub use error::CrawlError;
pub use fetch::{AttrPicker, Fetcher, HttpFetcher, Picker, DEFAULT_TIMEOUT};
pub use filter::{Filter, FilterChain, SameHostFilter, SchemeFilter, UniqueFilter};
