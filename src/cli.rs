// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
// =============================================================================

use clap::Parser;

// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "bounded-crawler",
    version,
    about = "Crawl a website and print the links it discovers",
    long_about = "bounded-crawler starts at a URL, follows links on the same host concurrently, \
                  and prints every new link it finds until it has found --limit of them \
                  or there is nothing left to crawl."
)]
pub struct Cli {
    /// Seed URL to start crawling from (e.g., https://example.com)
    ///
    /// This is a positional argument (required)
    pub url: String,

    /// Stop after this many URLs have been reported
    ///
    /// 0 means the default of 10
    #[arg(long, short = 'n', default_value_t = 10)]
    pub limit: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Print one JSON object per line instead of plain text
    #[arg(long)]
    pub json: bool,
}
