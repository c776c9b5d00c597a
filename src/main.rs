// src/main.rs
// =============================================================================
// This is the entry point of the command-line crawler.
//
// What happens here:
// 1. Set up logging (to stderr, controlled by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Build a Crawler and run it, printing each URL and error as it arrives
// 4. Exit with proper code (0 = crawl completed, 2 = could not start)
//
// Fetch errors for individual pages are printed but don't change the exit
// code: a crawl that hit some dead links still completed.
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use bounded_crawler::{Config, CrawlError, CrawlSummary, Crawler, Termination};
use clap::Parser;
use cli::Cli;
use serde_json::json;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays a clean list of URLs
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,bounded_crawler=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run().await {
        Ok(_) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<CrawlSummary> {
    let cli = Cli::parse();

    let config = Config::new(&cli.url)
        .with_limit(cli.limit)
        .with_timeout(Duration::from_secs(cli.timeout));
    let crawler = Crawler::new(config).context("could not start crawl")?;

    let json = cli.json;
    let mut no = 0;

    let on_url = |url: String| {
        no += 1;
        if json {
            println!("{}", json!({ "type": "url", "no": no, "url": url }));
        } else {
            println!("{}\t {}", no, url);
        }
    };

    let on_error = |err: CrawlError| {
        if json {
            println!(
                "{}",
                json!({
                    "type": "error",
                    "url": err.url().map(|u| u.as_str()),
                    "message": err.to_string(),
                })
            );
        } else {
            println!("error\t {}", err);
        }
    };

    let summary = crawler.start(on_url, on_error).await;
    print_summary(&summary, json)?;

    Ok(summary)
}

fn print_summary(summary: &CrawlSummary, json: bool) -> Result<()> {
    if json {
        let mut line = serde_json::to_value(summary)?;
        line["type"] = json!("summary");
        println!("{}", line);
    } else {
        println!();
        println!("📊 Summary:");
        println!("   🔗 Reported: {}", summary.reported);
        println!("   ❌ Errors: {}", summary.errors);
        println!("   🏁 Stopped: {}", describe(summary));
    }
    Ok(())
}

fn describe(summary: &CrawlSummary) -> &'static str {
    match summary.termination {
        Termination::BudgetExhausted => "limit reached",
        Termination::Drained => "nothing left to crawl",
    }
}
