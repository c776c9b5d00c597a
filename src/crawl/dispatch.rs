// src/crawl/dispatch.rs
// =============================================================================
// The hand-off between crawl tasks and the caller's callbacks.
//
// Crawl tasks hold an Emitter and push accepted URLs and fetch errors into two
// unbounded channels. Sending never blocks and never fails loudly, so a task
// racing the end of the crawl can't deadlock or panic.
//
// The caller's side runs a Dispatcher: one loop, on the caller's own task,
// that pulls from both channels and calls on_url / on_error. Because it is a
// single loop the callbacks never run concurrently with each other.
//
// Stopping:
// - the loop notes when the completion signal fires
// - it keeps draining until both channels are closed, which happens once
//   every Emitter (one per crawl job) is dropped
// That way a URL that was published just before the signal fired is still
// delivered, and nothing published is ever lost.
// =============================================================================

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace};

use super::signal::CompletionSignal;
use crate::error::CrawlError;

/// Counts of what the dispatcher delivered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivered {
    pub urls: usize,
    pub errors: usize,
}

// Producer side, cloned into every crawl job
#[derive(Debug, Clone)]
pub struct Emitter {
    urls: UnboundedSender<String>,
    errors: UnboundedSender<CrawlError>,
}

impl Emitter {
    pub fn url(&self, url: String) {
        // Only fails if the dispatcher is gone, i.e. the caller dropped start()
        if self.urls.send(url).is_err() {
            trace!("url dropped, dispatcher has stopped");
        }
    }

    pub fn error(&self, err: CrawlError) {
        if self.errors.send(err).is_err() {
            trace!("error dropped, dispatcher has stopped");
        }
    }
}

pub struct Dispatcher {
    urls: UnboundedReceiver<String>,
    errors: UnboundedReceiver<CrawlError>,
    signal: CompletionSignal,
}

/// Creates a connected Emitter/Dispatcher pair
pub fn channel(signal: CompletionSignal) -> (Emitter, Dispatcher) {
    let (url_tx, url_rx) = mpsc::unbounded_channel();
    let (err_tx, err_rx) = mpsc::unbounded_channel();

    let emitter = Emitter {
        urls: url_tx,
        errors: err_tx,
    };
    let dispatcher = Dispatcher {
        urls: url_rx,
        errors: err_rx,
        signal,
    };

    (emitter, dispatcher)
}

impl Dispatcher {
    // Runs until the crawl is complete and every published event was handed
    // to a callback
    //
    // Callbacks run inline on this loop. A slow callback stalls delivery (but
    // not the crawl tasks, which keep buffering).
    pub async fn run<U, E>(mut self, mut on_url: U, mut on_error: E) -> Delivered
    where
        U: FnMut(String),
        E: FnMut(CrawlError),
    {
        let mut delivered = Delivered::default();
        let mut completed = false;

        loop {
            tokio::select! {
                Some(url) = self.urls.recv() => {
                    delivered.urls += 1;
                    on_url(url);
                }
                Some(err) = self.errors.recv() => {
                    delivered.errors += 1;
                    on_error(err);
                }
                _ = self.signal.fired(), if !completed => {
                    completed = true;
                    debug!("completion observed, draining remaining events");
                }
                // Both channels closed: every crawl job has exited
                else => break,
            }
        }

        delivered
    }
}
