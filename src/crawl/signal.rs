// src/crawl/signal.rs
// =============================================================================
// The one-shot "this crawl is over" signal.
//
// Two things can end a crawl, and both can happen at any moment from any task:
// - the discovery budget runs out (BudgetExhausted)
// - the last outstanding crawl job finishes (Drained)
//
// Both can fire more than once (several jobs racing for the last budget slot,
// or a budget stop followed by the job count reaching zero). Only the first
// call wins and records the reason; every later call is a harmless no-op.
//
// Under the hood the broadcast is a tokio-util CancellationToken, which every
// task can poll cheaply (is_fired) or await (fired).
// =============================================================================

use serde::Serialize;
use std::sync::{Arc, OnceLock};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Why a crawl ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The discovery limit was reached
    BudgetExhausted,
    /// Every crawl job finished and none were left to run
    Drained,
}

#[derive(Debug, Clone, Default)]
pub struct CompletionSignal {
    reason: Arc<OnceLock<Termination>>,
    token: CancellationToken,
}

impl CompletionSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires the signal. Returns true only for the call that actually fired it.
    pub fn fire(&self, reason: Termination) -> bool {
        let won = self.reason.set(reason).is_ok();
        if won {
            debug!(?reason, "crawl complete");
        }
        // The reason is recorded before anyone can observe the token
        self.token.cancel();
        won
    }

    pub fn is_fired(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the signal has fired (immediately if it already has)
    pub async fn fired(&self) {
        self.token.cancelled().await
    }

    /// The reason recorded by whichever call fired first
    pub fn reason(&self) -> Option<Termination> {
        self.reason.get().copied()
    }
}
