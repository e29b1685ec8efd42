//! Cooperative cancellation for long-running client operations.
//!
//! Responsibilities:
//! - Provide a cloneable token that the caller hands to `wait_for_job` and
//!   `stream_results`, and fires to abort them promptly.
//!
//! Does NOT handle:
//! - Stopping or deleting the remote job. Cancelling only abandons local work;
//!   use a control command for the server side.
//!
//! Invariants:
//! - Once cancelled, a token remains cancelled forever.
//! - All clones observe the same state.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::Notify;

/// Cancellation token usable across async tasks.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancellationToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel token (idempotent).
    pub fn cancel(&self) {
        let was_cancelled = self.cancelled.swap(true, Ordering::SeqCst);
        if !was_cancelled {
            self.notify.notify_waiters();
        }
    }

    /// True if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Await cancellation.
    ///
    /// The `notified()` future is created before the flag is checked so a
    /// `cancel()` racing with this call is never missed.
    pub async fn cancelled(&self) {
        let notified = self.notify.notified();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}
