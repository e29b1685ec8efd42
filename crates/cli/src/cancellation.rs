//! CLI cancellation utilities.
//!
//! Responsibilities:
//! - Wire Ctrl+C to the library's `CancellationToken`.
//! - Recognize cancellation anywhere in an `anyhow` error chain.
//! - Centralize the cancellation message and Unix-standard SIGINT exit code (130).
//!
//! Invariants:
//! - Once cancelled, the token remains cancelled forever.

use std::future::Future;

use splunk_search_client::{CancellationToken, ClientError};

/// Standard Unix exit code for SIGINT: 128 + 2.
pub const SIGINT_EXIT_CODE: u8 = 130;

/// Cancel `token` when the process receives Ctrl+C.
pub fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        token.cancel();
    });
}

/// Run a single request, giving up as soon as `cancel` fires.
pub async fn cancellable<T, F>(cancel: &CancellationToken, fut: F) -> anyhow::Result<T>
where
    F: Future<Output = splunk_search_client::Result<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ClientError::Cancelled.into()),
        res = fut => Ok(res?),
    }
}

/// Returns true if this anyhow error represents a cancellation.
pub fn is_cancelled_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<ClientError>()
            .is_some_and(ClientError::is_cancelled)
    })
}

/// Print standard cancellation message to stderr.
pub fn print_cancelled_message() {
    eprintln!("^C\nOperation cancelled by user");
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_detects_cancellation_in_chain() {
        let err = anyhow::Error::from(ClientError::Cancelled);
        assert!(is_cancelled_error(&err));

        let wrapped: anyhow::Result<()> =
            Err(ClientError::Cancelled).context("waiting for job abc");
        assert!(is_cancelled_error(&wrapped.unwrap_err()));

        let other = anyhow::Error::from(ClientError::InvalidUrl("x".into()));
        assert!(!is_cancelled_error(&other));
    }

    #[tokio::test]
    async fn test_cancellable_short_circuits() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let res = cancellable(&cancel, std::future::pending::<splunk_search_client::Result<()>>())
            .await;
        assert!(is_cancelled_error(&res.unwrap_err()));
    }

    #[tokio::test]
    async fn test_cancellable_passes_result_through() {
        let cancel = CancellationToken::new();
        let value = cancellable(&cancel, async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }
}
