//! CLI cancellation utilities.
//!
//! Responsibilities:
//! - Trip the search's cancellation token on Ctrl+C.
//! - Recognize cancellation in an `anyhow` error chain.
//! - Centralize the cancellation message.
//!
//! Invariants:
//! - Once cancelled, the token remains cancelled forever.

use splunkquery_client::{CancellationToken, ClientError};

/// Spawn a task that cancels `token` on the first Ctrl+C.
pub fn spawn_ctrl_c_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        token.cancel();
    });
}

/// Returns true if this anyhow error represents a cancellation.
pub fn is_cancelled_error(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| matches!(cause.downcast_ref::<ClientError>(), Some(ClientError::Cancelled)))
}

/// Print standard cancellation message to stderr.
pub fn print_cancelled_message() {
    eprintln!("^C\nOperation cancelled by user");
}
