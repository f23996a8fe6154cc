//! Error types for the Splunk search client.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while running a search job.
///
/// No variant is retried by the client: every failure aborts the remaining
/// pipeline stages and is surfaced to the caller.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Required connection settings are missing. Raised before any network call.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The base URL could not be used to build requests.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network, DNS, connection or request construction failure.
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body carried an authentication failure sentinel.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// The response body was not the JSON or XML document the endpoint promises.
    #[error("Invalid response format: {0}")]
    Decode(String),

    /// The job did not reach `DONE` within the status check budget.
    #[error("Search job {sid} did not complete within {timeout_secs}s")]
    Timeout { sid: String, timeout_secs: u64 },

    /// Polling was stopped by a cancellation request.
    #[error("Search cancelled")]
    Cancelled,

    /// Results were requested for a job that has not finished.
    #[error("Search job {sid} is not done (state: {state})")]
    JobNotDone { sid: String, state: String },

    /// The results endpoint answered a finished job with an empty payload.
    #[error("Search job {sid} finished but returned no results payload")]
    EmptyResults { sid: String },

    /// The results file could not be written.
    #[error("Failed to write results to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The background search task panicked or was aborted.
    #[error("Search worker failed: {0}")]
    Worker(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(source: reqwest::Error) -> Self {
        Self::Transport {
            message: error_chain(&source),
            source,
        }
    }
}

/// Render an error together with its sources, so the root cause (for example
/// "Connection refused") is part of the message.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        current = cause.source();
    }
    message
}

impl ClientError {
    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthFailed(_))
    }

    /// Check if this error came from the network layer.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this error is a connection failure (refused, unreachable, timed out).
    pub fn is_connect_error(&self) -> bool {
        match self {
            Self::Transport { source, .. } => source.is_connect() || source.is_timeout(),
            _ => false,
        }
    }
}
