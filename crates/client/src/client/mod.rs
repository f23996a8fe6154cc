//! Connection to a Splunk server and the search job lifecycle.
//!
//! # Submodules
//! - [`builder`]: Connection construction and configuration
//! - `session`: Credential establishment by precedence
//! - `jobs`: Dispatch and bounded polling
//! - `results`: Result retrieval
//! - `search`: The full dispatch, poll, fetch, persist pipeline
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Loading settings from the environment (handled by `splunkquery-config`)
//!
//! # Invariants
//! - A `Connection` is never mutated after `build()`; it can be shared across
//!   tasks behind an `Arc`.
//! - Every job operation takes the [`Credentials`] returned by
//!   [`Connection::establish`], so no request is sent before a session exists.
//! - Nothing is retried.

pub mod builder;
mod jobs;
mod results;
mod search;
mod session;

use std::time::Duration;

use secrecy::SecretString;

use crate::auth::AuthStrategy;
use crate::error::{ClientError, Result};
use crate::models::SearchJob;

pub use builder::ConnectionBuilder;

/// Connection settings and the HTTP client used for one Splunk server.
///
/// ```rust,ignore
/// use splunkquery_client::{CancellationToken, Connection, SearchQuery};
///
/// let connection = Connection::builder()
///     .base_url("https://localhost:8089".to_string())
///     .api_token(token)
///     .build()?;
/// let credentials = connection.establish().await?;
/// let mut job = connection.dispatch(&credentials, &SearchQuery::new("search index=main")).await?;
/// connection.poll(&credentials, &mut job, &CancellationToken::new()).await?;
/// connection.fetch_results(&credentials, &mut job).await?;
/// ```
#[derive(Debug)]
pub struct Connection {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) api_token: Option<SecretString>,
    pub(crate) username: Option<String>,
    pub(crate) password: Option<SecretString>,
    pub(crate) tls_verify: bool,
    pub(crate) timeout_secs: u64,
    pub(crate) poll_interval: Duration,
}

impl Connection {
    /// Create a new connection builder.
    pub fn builder() -> ConnectionBuilder {
        ConnectionBuilder::new()
    }

    /// Base URL without trailing slashes.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tls_verify(&self) -> bool {
        self.tls_verify
    }

    /// Number of status checks before a job is declared timed out.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// The strategy `establish()` will use, if the credential material allows one.
    pub fn auth_strategy(&self) -> Option<AuthStrategy> {
        AuthStrategy::from_parts(
            self.api_token.as_ref(),
            self.username.as_deref(),
            self.password.as_ref(),
        )
    }
}

/// Handle to a search running on a background task.
#[derive(Debug)]
pub struct SearchHandle {
    task: tokio::task::JoinHandle<Result<SearchJob>>,
}

impl SearchHandle {
    /// Wait for the search to finish.
    ///
    /// # Errors
    ///
    /// Returns the pipeline's own error, or [`ClientError::Worker`] if the task
    /// panicked or was aborted.
    pub async fn wait(self) -> Result<SearchJob> {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => Err(ClientError::Worker("search task panicked".to_string())),
            Err(_) => Err(ClientError::Worker("search task was aborted".to_string())),
        }
    }

    /// Stop the background task without waiting for it.
    pub fn abort(&self) {
        self.task.abort();
    }
}
