//! End-to-end search pipeline: dispatch, poll, fetch, persist.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{Instrument, info_span};

use crate::auth::Credentials;
use crate::cancellation::CancellationToken;
use crate::client::{Connection, SearchHandle};
use crate::error::{ClientError, Result};
use crate::models::{SearchJob, SearchQuery, redact_query};
use crate::output::persist_results;

impl Connection {
    /// Run one search to completion and write its results to `output`.
    ///
    /// The file is only written when the job reached `DONE` and the payload
    /// is non-empty. Any failure aborts the remaining stages.
    ///
    /// # Errors
    ///
    /// Any error from [`Connection::dispatch`], [`Connection::poll`],
    /// [`Connection::fetch_results`] or [`persist_results`], plus
    /// [`ClientError::EmptyResults`] for an empty payload.
    pub async fn run_search(
        &self,
        credentials: &Credentials,
        query: &SearchQuery,
        output: &Path,
        cancel: &CancellationToken,
    ) -> Result<SearchJob> {
        let mut job = self.dispatch(credentials, query).await?;
        self.poll(credentials, &mut job, cancel).await?;
        self.fetch_results(credentials, &mut job).await?;

        match job.results() {
            Some(bytes) if !bytes.is_empty() => persist_results(output, bytes).await?,
            _ => {
                return Err(ClientError::EmptyResults {
                    sid: job.sid().to_string(),
                });
            }
        }

        Ok(job)
    }

    /// Run [`Connection::run_search`] on a background task.
    ///
    /// The task owns its clone of the credentials and its own job, so several
    /// searches can share one connection.
    pub fn spawn_search(
        self: Arc<Self>,
        credentials: Credentials,
        query: SearchQuery,
        output: PathBuf,
        cancel: CancellationToken,
    ) -> SearchHandle {
        let span = info_span!("search", query = %redact_query(query.as_str()));
        let task = tokio::spawn(
            async move {
                self.run_search(&credentials, &query, &output, &cancel)
                    .await
            }
            .instrument(span),
        );
        SearchHandle { task }
    }
}
