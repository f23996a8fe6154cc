//! Job dispatch and bounded status polling.

use tracing::{debug, info};

use crate::auth::Credentials;
use crate::cancellation::CancellationToken;
use crate::client::Connection;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::{JobState, SearchJob, SearchQuery};

impl Connection {
    /// Submit `query` as a new search job.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] if the server rejects the credentials,
    /// or [`ClientError::Decode`] if the response carries no sid.
    pub async fn dispatch(&self, credentials: &Credentials, query: &SearchQuery) -> Result<SearchJob> {
        let sid =
            endpoints::create_job(&self.http, &self.base_url, credentials, query.as_str()).await?;
        info!(sid = %sid, "Search job dispatched");
        Ok(SearchJob::new(sid))
    }

    /// Poll a job until it reports `DONE`, the budget runs out, or `cancel` fires.
    ///
    /// The budget is [`Connection::timeout_secs`] status checks, each preceded
    /// by one poll interval. Intermediate states are recorded verbatim; only
    /// `DONE` ends the loop early.
    ///
    /// # Errors
    ///
    /// - Transport or decode failure: job state `Error`, error returned as-is.
    /// - Budget exhausted: job state `Timeout`, [`ClientError::Timeout`].
    /// - Cancelled: job state `Error`, [`ClientError::Cancelled`].
    pub async fn poll(
        &self,
        credentials: &Credentials,
        job: &mut SearchJob,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if job.is_done() {
            return Ok(());
        }

        let sid = job.sid().to_string();
        for attempt in 1..=self.timeout_secs {
            let checked = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                state = self.check_status(credentials, &sid) => Some(state),
            };

            let state = match checked {
                None => {
                    info!(sid = %sid, "Polling cancelled");
                    job.set_state(JobState::Error);
                    return Err(ClientError::Cancelled);
                }
                Some(Err(e)) => {
                    job.set_state(JobState::Error);
                    return Err(e);
                }
                Some(Ok(state)) => state,
            };

            match state {
                Some(state) => job.set_state(JobState::from_dispatch_state(&state)),
                None => debug!(sid = %sid, attempt, "Status document has no dispatchState"),
            }

            if job.is_done() {
                info!(sid = %sid, checks = attempt, "Search job completed");
                return Ok(());
            }
        }

        job.set_state(JobState::Timeout);
        Err(ClientError::Timeout {
            sid,
            timeout_secs: self.timeout_secs,
        })
    }

    /// Wait one poll interval, then read the job's dispatch state.
    async fn check_status(&self, credentials: &Credentials, sid: &str) -> Result<Option<String>> {
        tokio::time::sleep(self.poll_interval).await;
        endpoints::get_dispatch_state(&self.http, &self.base_url, credentials, sid).await
    }
}
