//! Result retrieval for finished jobs.

use tracing::info;

use crate::auth::Credentials;
use crate::client::Connection;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::SearchJob;

impl Connection {
    /// Fetch the raw results payload of a finished job and store it on the job.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::JobNotDone`] if the job has not reached `DONE`.
    /// On a transport failure any stored payload is cleared and the error returned.
    pub async fn fetch_results(&self, credentials: &Credentials, job: &mut SearchJob) -> Result<()> {
        if !job.is_done() {
            return Err(ClientError::JobNotDone {
                sid: job.sid().to_string(),
                state: job.state().to_string(),
            });
        }

        match endpoints::get_results(&self.http, &self.base_url, credentials, job.sid()).await {
            Ok(bytes) => {
                info!(sid = %job.sid(), bytes = bytes.len(), "Results fetched");
                job.set_results(bytes);
                Ok(())
            }
            Err(e) => {
                job.clear_results();
                Err(e)
            }
        }
    }
}
