//! Search job endpoints.
//!
//! # What this module handles:
//! - Creating search jobs
//! - Reading a job's dispatch state
//! - Retrieving raw search results
//!
//! # What this module does NOT handle:
//! - Polling and job state transitions (see [`crate::client`])

use reqwest::{Client, Method};
use tracing::debug;

use crate::auth::Credentials;
use crate::endpoints::encode_path_segment;
use crate::endpoints::parsing::{
    DISPATCH_FAILED_SENTINELS, contains_sentinel, parse_dispatch_state, parse_sid,
};
use crate::endpoints::request::{call, call_bytes};
use crate::error::{ClientError, Result};
use crate::models::redact_query;

fn job_url(base_url: &str, sid: &str) -> String {
    format!("{}/services/search/jobs/{}", base_url, encode_path_segment(sid))
}

/// Create a new search job and return its sid.
pub async fn create_job(
    client: &Client,
    base_url: &str,
    credentials: &Credentials,
    query: &str,
) -> Result<String> {
    debug!("Creating search job: {}", redact_query(query));

    let url = format!("{}/services/search/jobs/", base_url);
    let body = call(client, Method::POST, &url, &[("search", query)], credentials).await?;

    if contains_sentinel(&body, DISPATCH_FAILED_SENTINELS).is_some() {
        return Err(ClientError::AuthFailed(body));
    }

    parse_sid(&body)
}

/// Fetch a job's status document and return its `dispatchState`, if present.
pub async fn get_dispatch_state(
    client: &Client,
    base_url: &str,
    credentials: &Credentials,
    sid: &str,
) -> Result<Option<String>> {
    let body = call(client, Method::GET, &job_url(base_url, sid), &[], credentials).await?;
    parse_dispatch_state(&body)
}

/// Fetch the raw results payload of a finished job.
pub async fn get_results(
    client: &Client,
    base_url: &str,
    credentials: &Credentials,
    sid: &str,
) -> Result<Vec<u8>> {
    debug!("Fetching results for job: {}", sid);

    let url = format!("{}/results/", job_url(base_url, sid));
    call_bytes(
        client,
        Method::GET,
        &url,
        &[("output_mode", "json")],
        credentials,
    )
    .await
}
