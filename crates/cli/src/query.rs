//! The `splunkquery` run: configuration, login, and one supervised search.
//!
//! Responsibilities:
//! - Layer `.env`, environment and flags into a validated config.
//! - Read the query file, establish credentials, and run the search on a
//!   background task.
//!
//! Invariants:
//! - Configuration errors surface before any network request.
//! - Exactly one search runs per invocation.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use splunkquery_client::{CancellationToken, Connection, SearchJob, SearchQuery};
use splunkquery_config::{Config, ConfigLoader};
use tracing::info;

use crate::args::Cli;

/// Build the configuration from `.env` (when requested), the environment and flags.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new();

    if cli.env_file {
        loader = loader.load_dotenv().context("Error loading .env file")?;
    }

    loader = loader
        .from_env()
        .context("Failed to load configuration from environment")?;

    if let Some(ref url) = cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(timeout) = cli.timeout {
        loader = loader.with_search_timeout_secs(timeout);
    }
    if cli.insecure {
        loader = loader.with_tls_verify(false);
    }

    loader.build().context("Invalid configuration")
}

/// Run the search described by `cli` and write its results.
pub async fn run(cli: Cli, cancel: &CancellationToken) -> Result<SearchJob> {
    let config = load_config(&cli)?;

    let bytes = tokio::fs::read(&cli.query_file)
        .await
        .with_context(|| format!("Failed to read query file {}", cli.query_file.display()))?;
    let query = SearchQuery::new(String::from_utf8_lossy(&bytes));

    let connection = Connection::builder()
        .from_config(&config)
        .build()
        .context("Failed to build Splunk connection")?;

    let credentials = connection
        .establish()
        .await
        .context("Couldn't login to splunk")?;

    let started = Instant::now();
    let handle = Arc::new(connection).spawn_search(credentials, query, cli.output.clone(), cancel.clone());
    let job = handle.wait().await.context("Search failed")?;

    info!(
        sid = %job.sid(),
        output = %cli.output.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Search finished"
    );
    Ok(job)
}
