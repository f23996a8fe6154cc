//! Splunk search job client.
//!
//! This crate runs a single search against the Splunk management API:
//! credentials are established by precedence (API token, then a login-derived
//! session key), the query is dispatched, the job is polled for a bounded
//! number of status checks, and the raw results payload is fetched and
//! written to disk unmodified.

mod auth;
pub mod cancellation;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod output;

pub use auth::{AuthStrategy, Credentials};
pub use cancellation::CancellationToken;
pub use client::builder::ConnectionBuilder;
pub use client::{Connection, SearchHandle};
pub use error::{ClientError, Result};
pub use models::{JobState, SearchJob, SearchQuery, redact_query};
pub use output::persist_results;
