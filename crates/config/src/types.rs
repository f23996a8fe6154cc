//! Configuration types for splunkquery.
//!
//! Responsibilities:
//! - Define authentication strategies (session token, API token).
//! - Define connection settings (URL, TLS verification, timeouts).
//! - Provide convenience constructors for common config patterns.
//!
//! Does NOT handle:
//! - Configuration loading from env or `.env` (see `loader` module).
//! - Actual network connections or login (see client crate).
//!
//! Invariants:
//! - All secret values use `secrecy::SecretString` to prevent accidental logging.
//! - Default values come from `constants`, not magic numbers.

use secrecy::SecretString;
use std::time::Duration;

use crate::constants::{
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SEARCH_TIMEOUT_SECS, DEFAULT_TLS_VERIFY,
};

/// Strategy for authenticating with Splunk.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Username and password authentication (exchanged for a session key).
    SessionToken {
        username: String,
        password: SecretString,
    },
    /// Pre-issued bearer token; no login round-trip.
    ApiToken { token: SecretString },
}

/// Authentication configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// The authentication strategy to use.
    pub strategy: AuthStrategy,
}

/// Connection configuration for the Splunk server.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Base URL of the Splunk server, normalized without a trailing slash.
    pub base_url: String,
    /// Whether to verify the server certificate. Disabling is an explicit opt-in.
    pub tls_verify: bool,
    /// Number of one-second status checks before the search is declared timed out.
    pub search_timeout_secs: u64,
    /// Timeout applied to each individual HTTP request.
    pub request_timeout: Duration,
}

impl ConnectionConfig {
    fn new(base_url: String) -> Self {
        Self {
            base_url,
            tls_verify: DEFAULT_TLS_VERIFY,
            search_timeout_secs: DEFAULT_SEARCH_TIMEOUT_SECS,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection settings.
    pub connection: ConnectionConfig,
    /// Authentication settings.
    pub auth: AuthConfig,
}

impl Config {
    /// Create a new config with the specified base URL and API token.
    pub fn with_api_token(base_url: String, token: SecretString) -> Self {
        Self {
            connection: ConnectionConfig::new(base_url),
            auth: AuthConfig {
                strategy: AuthStrategy::ApiToken { token },
            },
        }
    }

    /// Create a new config with the specified base URL and username/password.
    pub fn with_session_token(base_url: String, username: String, password: SecretString) -> Self {
        Self {
            connection: ConnectionConfig::new(base_url),
            auth: AuthConfig {
                strategy: AuthStrategy::SessionToken { username, password },
            },
        }
    }
}
