//! Connection builder for constructing [`Connection`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for connection configuration
//! - Normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client once (timeouts, redirects, TLS verification)
//!
//! # What this module does NOT handle:
//! - Checking that credentials are complete (done by `establish()`, so a
//!   connection without credentials can still be built and inspected)
//!
//! # Invariants
//! - `base_url` is required and must parse as an absolute URL
//! - TLS verification is on unless explicitly disabled, and disabling it is logged

use std::time::Duration;

use secrecy::SecretString;
use splunkquery_config::{
    AuthStrategy as ConfigAuthStrategy, Config,
    constants::{
        DEFAULT_MAX_REDIRECTS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_REQUEST_TIMEOUT_SECS,
        DEFAULT_SEARCH_TIMEOUT_SECS, DEFAULT_TLS_VERIFY,
    },
};

use crate::client::Connection;
use crate::error::{ClientError, Result};

/// Builder for creating a new [`Connection`].
pub struct ConnectionBuilder {
    base_url: Option<String>,
    api_token: Option<SecretString>,
    username: Option<String>,
    password: Option<SecretString>,
    tls_verify: bool,
    search_timeout_secs: u64,
    request_timeout: Duration,
    poll_interval: Duration,
}

impl Default for ConnectionBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            api_token: None,
            username: None,
            password: None,
            tls_verify: DEFAULT_TLS_VERIFY,
            search_timeout_secs: DEFAULT_SEARCH_TIMEOUT_SECS,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl ConnectionBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the Splunk management API, e.g. `https://localhost:8089`.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set a pre-issued API token. Takes precedence over username/password.
    pub fn api_token(mut self, token: SecretString) -> Self {
        self.api_token = Some(token);
        self
    }

    pub fn username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    pub fn password(mut self, password: SecretString) -> Self {
        self.password = Some(password);
        self
    }

    /// Set whether to verify the server certificate.
    ///
    /// # Security Warning
    /// Only disable verification against test servers. Without it the
    /// connection is open to man-in-the-middle attacks.
    pub fn tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set the number of status checks before a job times out.
    pub fn search_timeout_secs(mut self, secs: u64) -> Self {
        self.search_timeout_secs = secs;
        self
    }

    /// Set the HTTP connect and read timeout. Default is 30 seconds.
    ///
    /// The read timeout resets after every successful read, so a results
    /// download that keeps streaming is never cut off.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the delay before each status check. Default is one second.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Create a connection builder from loaded configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        match &config.auth.strategy {
            ConfigAuthStrategy::SessionToken { username, password } => {
                self.username = Some(username.clone());
                self.password = Some(password.clone());
            }
            ConfigAuthStrategy::ApiToken { token } => {
                self.api_token = Some(token.clone());
            }
        }

        self.base_url = Some(config.connection.base_url.clone());
        self.tls_verify = config.connection.tls_verify;
        self.search_timeout_secs = config.connection.search_timeout_secs;
        self.request_timeout = config.connection.request_timeout;
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    ///
    /// - `"https://localhost:8089/"` -> `"https://localhost:8089"`
    /// - `"https://example.com:8089//"` -> `"https://example.com:8089"`
    fn normalize_base_url(url: &str) -> String {
        url.trim().trim_end_matches('/').to_string()
    }

    /// Build the [`Connection`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is missing or unparseable.
    /// Returns [`ClientError::Transport`] if the HTTP client fails to build.
    pub fn build(self) -> Result<Connection> {
        let base_url = self
            .base_url
            .as_deref()
            .map(Self::normalize_base_url)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;

        reqwest::Url::parse(&base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut http_builder = reqwest::Client::builder()
            .connect_timeout(self.request_timeout)
            .read_timeout(self.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if !self.tls_verify {
            if base_url.starts_with("https://") {
                tracing::warn!(
                    base_url = %base_url,
                    "TLS certificate verification is disabled for this connection"
                );
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "TLS verification disabled but has no effect on HTTP URLs. Credentials are sent in cleartext."
                );
            }
        }

        let http = http_builder.build()?;

        Ok(Connection {
            http,
            base_url,
            api_token: self.api_token,
            username: self.username,
            password: self.password,
            tls_verify: self.tls_verify,
            timeout_secs: self.search_timeout_secs,
            poll_interval: self.poll_interval,
        })
    }
}
