//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration.
//! - Build and validate the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - An API token takes precedence over username/password.
//! - `build()` fails before any network activity when the base URL or
//!   credentials are missing.

use secrecy::SecretString;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SEARCH_TIMEOUT_SECS, DEFAULT_TLS_VERIFY, DOTENV_FILE,
    MAX_REQUEST_TIMEOUT_SECS, MAX_SEARCH_TIMEOUT_SECS,
};
use crate::types::{AuthConfig, AuthStrategy, Config, ConnectionConfig};

/// Configuration loader that builds config from `.env`, environment variables
/// and explicit overrides.
#[derive(Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    api_token: Option<SecretString>,
    tls_verify: Option<bool>,
    search_timeout_secs: Option<u64>,
    request_timeout: Option<Duration>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load environment variables from `.env` in the current directory.
    ///
    /// Parent directories are not searched. Only called when the operator explicitly asks for it, so a missing
    /// file is an error rather than a silent no-op. Variables already present
    /// in the process environment are not overwritten.
    ///
    /// # Errors
    ///
    /// - `ConfigError::DotenvParse` if the file has invalid syntax
    /// - `ConfigError::DotenvIo` if the file is missing or unreadable
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::from_path(DOTENV_FILE) {
            Ok(()) => {
                tracing::debug!("Loaded environment from {}", DOTENV_FILE);
                Ok(self)
            }
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the username.
    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    /// Set the API token.
    pub fn with_api_token(mut self, token: String) -> Self {
        self.api_token = Some(SecretString::new(token.into()));
        self
    }

    /// Set whether to verify TLS certificates.
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = Some(verify);
        self
    }

    /// Set the search budget in seconds.
    pub fn with_search_timeout_secs(mut self, secs: u64) -> Self {
        self.search_timeout_secs = Some(secs);
        self
    }

    /// Set the per-request HTTP timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub(crate) fn set_password(&mut self, password: Option<SecretString>) {
        self.password = password;
    }

    pub(crate) fn set_api_token(&mut self, token: Option<SecretString>) {
        self.api_token = token;
    }

    pub(crate) fn set_tls_verify(&mut self, verify: Option<bool>) {
        self.tls_verify = verify;
    }

    pub(crate) fn set_search_timeout_secs(&mut self, secs: Option<u64>) {
        self.search_timeout_secs = secs;
    }

    pub(crate) fn set_request_timeout(&mut self, timeout: Option<Duration>) {
        self.request_timeout = timeout;
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = self
            .base_url
            .as_deref()
            .map(validate_and_normalize_base_url)
            .transpose()?
            .ok_or(ConfigError::MissingBaseUrl)?;

        let strategy = match (self.api_token, self.username, self.password) {
            (Some(token), _, _) => AuthStrategy::ApiToken { token },
            (None, Some(username), Some(password)) => {
                AuthStrategy::SessionToken { username, password }
            }
            (None, None, _) => return Err(ConfigError::MissingUsername),
            (None, Some(_), None) => return Err(ConfigError::MissingPassword),
        };

        let connection = ConnectionConfig {
            base_url,
            tls_verify: self.tls_verify.unwrap_or(DEFAULT_TLS_VERIFY),
            search_timeout_secs: self
                .search_timeout_secs
                .unwrap_or(DEFAULT_SEARCH_TIMEOUT_SECS),
            request_timeout: self
                .request_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
        };

        Self::validate_timeout_config(&connection)?;

        Ok(Config {
            connection,
            auth: AuthConfig { strategy },
        })
    }

    /// Validates timeout-related configuration values.
    ///
    /// A zero search budget is allowed (the job immediately times out); a zero
    /// request timeout is not.
    fn validate_timeout_config(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        if connection.search_timeout_secs > MAX_SEARCH_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "search timeout exceeds maximum allowed value of {} seconds",
                    MAX_SEARCH_TIMEOUT_SECS
                ),
            });
        }

        let request_secs = connection.request_timeout.as_secs();
        if request_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "request timeout must be greater than 0 seconds".to_string(),
            });
        }
        if request_secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "request timeout exceeds maximum allowed value of {} seconds",
                    MAX_REQUEST_TIMEOUT_SECS
                ),
            });
        }

        Ok(())
    }
}

fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. https://localhost:8089): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!(
                "scheme must be http or https (e.g. https://localhost:8089), got: {scheme}"
            ),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "host is required (e.g. https://localhost:8089)".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
