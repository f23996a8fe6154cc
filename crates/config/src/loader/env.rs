//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse the `SPLUNK*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid boolean or numeric values return ConfigError::InvalidValue.
//! - A negative search timeout is clamped to zero (immediate timeout).

use secrecy::SecretString;
use std::time::Duration;
use tracing::warn;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::{
    ENV_BASE_URL, ENV_PASSWORD, ENV_REQUEST_TIMEOUT, ENV_TIMEOUT, ENV_TLS_VERIFY, ENV_TOKEN,
    ENV_USERNAME,
};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse a boolean the way operators tend to write them in shell environments.
fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be true or false".to_string(),
        }),
    }
}

/// Parse the search budget. Negative values mean "do not wait at all".
fn parse_search_timeout(value: &str) -> Result<u64, ConfigError> {
    let secs: i64 = value.parse().map_err(|_| ConfigError::InvalidValue {
        var: ENV_TIMEOUT.to_string(),
        message: "must be a whole number of seconds".to_string(),
    })?;

    if secs < 0 {
        warn!(
            timeout = secs,
            "{} is negative; the search will time out without polling", ENV_TIMEOUT
        );
    }

    Ok(u64::try_from(secs).unwrap_or(0))
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none(ENV_BASE_URL) {
        loader.set_base_url(Some(url));
    }
    if let Some(username) = env_var_or_none(ENV_USERNAME) {
        loader.set_username(Some(username));
    }
    if let Some(password) = env_var_or_none(ENV_PASSWORD) {
        loader.set_password(Some(SecretString::new(password.into())));
    }
    if let Some(token) = env_var_or_none(ENV_TOKEN) {
        loader.set_api_token(Some(SecretString::new(token.into())));
    }
    if let Some(verify) = env_var_or_none(ENV_TLS_VERIFY) {
        loader.set_tls_verify(Some(parse_bool(ENV_TLS_VERIFY, &verify)?));
    }
    if let Some(timeout) = env_var_or_none(ENV_TIMEOUT) {
        loader.set_search_timeout_secs(Some(parse_search_timeout(&timeout)?));
    }
    if let Some(timeout) = env_var_or_none(ENV_REQUEST_TIMEOUT) {
        let secs: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
            var: ENV_REQUEST_TIMEOUT.to_string(),
            message: "must be a number".to_string(),
        })?;
        loader.set_request_timeout(Some(Duration::from_secs(secs)));
    }

    Ok(())
}
