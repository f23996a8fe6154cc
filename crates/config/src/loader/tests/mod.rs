//! Tests for the configuration loader.
//!
//! Invariants:
//! - Tests use `serial_test` and `env_lock()` to prevent environment variable pollution.
//! - Every test starts from an environment with all `SPLUNK*` variables unset.

use std::sync::Mutex;

use crate::constants::{
    ENV_BASE_URL, ENV_PASSWORD, ENV_REQUEST_TIMEOUT, ENV_TIMEOUT, ENV_TLS_VERIFY, ENV_TOKEN,
    ENV_USERNAME,
};


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Build a `temp_env` variable list that clears every config variable and
/// then applies `overrides`.
pub fn hermetic_vars<'a>(
    overrides: &[(&'a str, &'a str)],
) -> Vec<(&'a str, Option<&'a str>)> {
    let mut vars: Vec<(&str, Option<&str>)> = [
        ENV_BASE_URL,
        ENV_USERNAME,
        ENV_PASSWORD,
        ENV_TOKEN,
        ENV_TLS_VERIFY,
        ENV_TIMEOUT,
        ENV_REQUEST_TIMEOUT,
    ]
    .into_iter()
    .filter(|key| !overrides.iter().any(|(k, _)| k == key))
    .map(|key| (key, None))
    .collect();
    vars.extend(overrides.iter().map(|(k, v)| (*k, Some(*v))));
    vars
}
