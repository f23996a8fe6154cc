//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for all configuration loading failures.
//!
//! Invariants:
//! - All error variants include context for debugging (variable names, etc.).
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Missing BaseURL. Set SPLUNKBASEURL or pass --base-url.")]
    MissingBaseUrl,

    #[error("Missing Username. Set SPLUNKUSERNAME or provide SPLUNKTOKEN.")]
    MissingUsername,

    #[error("Missing Password. Set SPLUNKPASSWORD or provide SPLUNKTOKEN.")]
    MissingPassword,

    #[error("invalid timeout: {message}")]
    InvalidTimeout { message: String },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error("Failed to parse .env file at position {error_index}")]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error (including a missing file).
    #[error("Error loading .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error("Error loading .env file")]
    DotenvUnknown,
}
