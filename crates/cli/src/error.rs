//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ClientError` and `ConfigError` variants to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-7 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use splunkquery_client::ClientError;
use splunkquery_config::ConfigError;

/// Structured exit codes for splunkquery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Search completed and results were written.
    Success = 0,

    /// Unhandled or generic failure.
    GeneralError = 1,

    /// Credentials were rejected by the server.
    AuthenticationFailed = 2,

    /// Network, DNS or TLS failure.
    ConnectionError = 3,

    /// Missing or invalid configuration. Raised before any network call.
    ConfigError = 4,

    /// The server answered with a body that could not be decoded.
    DecodeError = 5,

    /// The search did not finish within its status check budget.
    Timeout = 6,

    /// The query file could not be read or the results file could not be written.
    IoError = 7,

    /// Interrupted by SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::AuthFailed(_) => ExitCode::AuthenticationFailed,
            ClientError::Transport { .. } => ExitCode::ConnectionError,
            ClientError::Config(_) | ClientError::InvalidUrl(_) => ExitCode::ConfigError,
            ClientError::Decode(_) => ExitCode::DecodeError,
            ClientError::Timeout { .. } => ExitCode::Timeout,
            ClientError::Persist { .. } => ExitCode::IoError,
            ClientError::Cancelled => ExitCode::Interrupted,
            ClientError::JobNotDone { .. }
            | ClientError::EmptyResults { .. }
            | ClientError::Worker(_) => ExitCode::GeneralError,
        }
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(_: &ConfigError) -> Self {
        ExitCode::ConfigError
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error type is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(config_err);
            }
            if cause.downcast_ref::<std::io::Error>().is_some() {
                return ExitCode::IoError;
            }
        }

        ExitCode::GeneralError
    }
}
