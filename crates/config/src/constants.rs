//! Centralized constants for the splunkquery workspace.
//!
//! Default values shared by the config, client and CLI crates live here so the
//! numbers are defined once.

// =============================================================================
// Environment Variables
// =============================================================================

/// Base URL of the Splunk management API.
pub const ENV_BASE_URL: &str = "SPLUNKBASEURL";

/// Username for session-key authentication.
pub const ENV_USERNAME: &str = "SPLUNKUSERNAME";

/// Password for session-key authentication.
pub const ENV_PASSWORD: &str = "SPLUNKPASSWORD";

/// Pre-issued bearer token. Takes precedence over username/password.
pub const ENV_TOKEN: &str = "SPLUNKTOKEN";

/// Whether to verify the server's TLS certificate.
pub const ENV_TLS_VERIFY: &str = "SPLUNKTLSVERIFY";

/// Search completion budget in seconds.
pub const ENV_TIMEOUT: &str = "SPLUNKTIMEOUT";

/// HTTP connect and per-read timeout in seconds.
pub const ENV_REQUEST_TIMEOUT: &str = "SPLUNKREQUESTTIMEOUT";

/// Dotenv file read from the working directory when requested.
pub const DOTENV_FILE: &str = ".env";

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default number of one-second status checks before a search is abandoned.
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 120;

/// Maximum accepted search budget (24 hours).
pub const MAX_SEARCH_TIMEOUT_SECS: u64 = 86_400;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed HTTP request timeout in seconds (1 hour).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// TLS certificates are verified unless explicitly disabled.
pub const DEFAULT_TLS_VERIFY: bool = true;

// =============================================================================
// Polling & Output Defaults
// =============================================================================

/// Delay between job status checks in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default file holding the search to run.
pub const DEFAULT_QUERY_FILE: &str = "query.txt";

/// Default file receiving the raw results payload.
pub const DEFAULT_OUTPUT_FILE: &str = "splunkresults.json";
