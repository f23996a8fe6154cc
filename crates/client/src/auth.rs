//! Authentication strategies and established credentials.
//!
//! Responsibilities:
//! - Resolve which strategy applies from raw credential material.
//! - Hold the immutable credential value used to authorize every request
//!   after `establish()`.
//!
//! Invariants:
//! - A non-empty API token always wins over username/password.
//! - Empty strings count as unset.
//! - Secrets never appear in `Debug` output.

use secrecy::{ExposeSecret, SecretString};

/// Strategy for authenticating with Splunk.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Username and password, exchanged for a session key at login.
    SessionToken {
        username: String,
        password: SecretString,
    },
    /// Pre-issued bearer token. No login round-trip.
    ApiToken { token: SecretString },
}

impl AuthStrategy {
    /// Pick a strategy from optional credential material.
    ///
    /// Returns `None` when neither a token nor a complete username/password
    /// pair is available.
    pub fn from_parts(
        token: Option<&SecretString>,
        username: Option<&str>,
        password: Option<&SecretString>,
    ) -> Option<Self> {
        if let Some(token) = token.filter(|t| !t.expose_secret().is_empty()) {
            return Some(Self::ApiToken {
                token: token.clone(),
            });
        }

        match (username, password) {
            (Some(username), Some(password))
                if !username.is_empty() && !password.expose_secret().is_empty() =>
            {
                Some(Self::SessionToken {
                    username: username.to_string(),
                    password: password.clone(),
                })
            }
            _ => None,
        }
    }
}

/// Credentials attached to requests once a session is established.
///
/// Exactly one `Authorization` scheme is derived from each variant.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// `Authorization: Bearer {token}`
    Bearer(SecretString),
    /// `Authorization: Splunk {sessionKey}`
    Session(SecretString),
    /// HTTP Basic. Only used for the login request itself.
    Basic {
        username: String,
        password: SecretString,
    },
}

impl Credentials {
    /// Short label for logging.
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Bearer(_) => "bearer",
            Self::Session(_) => "session",
            Self::Basic { .. } => "basic",
        }
    }
}
