//! Credential establishment.
//!
//! # Invariants
//! - An API token never triggers a login; it is returned directly.
//! - Missing credential material fails before any network call.
//! - The returned [`Credentials`] are immutable; the connection is not changed.

use tracing::{debug, info};

use crate::auth::{AuthStrategy, Credentials};
use crate::client::Connection;
use crate::endpoints;
use crate::error::{ClientError, Result};

impl Connection {
    /// Establish the credentials used for every later request.
    ///
    /// - API token: returned as [`Credentials::Bearer`], no request sent.
    /// - Username and password: exchanged for a session key at
    ///   `/services/auth/login`, returned as [`Credentials::Session`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if neither a token nor a complete
    /// username/password pair is set.
    /// Returns [`ClientError::AuthFailed`] if the login body reports a failure.
    /// Returns [`ClientError::Decode`] if the login body has no session key.
    pub async fn establish(&self) -> Result<Credentials> {
        match self.auth_strategy() {
            None => Err(ClientError::Config(
                "an API token or both a username and password are required".to_string(),
            )),
            Some(AuthStrategy::ApiToken { token }) => {
                debug!("Using API token authentication");
                Ok(Credentials::Bearer(token))
            }
            Some(AuthStrategy::SessionToken { username, password }) => {
                let key = endpoints::login(&self.http, &self.base_url, &username, &password).await?;
                info!(username = %username, "Session established");
                Ok(Credentials::Session(key))
            }
        }
    }
}
