//! Authentication endpoints.

use reqwest::{Client, Method};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::auth::Credentials;
use crate::endpoints::parsing::{LOGIN_FAILED_SENTINELS, contains_sentinel, parse_session_key};
use crate::endpoints::request::call;
use crate::error::{ClientError, Result};

/// Exchange username and password for a session key.
///
/// The request carries the same credentials as HTTP Basic auth.
pub async fn login(
    client: &Client,
    base_url: &str,
    username: &str,
    password: &SecretString,
) -> Result<SecretString> {
    debug!("Logging in to Splunk as {}", username);

    let url = format!("{}/services/auth/login", base_url);
    let credentials = Credentials::Basic {
        username: username.to_string(),
        password: password.clone(),
    };
    let form = [
        ("username", username),
        ("password", password.expose_secret()),
        ("output_mode", "json"),
    ];

    let body = call(client, Method::POST, &url, &form, &credentials).await?;

    if let Some(sentinel) = contains_sentinel(&body, LOGIN_FAILED_SENTINELS) {
        debug!(sentinel, "Login rejected");
        return Err(ClientError::AuthFailed(body));
    }

    parse_session_key(&body)
}
