//! Single-shot HTTP transport.
//!
//! Responsibilities:
//! - Attach exactly one `Authorization` header derived from [`Credentials`].
//! - Send POST parameters form-encoded in the body and GET parameters in the
//!   query string.
//! - Return the raw body without interpreting the HTTP status.
//!
//! Does NOT handle:
//! - Retries. Every failure is returned to the caller as-is.

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder};
use secrecy::ExposeSecret;
use tracing::debug;

use crate::auth::Credentials;
use crate::error::Result;

/// Attach the authorization scheme for `credentials` to `builder`.
pub(crate) fn apply_auth(builder: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
    match credentials {
        Credentials::Bearer(token) => {
            builder.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()))
        }
        Credentials::Session(key) => {
            builder.header(AUTHORIZATION, format!("Splunk {}", key.expose_secret()))
        }
        Credentials::Basic { username, password } => {
            builder.basic_auth(username, Some(password.expose_secret()))
        }
    }
}

/// Send a request and return the body as raw bytes.
///
/// # Errors
///
/// Returns [`crate::ClientError::Transport`] if the request cannot be built or
/// sent, or the body cannot be read.
pub async fn call_bytes(
    http: &Client,
    method: Method,
    url: &str,
    params: &[(&str, &str)],
    credentials: &Credentials,
) -> Result<Vec<u8>> {
    let mut builder = http.request(method.clone(), url);
    if !params.is_empty() {
        builder = if method == Method::GET {
            builder.query(params)
        } else {
            builder.form(params)
        };
    }
    let builder = apply_auth(builder, credentials);

    let response = builder.send().await?;
    debug!(
        %method,
        url,
        status = response.status().as_u16(),
        auth = credentials.scheme(),
        "Response received"
    );

    let body = response.bytes().await?;
    Ok(body.to_vec())
}

/// Send a request and return the body as text.
///
/// Invalid UTF-8 is replaced rather than rejected; callers only search the
/// body for sentinels and decode JSON or XML from it.
pub async fn call(
    http: &Client,
    method: Method,
    url: &str,
    params: &[(&str, &str)],
    credentials: &Credentials,
) -> Result<String> {
    let body = call_bytes(http, method, url, params, credentials).await?;
    Ok(match String::from_utf8(body) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}
