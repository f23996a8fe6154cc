//! Response body decoding for the login, dispatch and job status endpoints.
//!
//! Responsibilities:
//! - Detect authentication failure sentinels in raw bodies.
//! - Extract the session key (JSON), the sid (XML) and the dispatch state (XML).
//!
//! Invariants:
//! - XML elements are matched on local names; namespace prefixes are ignored.
//! - A document whose root element is not the expected one is a decode error.
//! - Content after the root element closes is ignored.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use secrecy::SecretString;
use serde::Deserialize;

use crate::error::{ClientError, Result};

/// Substrings that mark a failed login, whatever the HTTP status.
pub const LOGIN_FAILED_SENTINELS: &[&str] = &["Login failed", "Unauthorized"];

/// Substrings that mark a rejected dispatch, whatever the HTTP status.
pub const DISPATCH_FAILED_SENTINELS: &[&str] = &["Unauthorized"];

/// Return the first sentinel contained in `body`.
pub fn contains_sentinel(body: &str, sentinels: &[&'static str]) -> Option<&'static str> {
    sentinels.iter().copied().find(|s| body.contains(s))
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(rename = "sessionKey")]
    session_key: Option<String>,
}

/// Extract `sessionKey` from a login response body.
pub fn parse_session_key(body: &str) -> Result<SecretString> {
    let response: LoginResponse = serde_json::from_str(body)
        .map_err(|e| ClientError::Decode(format!("Failed to parse login response: {e}")))?;

    match response.session_key {
        Some(key) if !key.is_empty() => Ok(SecretString::new(key.into())),
        _ => Err(ClientError::Decode(
            "Missing sessionKey in login response".to_string(),
        )),
    }
}

/// Extract the job id from a `<response><sid>..</sid></response>` document.
pub fn parse_sid(body: &str) -> Result<String> {
    let sids = collect_text(body, "response", |path| {
        path.len() == 2 && path[1].name == "sid"
    })?;

    sids.into_iter()
        .map(|sid| sid.trim().to_string())
        .find(|sid| !sid.is_empty())
        .ok_or_else(|| ClientError::Decode("Missing sid in dispatch response".to_string()))
}

/// Extract `dispatchState` from an `<entry>` job status document.
///
/// Only the top-level `content/dict/key` entries are considered, so nested
/// dictionaries (performance counters, request parameters) cannot shadow it.
/// Returns `Ok(None)` when the document has no such key.
pub fn parse_dispatch_state(body: &str) -> Result<Option<String>> {
    let states = collect_text(body, "entry", |path| {
        path.len() == 4
            && path[1].name == "content"
            && path[2].name == "dict"
            && path[3].name == "key"
            && path[3].key_name.as_deref() == Some("dispatchState")
    })?;

    let states: Vec<String> = states.into_iter().map(|s| s.trim().to_string()).collect();
    let done = states
        .iter()
        .position(|s| s == crate::models::DISPATCH_STATE_DONE);

    Ok(match done {
        Some(idx) => states.into_iter().nth(idx),
        None => states.into_iter().last(),
    })
}

/// An open element on the path from the document root.
struct Element {
    name: String,
    /// Value of the `name` attribute, as used by `<s:key name="...">`.
    key_name: Option<String>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

        let mut key_name = None;
        for attr in start.attributes() {
            let attr = attr.map_err(|e| ClientError::Decode(format!("Malformed XML attribute: {e}")))?;
            if attr.key.local_name().as_ref() == b"name" {
                let value = attr
                    .unescape_value()
                    .map_err(|e| ClientError::Decode(format!("Malformed XML attribute: {e}")))?;
                key_name = Some(value.into_owned());
            }
        }

        Ok(Self { name, key_name })
    }
}

/// Walk `body` and collect the direct text content of every element whose
/// path from the root satisfies `wanted`.
fn collect_text<F>(body: &str, root: &str, wanted: F) -> Result<Vec<String>>
where
    F: Fn(&[Element]) -> bool,
{
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut path: Vec<Element> = Vec::new();
    let mut found: Vec<String> = Vec::new();
    let mut capture_depth: Option<usize> = None;
    let mut root_seen = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            ClientError::Decode(format!(
                "Malformed XML at position {}: {e}",
                reader.error_position()
            ))
        })?;

        match event {
            Event::Start(ref start) | Event::Empty(ref start) => {
                let element = Element::from_start(start)?;
                if path.is_empty() {
                    if element.name != root {
                        return Err(ClientError::Decode(format!(
                            "Expected <{root}> document, found <{}>",
                            element.name
                        )));
                    }
                    root_seen = true;
                }

                path.push(element);
                if capture_depth.is_none() && wanted(&path) {
                    found.push(String::new());
                    capture_depth = Some(path.len());
                }

                if matches!(event, Event::Empty(_)) {
                    if capture_depth == Some(path.len()) {
                        capture_depth = None;
                    }
                    path.pop();
                    if path.is_empty() {
                        break;
                    }
                }
            }
            Event::Text(text) => {
                if capture_depth == Some(path.len())
                    && let Some(current) = found.last_mut()
                {
                    let text = text
                        .unescape()
                        .map_err(|e| ClientError::Decode(format!("Malformed XML text: {e}")))?;
                    current.push_str(&text);
                }
            }
            Event::CData(data) => {
                if capture_depth == Some(path.len())
                    && let Some(current) = found.last_mut()
                {
                    current.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                if capture_depth == Some(path.len()) {
                    capture_depth = None;
                }
                path.pop();
                if path.is_empty() {
                    break;
                }
            }
            Event::Eof => {
                if !root_seen {
                    return Err(ClientError::Decode(format!(
                        "Expected <{root}> document, found no root element"
                    )));
                }
                return Err(ClientError::Decode(
                    "Unexpected end of XML document".to_string(),
                ));
            }
            _ => {}
        }
    }

    Ok(found)
}
