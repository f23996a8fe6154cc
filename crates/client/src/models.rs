//! Search query and job lifecycle types.
//!
//! Responsibilities:
//! - Hold the immutable search text.
//! - Track one job's sid, lifecycle state and result bytes.
//!
//! Invariants:
//! - A job starts in `Dispatched` and only the poller moves it.
//! - Once a terminal state (`Done`, `Error`, `Timeout`) is reached it is never
//!   left again.
//! - Result bytes are present only when the state is `Done`.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// Dispatch state the server reports for a finished job.
pub const DISPATCH_STATE_DONE: &str = "DONE";

/// Redact a query string for logging, showing only length and a short hash prefix.
///
/// Lets operators correlate log lines without exposing query content.
pub fn redact_query(query: &str) -> String {
    let mut hasher = DefaultHasher::new();
    query.hash(&mut hasher);
    let hash = hasher.finish();
    format!("<{} chars, hash={:08x}>", query.len(), hash)
}

/// A search to submit. Sent once, never modified.
#[derive(Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SearchQuery({})", redact_query(&self.0))
    }
}

/// Lifecycle state of a search job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    /// Submitted; no status check has answered yet.
    Dispatched,
    /// Any intermediate dispatch state reported by the server, kept verbatim
    /// (`QUEUED`, `PARSING`, `RUNNING`, `FINALIZING`, ...).
    Reported(String),
    Done,
    Error,
    Timeout,
}

impl JobState {
    /// Map a server-reported `dispatchState` value onto a job state.
    pub fn from_dispatch_state(value: &str) -> Self {
        if value == DISPATCH_STATE_DONE {
            Self::Done
        } else {
            Self::Reported(value.to_string())
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error | Self::Timeout)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatched => f.write_str("DISPATCHED"),
            Self::Reported(state) => f.write_str(state),
            Self::Done => f.write_str("DONE"),
            Self::Error => f.write_str("ERROR"),
            Self::Timeout => f.write_str("TIMEOUT"),
        }
    }
}

/// A dispatched search job.
#[derive(Debug, Clone)]
pub struct SearchJob {
    sid: String,
    state: JobState,
    results: Option<Vec<u8>>,
}

impl SearchJob {
    /// Create a job for a sid the server just handed out.
    pub fn new(sid: impl Into<String>) -> Self {
        Self {
            sid: sid.into(),
            state: JobState::Dispatched,
            results: None,
        }
    }

    pub fn sid(&self) -> &str {
        &self.sid
    }

    pub fn state(&self) -> &JobState {
        &self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == JobState::Done
    }

    /// Raw results payload, if it has been fetched.
    pub fn results(&self) -> Option<&[u8]> {
        self.results.as_deref()
    }

    /// Move the job to `next`. Transitions out of a terminal state are ignored.
    pub(crate) fn set_state(&mut self, next: JobState) {
        if self.state.is_terminal() {
            debug!(sid = %self.sid, state = %self.state, ignored = %next, "Job already terminal");
            return;
        }
        if self.state != next {
            debug!(sid = %self.sid, from = %self.state, to = %next, "Job state transition");
            self.state = next;
        }
    }

    pub(crate) fn set_results(&mut self, bytes: Vec<u8>) {
        self.results = Some(bytes);
    }

    pub(crate) fn clear_results(&mut self) {
        self.results = None;
    }
}
