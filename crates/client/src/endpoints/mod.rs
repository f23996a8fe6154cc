//! REST endpoint implementations.
//!
//! Each function issues exactly one HTTP request and decodes its body.
//! Sequencing and job state live in [`crate::client`].

mod auth;
mod jobs;
pub mod parsing;
mod request;
pub mod url_encoding;

pub use auth::login;
pub use jobs::{create_job, get_dispatch_state, get_results};
pub use request::{call, call_bytes};
pub use url_encoding::encode_path_segment;
