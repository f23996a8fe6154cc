//! Configuration management for splunkquery.
//!
//! This crate provides the types and loader used to assemble Splunk connection
//! settings from a `.env` file, environment variables and command-line overrides.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{AuthConfig, AuthStrategy, Config, ConnectionConfig};
