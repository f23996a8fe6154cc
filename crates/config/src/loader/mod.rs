//! Configuration loader for `.env` files, environment variables and overrides.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration.
//! - Load `.env` files on explicit request only.
//!
//! Does NOT handle:
//! - Command-line parsing (see the CLI crate).
//! - Network validation of credentials (see the client crate).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - Environment variables take precedence over `.env` values, since dotenvy
//!   never overwrites variables that are already set.

mod builder;
mod env;
mod error;

#[cfg(test)]
mod tests;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;
