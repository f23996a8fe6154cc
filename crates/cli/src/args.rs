//! Command-line argument definitions.
//!
//! Responsibilities:
//! - Define the `splunkquery` flags and their defaults.
//!
//! Does NOT handle:
//! - Reading `SPLUNK*` environment variables (the config loader does that, so
//!   `.env` values loaded with `-e true` are honoured).
//!
//! Invariants:
//! - Flags given here override environment and `.env` values.

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};
use splunkquery_config::constants::{DEFAULT_OUTPUT_FILE, DEFAULT_QUERY_FILE};

#[derive(Parser, Debug)]
#[command(name = "splunkquery")]
#[command(about = "Run a Splunk search job and save the raw results", long_about = None)]
#[command(version)]
#[command(
    after_help = "Environment:\n  SPLUNKBASEURL, SPLUNKTOKEN or SPLUNKUSERNAME/SPLUNKPASSWORD,\n  SPLUNKTLSVERIFY, SPLUNKTIMEOUT, SPLUNKREQUESTTIMEOUT\n\nExamples:\n  splunkquery -q query.txt -o results.json\n  splunkquery -e true --timeout 300\n"
)]
pub struct Cli {
    /// File holding the search to run
    #[arg(short = 'q', long = "query-file", value_name = "FILE", default_value = DEFAULT_QUERY_FILE)]
    pub query_file: PathBuf,

    /// File receiving the raw results payload
    #[arg(short = 'o', long = "output", value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Load variables from ./.env before reading the environment
    #[arg(
        short = 'e',
        long = "env-file",
        value_name = "BOOL",
        action = ArgAction::Set,
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    pub env_file: bool,

    /// Base URL of the Splunk server (e.g., https://localhost:8089)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Number of one-second status checks before giving up
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long)]
    pub insecure: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
