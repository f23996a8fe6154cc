//! splunkquery - run one Splunk search job and save its raw results.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Install logging and Ctrl+C handling.
//! - Run the search and translate the outcome into a structured exit code.
//!
//! Does NOT handle:
//! - REST API implementation (see `crates/client`).
//! - Interpreting the results payload; it is written as received.

mod args;
mod cancellation;
mod error;
mod query;

use args::{Cli, LogFormat};
use cancellation::{is_cancelled_error, print_cancelled_message, spawn_ctrl_c_handler};
use clap::Parser;
use error::{ExitCode, ExitCodeExt};
use splunkquery_client::CancellationToken;
use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_ansi(std::io::stdout().is_terminal()))
            .init(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    let cancel = CancellationToken::new();
    spawn_ctrl_c_handler(cancel.clone());

    let exit_code = match query::run(cli, &cancel).await {
        Ok(_) => {
            tracing::info!("SUCCESS: Query Completed");
            ExitCode::Success
        }
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            tracing::error!("ERROR: {:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
