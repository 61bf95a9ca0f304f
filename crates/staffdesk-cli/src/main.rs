//! Staffdesk - a command line dashboard for employee records.
//!
//! Every command loads the employee collection through the store first, so
//! listings and analytics keep working (on bundled sample data) when the
//! backend is down.

mod cli;
mod commands;
mod render;

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use staffdesk_core::{Config, EmployeeClient, EmployeeStore};

use cli::Cli;

/// Log file prefix inside the configured log directory
const LOG_FILE_PREFIX: &str = "staffdesk.log";

/// Initialize the tracing subscriber for logging.
/// Logs go to stderr unless a log directory is configured, in which case a
/// daily rolling file is used and the returned guard must be kept alive.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(filter)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(filter)
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;
    let _log_guard = init_tracing(config.log_dir.as_deref());

    let base_url = cli
        .api_url
        .clone()
        .unwrap_or_else(|| config.api_base_url());
    info!(base_url = %base_url, "Staffdesk starting");

    let client = EmployeeClient::new(&base_url, config.request_timeout())?;
    let store = EmployeeStore::new(client);

    commands::run(cli, &config, &store).await
}
