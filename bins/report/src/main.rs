//! Properly command-line reports.
//!
//! Loads a portfolio snapshot and prints the rent roll, reports, owner
//! financials and the manager dashboard.

mod cli;
mod commands;
mod render;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use properly_shared::{AppConfig, AppError};
use properly_shared::config::LoggingConfig;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            let code = err
                .downcast_ref::<AppError>()
                .map_or(1, AppError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().map_err(AppError::from)?;
    init_tracing(&config.logging);

    commands::run(cli, config)
}

/// Logs go to stderr so stdout stays clean for CSV and JSON.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
