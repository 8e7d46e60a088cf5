//! Runway CLI - Cash-flow forecasting
//!
//! Usage:
//!   runway estimate --history history.csv
//!   runway forecast --history history.csv --planned planned.csv --balance 5000
//!   runway config

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Estimate {
            history,
            outlier_multiplier,
            json,
        } => commands::cmd_estimate(&config, &history, outlier_multiplier, json),
        Commands::Forecast {
            history,
            planned,
            balance,
            from,
            to,
            days,
            minimum_safe_balance,
            buffer_days,
            json,
            all,
        } => {
            let range = commands::resolve_range(
                from.as_deref(),
                to.as_deref(),
                days,
                chrono::Local::now().date_naive(),
            )?;
            let options = commands::ForecastOptions {
                history,
                planned,
                balance,
                range,
                minimum_safe_balance,
                buffer_days,
                json,
                show_all: all,
            };
            commands::cmd_forecast(&config, &options)
        }
        Commands::Config { path } => commands::cmd_config(&config, cli.config.as_deref(), path),
    }
}
