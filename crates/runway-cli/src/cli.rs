//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Runway - See how long your money lasts
#[derive(Parser)]
#[command(name = "runway")]
#[command(about = "Cash-flow forecasting for family finances", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Forecast engine config file (TOML)
    ///
    /// Defaults to ~/.local/share/runway/config/forecast.toml when present,
    /// otherwise the built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate baseline daily spending from history
    Estimate {
        /// Historical transactions (CSV or .json)
        #[arg(long)]
        history: PathBuf,

        /// Expenses above median * multiplier are treated as outliers
        #[arg(long)]
        outlier_multiplier: Option<f64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Project daily balances forward
    Forecast {
        /// Historical transactions (CSV or .json)
        #[arg(long)]
        history: PathBuf,

        /// Planned future transactions (CSV or .json)
        #[arg(long)]
        planned: Option<PathBuf>,

        /// Current account balance
        #[arg(short, long, allow_hyphen_values = true)]
        balance: f64,

        /// First forecast day (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        from: Option<String>,

        /// Last forecast day (YYYY-MM-DD)
        #[arg(long, conflicts_with = "days")]
        to: Option<String>,

        /// Number of days to forecast (default 30)
        #[arg(short, long)]
        days: Option<u32>,

        /// Balances below this are flagged as danger
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        minimum_safe_balance: f64,

        /// Days of spending kept above the minimum before warning
        #[arg(long)]
        buffer_days: Option<u32>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Show forecast days even when confidence is too low to display
        #[arg(long)]
        all: bool,
    },

    /// Show the effective forecast engine configuration
    Config {
        /// Print only the override file location
        #[arg(long)]
        path: bool,
    },
}
