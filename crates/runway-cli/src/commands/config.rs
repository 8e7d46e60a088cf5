//! Config command and shared config loading

use std::path::Path;

use anyhow::{Context, Result};
use runway_core::config::{default_config_path, ForecastConfig};

/// Load the engine config from `--config`, the override location, or defaults
pub fn load_config(path: Option<&Path>) -> Result<ForecastConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            ForecastConfig::load_from(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        None => ForecastConfig::load().context("Failed to load forecast config"),
    }
}

pub fn cmd_config(config: &ForecastConfig, explicit: Option<&Path>, path_only: bool) -> Result<()> {
    let source = explicit
        .map(Path::to_path_buf)
        .or_else(default_config_path);

    if path_only {
        match source {
            Some(path) => println!("{}", path.display()),
            None => println!("(no data directory available)"),
        }
        return Ok(());
    }

    match source {
        Some(ref path) if path.exists() => println!("# Loaded from {}", path.display()),
        Some(ref path) => println!("# Built-in defaults (override: {})", path.display()),
        None => println!("# Built-in defaults"),
    }
    print!("{}", config.to_toml()?);

    Ok(())
}
