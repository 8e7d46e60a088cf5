//! Forecast engine configuration
//!
//! Operator-level tuning for the estimator and projector. These values are
//! not part of [`UserSettings`](crate::models::UserSettings): users pick their
//! own minimum balance and buffer, the engine picks everything else.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/runway/config/forecast.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/forecast.toml");

/// Expenses above `median * OUTLIER_MULTIPLIER` are excluded from the baseline
pub const DEFAULT_OUTLIER_MULTIPLIER: f64 = 3.0;

/// Safety margin applied to the baseline before projecting
pub const CONSERVATIVE_MULTIPLIER: f64 = 1.1;

/// Warning buffer used when the user has not set one
pub const DEFAULT_SAFETY_BUFFER_DAYS: u32 = 7;

pub const MEDIUM_CONFIDENCE_MIN_DAYS: u32 = 14;
pub const HIGH_CONFIDENCE_MIN_DAYS: u32 = 30;

pub const HIGH_CONFIDENCE_HORIZON_DAYS: i64 = 14;
pub const MEDIUM_CONFIDENCE_HORIZON_DAYS: i64 = 30;

/// Tuning knobs for the forecasting pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastConfig {
    pub outlier_multiplier: f64,
    /// Day span needed for a `medium` baseline
    pub medium_confidence_min_days: u32,
    /// Day span needed for a `high` baseline
    pub high_confidence_min_days: u32,
    pub conservative_multiplier: f64,
    pub default_safety_buffer_days: u32,
    /// Days ahead that can still be `high`
    pub high_confidence_horizon_days: i64,
    /// Days ahead that can still be `medium`
    pub medium_confidence_horizon_days: i64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            outlier_multiplier: DEFAULT_OUTLIER_MULTIPLIER,
            medium_confidence_min_days: MEDIUM_CONFIDENCE_MIN_DAYS,
            high_confidence_min_days: HIGH_CONFIDENCE_MIN_DAYS,
            conservative_multiplier: CONSERVATIVE_MULTIPLIER,
            default_safety_buffer_days: DEFAULT_SAFETY_BUFFER_DAYS,
            high_confidence_horizon_days: HIGH_CONFIDENCE_HORIZON_DAYS,
            medium_confidence_horizon_days: MEDIUM_CONFIDENCE_HORIZON_DAYS,
        }
    }
}

impl ForecastConfig {
    /// Load from the default override location, falling back to embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit path (embedded defaults if the file does not exist)
    pub fn load_from(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }

    /// Render the effective configuration in the same layout as the config file
    pub fn to_toml(&self) -> Result<String> {
        let raw = RawConfig {
            estimator: Some(RawEstimator {
                outlier_multiplier: Some(self.outlier_multiplier),
                medium_confidence_min_days: Some(self.medium_confidence_min_days),
                high_confidence_min_days: Some(self.high_confidence_min_days),
            }),
            projector: Some(RawProjector {
                conservative_multiplier: Some(self.conservative_multiplier),
                default_safety_buffer_days: Some(self.default_safety_buffer_days),
                high_confidence_horizon_days: Some(self.high_confidence_horizon_days),
                medium_confidence_horizon_days: Some(self.medium_confidence_horizon_days),
            }),
        };
        toml::to_string_pretty(&raw)
            .map_err(|e| Error::Config(format!("Failed to render config: {}", e)))
    }

    /// Check invariants the pipeline relies on
    pub fn validate(&self) -> Result<()> {
        if self.outlier_multiplier.is_nan() || self.outlier_multiplier <= 0.0 {
            return Err(Error::Config(format!(
                "outlier_multiplier must be positive, got {}",
                self.outlier_multiplier
            )));
        }
        if self.conservative_multiplier.is_nan() || self.conservative_multiplier <= 0.0 {
            return Err(Error::Config(format!(
                "conservative_multiplier must be positive, got {}",
                self.conservative_multiplier
            )));
        }
        if self.medium_confidence_min_days > self.high_confidence_min_days {
            return Err(Error::Config(format!(
                "medium_confidence_min_days ({}) exceeds high_confidence_min_days ({})",
                self.medium_confidence_min_days, self.high_confidence_min_days
            )));
        }
        if self.high_confidence_horizon_days > self.medium_confidence_horizon_days {
            return Err(Error::Config(format!(
                "high_confidence_horizon_days ({}) exceeds medium_confidence_horizon_days ({})",
                self.high_confidence_horizon_days, self.medium_confidence_horizon_days
            )));
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("runway").join("config").join("forecast.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<ForecastConfig> {
    let path = match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    let content = match path {
        Some(ref path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading forecast config override");
            fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Default, Deserialize, Serialize)]
struct RawConfig {
    estimator: Option<RawEstimator>,
    projector: Option<RawProjector>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RawEstimator {
    outlier_multiplier: Option<f64>,
    medium_confidence_min_days: Option<u32>,
    high_confidence_min_days: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RawProjector {
    conservative_multiplier: Option<f64>,
    default_safety_buffer_days: Option<u32>,
    high_confidence_horizon_days: Option<i64>,
    medium_confidence_horizon_days: Option<i64>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<ForecastConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = ForecastConfig::default();

    if let Some(estimator) = raw.estimator {
        if let Some(multiplier) = estimator.outlier_multiplier {
            config.outlier_multiplier = multiplier;
        }
        if let Some(days) = estimator.medium_confidence_min_days {
            config.medium_confidence_min_days = days;
        }
        if let Some(days) = estimator.high_confidence_min_days {
            config.high_confidence_min_days = days;
        }
    }

    if let Some(projector) = raw.projector {
        if let Some(multiplier) = projector.conservative_multiplier {
            config.conservative_multiplier = multiplier;
        }
        if let Some(days) = projector.default_safety_buffer_days {
            config.default_safety_buffer_days = days;
        }
        if let Some(days) = projector.high_confidence_horizon_days {
            config.high_confidence_horizon_days = days;
        }
        if let Some(days) = projector.medium_confidence_horizon_days {
            config.medium_confidence_horizon_days = days;
        }
    }

    config.validate()?;
    Ok(config)
}
