//! Runway Core Library
//!
//! Cash-flow forecasting for the Runway family finance tracker:
//! - Spending baseline estimation with outlier exclusion
//! - Day-by-day balance projection with risk and confidence labels
//! - Forecast summaries for dashboard widgets
//! - Engine configuration with embedded defaults and override files
//! - CSV/JSON import of historical and planned transactions
//!
//! Estimation and projection are pure functions over in-memory records.
//! They never fail: sparse or missing data degrades the reported confidence
//! instead of raising an error.

pub mod config;
pub mod error;
pub mod forecast;
pub mod import;
pub mod models;

pub use config::ForecastConfig;
pub use error::{Error, Result};
pub use forecast::{
    estimate_daily_spending, project_forecast, ForecastProjector, ForecastRequest,
    ForecastSummary, SpendingEstimator,
};
pub use models::{
    Confidence, DailyForecast, DayBreakdown, ForecastResult, PlannedTransaction, RiskLevel,
    SpendingEstimate, SpendingTransaction, TransactionType, UserSettings,
};
