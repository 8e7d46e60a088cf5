//! Cash-Flow Forecasting
//!
//! Two cooperating pieces, both pure and synchronous:
//!
//! - **Spending Baseline Estimator** - robust average daily spending with a
//!   confidence rating
//! - **Daily Forecast Projector** - day-by-day balance projection combining the
//!   baseline with planned transactions
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use runway_core::forecast::{ForecastProjector, ForecastRequest};
//! use runway_core::models::UserSettings;
//!
//! let settings = UserSettings::new(1000.0);
//! let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
//! let result = ForecastProjector::default().project(ForecastRequest {
//!     current_balance: 5000.0,
//!     historical_transactions: &[],
//!     planned_transactions: &[],
//!     start_date: start,
//!     end_date: start,
//!     settings: &settings,
//! });
//! assert!(!result.should_display);
//! ```

pub mod estimator;
pub mod projector;
pub mod summary;

pub use estimator::{estimate_daily_spending, SpendingEstimator};
pub use projector::{
    classify_risk, day_confidence, project_forecast, ForecastProjector, ForecastRequest,
};
pub use summary::ForecastSummary;
