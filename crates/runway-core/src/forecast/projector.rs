//! Daily Forecast Projector
//!
//! Projects a balance forward one calendar day at a time:
//! - Planned income and expenses land exactly on their date
//! - A conservative baseline (estimate * 1.1) is spent every day
//! - Each day is labelled with a risk level and a confidence level

use std::collections::BTreeMap;

use chrono::{Duration, Local, NaiveDate};
use tracing::debug;

use crate::config::ForecastConfig;
use crate::models::{
    Confidence, DailyForecast, DayBreakdown, ForecastResult, PlannedTransaction, RiskLevel,
    SpendingTransaction, TransactionType, UserSettings,
};

use super::estimator::SpendingEstimator;

/// Inputs for a single projection
#[derive(Debug, Clone, Copy)]
pub struct ForecastRequest<'a> {
    pub current_balance: f64,
    pub historical_transactions: &'a [SpendingTransaction],
    pub planned_transactions: &'a [PlannedTransaction],
    pub start_date: NaiveDate,
    /// Inclusive
    pub end_date: NaiveDate,
    pub settings: &'a UserSettings,
}

/// Produces day-by-day balance projections
#[derive(Debug, Clone, Default)]
pub struct ForecastProjector {
    config: ForecastConfig,
}

impl ForecastProjector {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    /// Project using the local calendar date as "today"
    pub fn project(&self, request: ForecastRequest<'_>) -> ForecastResult {
        self.project_as_of(Local::now().date_naive(), request)
    }

    /// Project with an explicit "today" (confidence decays with distance from it)
    pub fn project_as_of(&self, today: NaiveDate, request: ForecastRequest<'_>) -> ForecastResult {
        let estimate =
            SpendingEstimator::from_config(&self.config).estimate(request.historical_transactions);

        if estimate.confidence == Confidence::None {
            debug!(
                days_analyzed = estimate.days_analyzed,
                "Not enough spending history to forecast"
            );
            return ForecastResult::suppressed();
        }

        let spending_confidence = estimate.confidence;
        let conservative_daily_spending =
            estimate.average_daily_spending * self.config.conservative_multiplier;
        let buffer_days = request
            .settings
            .safety_buffer_days
            .unwrap_or(self.config.default_safety_buffer_days);

        let planned = planned_by_date(request.planned_transactions);

        let mut forecasts = Vec::new();
        let mut running_balance = request.current_balance;
        let mut date = request.start_date;

        while date <= request.end_date {
            let (planned_income, planned_expenses) =
                planned.get(&date).copied().unwrap_or((0.0, 0.0));

            let starting_balance = running_balance;
            let ending_balance =
                starting_balance + planned_income - planned_expenses - conservative_daily_spending;

            let risk_level = classify_risk(
                ending_balance,
                request.settings.minimum_safe_balance,
                conservative_daily_spending,
                buffer_days,
            );
            let confidence = self.day_confidence(spending_confidence, (date - today).num_days());

            forecasts.push(DailyForecast {
                date,
                projected_balance: ending_balance,
                confidence,
                risk_level,
                breakdown: DayBreakdown {
                    starting_balance,
                    planned_income,
                    planned_expenses,
                    estimated_daily_spending: conservative_daily_spending,
                    ending_balance,
                },
            });

            running_balance = ending_balance;
            date = match date.checked_add_signed(Duration::days(1)) {
                Some(next) => next,
                None => break,
            };
        }

        let should_display = matches!(spending_confidence, Confidence::Medium | Confidence::High);

        debug!(
            days = forecasts.len(),
            baseline = estimate.average_daily_spending,
            conservative = conservative_daily_spending,
            confidence = spending_confidence.as_str(),
            should_display,
            "Projected balance forecast"
        );

        ForecastResult {
            forecasts,
            average_daily_spending: estimate.average_daily_spending,
            spending_confidence,
            should_display,
        }
    }

    /// Confidence of a single day using this projector's horizons
    pub fn day_confidence(&self, baseline: Confidence, days_ahead: i64) -> Confidence {
        if baseline == Confidence::Low {
            return Confidence::Low;
        }

        if days_ahead > self.config.medium_confidence_horizon_days {
            Confidence::Low
        } else if days_ahead > self.config.high_confidence_horizon_days {
            Confidence::Medium
        } else if baseline == Confidence::High {
            Confidence::High
        } else {
            Confidence::Medium
        }
    }
}

/// Classify a projected balance.
///
/// `danger` below the minimum; `warning` below the minimum plus
/// `buffer_days` of conservative spending; otherwise `safe`.
pub fn classify_risk(
    balance: f64,
    minimum_safe_balance: f64,
    conservative_daily_spending: f64,
    buffer_days: u32,
) -> RiskLevel {
    if balance < minimum_safe_balance {
        RiskLevel::Danger
    } else if balance < minimum_safe_balance + conservative_daily_spending * buffer_days as f64 {
        RiskLevel::Warning
    } else {
        RiskLevel::Safe
    }
}

/// Confidence of a single day with the default horizons (14 / 30 days)
pub fn day_confidence(baseline: Confidence, days_ahead: i64) -> Confidence {
    ForecastProjector::default().day_confidence(baseline, days_ahead)
}

/// Project with default engine configuration; mirrors the classic call shape
pub fn project_forecast(
    current_balance: f64,
    historical_transactions: &[SpendingTransaction],
    planned_transactions: &[PlannedTransaction],
    start_date: NaiveDate,
    end_date: NaiveDate,
    settings: &UserSettings,
) -> ForecastResult {
    ForecastProjector::default().project(ForecastRequest {
        current_balance,
        historical_transactions,
        planned_transactions,
        start_date,
        end_date,
        settings,
    })
}

/// Sum planned (income, expenses) per date
fn planned_by_date(planned: &[PlannedTransaction]) -> BTreeMap<NaiveDate, (f64, f64)> {
    let mut by_date: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for tx in planned {
        let entry = by_date.entry(tx.planned_date).or_insert((0.0, 0.0));
        match tx.transaction_type {
            TransactionType::Income => entry.0 += tx.amount,
            TransactionType::Expense => entry.1 += tx.amount,
        }
    }
    by_date
}
