//! Headline figures for forecast widgets

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ForecastResult, RiskLevel};

/// Condensed view of a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: usize,
    pub starting_balance: f64,
    pub ending_balance: f64,
    pub lowest_balance: f64,
    /// Earliest day the lowest balance is reached
    pub lowest_balance_date: NaiveDate,
    /// First day at `warning` or worse
    pub first_warning_date: Option<NaiveDate>,
    pub first_danger_date: Option<NaiveDate>,
    pub safe_days: usize,
    pub warning_days: usize,
    pub danger_days: usize,
    pub total_planned_income: f64,
    pub total_planned_expenses: f64,
    pub total_estimated_spending: f64,
}

impl ForecastSummary {
    /// Summarize a result; `None` when there are no forecast days
    pub fn from_result(result: &ForecastResult) -> Option<Self> {
        let first = result.forecasts.first()?;
        let last = result.forecasts.last()?;

        let mut summary = Self {
            start_date: first.date,
            end_date: last.date,
            days: result.forecasts.len(),
            starting_balance: first.breakdown.starting_balance,
            ending_balance: last.breakdown.ending_balance,
            lowest_balance: first.projected_balance,
            lowest_balance_date: first.date,
            first_warning_date: None,
            first_danger_date: None,
            safe_days: 0,
            warning_days: 0,
            danger_days: 0,
            total_planned_income: 0.0,
            total_planned_expenses: 0.0,
            total_estimated_spending: 0.0,
        };

        for day in &result.forecasts {
            if day.projected_balance < summary.lowest_balance {
                summary.lowest_balance = day.projected_balance;
                summary.lowest_balance_date = day.date;
            }

            match day.risk_level {
                RiskLevel::Safe => summary.safe_days += 1,
                RiskLevel::Warning => summary.warning_days += 1,
                RiskLevel::Danger => summary.danger_days += 1,
            }

            if day.risk_level != RiskLevel::Safe && summary.first_warning_date.is_none() {
                summary.first_warning_date = Some(day.date);
            }
            if day.risk_level == RiskLevel::Danger && summary.first_danger_date.is_none() {
                summary.first_danger_date = Some(day.date);
            }

            summary.total_planned_income += day.breakdown.planned_income;
            summary.total_planned_expenses += day.breakdown.planned_expenses;
            summary.total_estimated_spending += day.breakdown.estimated_daily_spending;
        }

        Some(summary)
    }

    /// Worst risk level reached anywhere in the range
    pub fn worst_risk(&self) -> RiskLevel {
        if self.danger_days > 0 {
            RiskLevel::Danger
        } else if self.warning_days > 0 {
            RiskLevel::Warning
        } else {
            RiskLevel::Safe
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Confidence, DailyForecast, DayBreakdown};
    use chrono::Duration;

    fn day(
        offset: i64,
        start: f64,
        income: f64,
        expenses: f64,
        risk: RiskLevel,
    ) -> DailyForecast {
        let ending = start + income - expenses - 50.0;
        DailyForecast {
            date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap() + Duration::days(offset),
            projected_balance: ending,
            confidence: Confidence::High,
            risk_level: risk,
            breakdown: DayBreakdown {
                starting_balance: start,
                planned_income: income,
                planned_expenses: expenses,
                estimated_daily_spending: 50.0,
                ending_balance: ending,
            },
        }
    }

    #[test]
    fn test_empty_result_has_no_summary() {
        assert!(ForecastSummary::from_result(&ForecastResult::suppressed()).is_none());
    }

    #[test]
    fn test_summary_figures() {
        let forecasts = vec![
            day(0, 1000.0, 0.0, 0.0, RiskLevel::Safe),     // 950
            day(1, 950.0, 0.0, 400.0, RiskLevel::Warning), // 500
            day(2, 500.0, 0.0, 300.0, RiskLevel::Danger),  // 150
            day(3, 150.0, 900.0, 0.0, RiskLevel::Safe),    // 1000
        ];
        let result = ForecastResult {
            forecasts,
            average_daily_spending: 45.45,
            spending_confidence: Confidence::High,
            should_display: true,
        };

        let summary = ForecastSummary::from_result(&result).unwrap();
        assert_eq!(summary.days, 4);
        assert_eq!(summary.starting_balance, 1000.0);
        assert_eq!(summary.ending_balance, 1000.0);
        assert_eq!(summary.lowest_balance, 150.0);
        assert_eq!(summary.lowest_balance_date, result.forecasts[2].date);
        assert_eq!(summary.first_warning_date, Some(result.forecasts[1].date));
        assert_eq!(summary.first_danger_date, Some(result.forecasts[2].date));
        assert_eq!(
            (summary.safe_days, summary.warning_days, summary.danger_days),
            (2, 1, 1)
        );
        assert_eq!(summary.total_planned_income, 900.0);
        assert_eq!(summary.total_planned_expenses, 700.0);
        assert_eq!(summary.total_estimated_spending, 200.0);
        assert_eq!(summary.worst_risk(), RiskLevel::Danger);
    }

    #[test]
    fn test_danger_first_sets_warning_date_too() {
        let result = ForecastResult {
            forecasts: vec![day(0, 10.0, 0.0, 0.0, RiskLevel::Danger)],
            average_daily_spending: 45.0,
            spending_confidence: Confidence::Medium,
            should_display: true,
        };
        let summary = ForecastSummary::from_result(&result).unwrap();
        assert_eq!(summary.first_warning_date, summary.first_danger_date);
    }
}
