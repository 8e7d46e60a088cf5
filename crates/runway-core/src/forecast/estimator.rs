//! Spending Baseline Estimator
//!
//! Turns completed expenses into a robust average daily spending figure:
//! - Median-relative outlier exclusion (one-off purchases don't skew the baseline)
//! - Confidence rating from the day span the data covers
//!
//! Income is ignored entirely. NaN or infinite amounts are not sanitized here;
//! callers must clean them before estimating.

use tracing::debug;

use crate::config::{
    ForecastConfig, DEFAULT_OUTLIER_MULTIPLIER, HIGH_CONFIDENCE_MIN_DAYS,
    MEDIUM_CONFIDENCE_MIN_DAYS,
};
use crate::models::{Confidence, SpendingEstimate, SpendingTransaction};

/// Estimates baseline daily spending from historical transactions
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingEstimator {
    outlier_multiplier: f64,
    medium_min_days: u32,
    high_min_days: u32,
}

impl SpendingEstimator {
    pub fn new(outlier_multiplier: f64) -> Self {
        Self {
            outlier_multiplier,
            medium_min_days: MEDIUM_CONFIDENCE_MIN_DAYS,
            high_min_days: HIGH_CONFIDENCE_MIN_DAYS,
        }
    }

    pub fn from_config(config: &ForecastConfig) -> Self {
        Self {
            outlier_multiplier: config.outlier_multiplier,
            medium_min_days: config.medium_confidence_min_days,
            high_min_days: config.high_confidence_min_days,
        }
    }

    /// Compute the baseline. Never fails; no data yields `Confidence::None`.
    pub fn estimate(&self, transactions: &[SpendingTransaction]) -> SpendingEstimate {
        let expenses: Vec<&SpendingTransaction> =
            transactions.iter().filter(|tx| tx.is_expense()).collect();

        let (Some(first), Some(last)) = (
            expenses.iter().map(|tx| tx.transaction_date).min(),
            expenses.iter().map(|tx| tx.transaction_date).max(),
        ) else {
            return SpendingEstimate::empty();
        };

        let days_analyzed = ((last - first).num_days() + 1) as u32;

        let amounts: Vec<f64> = expenses.iter().map(|tx| tx.amount).collect();
        let median_amount = median(&amounts);
        let threshold = median_amount * self.outlier_multiplier;

        let included: Vec<f64> = amounts
            .iter()
            .copied()
            .filter(|amount| *amount <= threshold)
            .collect();

        // Exclusion that leaves nothing is abandoned rather than reported as "no data"
        let (included, fallback) = if included.is_empty() {
            (amounts.clone(), true)
        } else {
            (included, false)
        };

        let transactions_included = included.len();
        let transactions_excluded = amounts.len() - transactions_included;
        let total_spending: f64 = included.iter().sum();
        let average_daily_spending = total_spending / days_analyzed as f64;

        let confidence = if fallback {
            Confidence::Low
        } else {
            self.confidence_for_span(days_analyzed)
        };

        debug!(
            expenses = amounts.len(),
            included = transactions_included,
            excluded = transactions_excluded,
            days = days_analyzed,
            median = median_amount,
            fallback,
            confidence = confidence.as_str(),
            "Estimated spending baseline"
        );

        SpendingEstimate {
            average_daily_spending,
            confidence,
            days_analyzed,
            transactions_included,
            transactions_excluded,
            total_spending,
            median_amount,
        }
    }

    /// Day-span classification. Never yields `Low`; that level is reserved
    /// for the all-excluded fallback.
    fn confidence_for_span(&self, days: u32) -> Confidence {
        if days < self.medium_min_days {
            Confidence::None
        } else if days < self.high_min_days {
            Confidence::Medium
        } else {
            Confidence::High
        }
    }
}

impl Default for SpendingEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_OUTLIER_MULTIPLIER)
    }
}

/// Estimate with an explicit outlier multiplier (pass
/// [`DEFAULT_OUTLIER_MULTIPLIER`] for the standard behavior)
pub fn estimate_daily_spending(
    transactions: &[SpendingTransaction],
    outlier_multiplier: f64,
) -> SpendingEstimate {
    SpendingEstimator::new(outlier_multiplier).estimate(transactions)
}

/// Standard median (mean of the two middle values for even counts)
fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + Duration::days(offset)
    }

    /// One expense per day for `days` distinct consecutive dates
    fn daily_expenses(days: i64, amount: f64) -> Vec<SpendingTransaction> {
        (0..days)
            .map(|i| SpendingTransaction::expense(amount, day(i)))
            .collect()
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(&[7.0]), 7.0);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_empty_input() {
        let estimate = SpendingEstimator::default().estimate(&[]);
        assert_eq!(estimate, SpendingEstimate::empty());
    }

    #[test]
    fn test_income_only_is_no_data() {
        let transactions: Vec<_> = (0..40)
            .map(|i| SpendingTransaction::income(2500.0, day(i)))
            .collect();

        let estimate = SpendingEstimator::default().estimate(&transactions);
        assert_eq!(estimate.average_daily_spending, 0.0);
        assert_eq!(estimate.confidence, Confidence::None);
        assert_eq!(estimate.transactions_included, 0);
        assert_eq!(estimate.days_analyzed, 0);
    }

    #[test]
    fn test_single_transaction() {
        let estimate =
            SpendingEstimator::default().estimate(&[SpendingTransaction::expense(87.5, day(3))]);

        assert_eq!(estimate.days_analyzed, 1);
        assert_eq!(estimate.average_daily_spending, 87.5);
        assert_eq!(estimate.median_amount, 87.5);
        assert_eq!(estimate.confidence, Confidence::None);
    }

    #[test]
    fn test_same_day_transactions_span_one_day() {
        let transactions = vec![
            SpendingTransaction::expense(10.0, day(0)),
            SpendingTransaction::expense(20.0, day(0)),
        ];
        let estimate = SpendingEstimator::default().estimate(&transactions);
        assert_eq!(estimate.days_analyzed, 1);
        assert_eq!(estimate.average_daily_spending, 30.0);
    }

    #[test]
    fn test_income_does_not_affect_span_or_median() {
        let mut transactions = daily_expenses(14, 50.0);
        transactions.push(SpendingTransaction::income(9000.0, day(-30)));
        transactions.push(SpendingTransaction::income(9000.0, day(60)));

        let estimate = SpendingEstimator::default().estimate(&transactions);
        assert_eq!(estimate.days_analyzed, 14);
        assert_eq!(estimate.median_amount, 50.0);
        assert_eq!(estimate.transactions_included, 14);
    }

    #[test]
    fn test_outlier_excluded() {
        let mut transactions: Vec<_> = (0..14)
            .map(|i| SpendingTransaction::expense(95.0 + (i % 3) as f64 * 5.0, day(i)))
            .collect();
        transactions.push(SpendingTransaction::expense(5000.0, day(7)));

        let estimate = SpendingEstimator::default().estimate(&transactions);
        assert_eq!(estimate.transactions_excluded, 1);
        assert_eq!(estimate.transactions_included, 14);
        assert!(estimate.average_daily_spending < 200.0);
        assert_eq!(estimate.confidence, Confidence::Medium);
    }

    #[test]
    fn test_amount_equal_to_threshold_is_kept() {
        // median 100, threshold 300: exactly 300 stays in
        let transactions = vec![
            SpendingTransaction::expense(100.0, day(0)),
            SpendingTransaction::expense(100.0, day(1)),
            SpendingTransaction::expense(300.0, day(2)),
        ];
        let estimate = SpendingEstimator::default().estimate(&transactions);
        assert_eq!(estimate.transactions_excluded, 0);
        assert_eq!(estimate.total_spending, 500.0);
    }

    #[test]
    fn test_all_excluded_fallback() {
        let transactions = daily_expenses(15, 100.0);

        let estimate = estimate_daily_spending(&transactions, 0.5);
        assert_eq!(estimate.transactions_included, 15);
        assert_eq!(estimate.transactions_excluded, 0);
        assert_eq!(estimate.confidence, Confidence::Low);
        assert_eq!(estimate.total_spending, 1500.0);
        assert_eq!(estimate.average_daily_spending, 100.0);
    }

    #[test]
    fn test_fallback_forces_low_even_with_short_span() {
        let transactions = daily_expenses(3, 40.0);
        let estimate = estimate_daily_spending(&transactions, 0.5);
        assert_eq!(estimate.confidence, Confidence::Low);
    }

    #[test]
    fn test_confidence_thresholds() {
        let estimator = SpendingEstimator::default();
        let expected = [
            (13, Confidence::None),
            (14, Confidence::Medium),
            (29, Confidence::Medium),
            (30, Confidence::High),
        ];

        for (days, confidence) in expected {
            let estimate = estimator.estimate(&daily_expenses(days, 25.0));
            assert_eq!(estimate.days_analyzed, days as u32);
            assert_eq!(estimate.confidence, confidence, "{} days", days);
        }
    }

    #[test]
    fn test_span_counts_gaps() {
        // Two expenses 29 days apart cover 30 days
        let transactions = vec![
            SpendingTransaction::expense(300.0, day(0)),
            SpendingTransaction::expense(300.0, day(29)),
        ];
        let estimate = SpendingEstimator::default().estimate(&transactions);
        assert_eq!(estimate.days_analyzed, 30);
        assert_eq!(estimate.confidence, Confidence::High);
        assert!((estimate.average_daily_spending - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_counts_invariant() {
        let mut transactions = daily_expenses(20, 10.0);
        transactions.push(SpendingTransaction::expense(1000.0, day(5)));
        transactions.push(SpendingTransaction::expense(2000.0, day(6)));
        transactions.push(SpendingTransaction::income(50.0, day(7)));

        let estimate = SpendingEstimator::default().estimate(&transactions);
        assert_eq!(
            estimate.transactions_included + estimate.transactions_excluded,
            22
        );
        assert_eq!(estimate.transactions_excluded, 2);
    }

    #[test]
    fn test_from_config_thresholds() {
        let config = ForecastConfig {
            medium_confidence_min_days: 7,
            high_confidence_min_days: 10,
            ..Default::default()
        };
        let estimator = SpendingEstimator::from_config(&config);

        assert_eq!(
            estimator.estimate(&daily_expenses(7, 5.0)).confidence,
            Confidence::Medium
        );
        assert_eq!(
            estimator.estimate(&daily_expenses(10, 5.0)).confidence,
            Confidence::High
        );
    }
}
