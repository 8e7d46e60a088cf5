//! Estimate command implementation

use std::path::Path;

use anyhow::{Context, Result};
use runway_core::import::load_spending_transactions;
use runway_core::{Confidence, ForecastConfig, SpendingEstimate, SpendingEstimator};

use super::format_money;

/// Estimate baseline spending for a history file
pub fn estimate_file(
    config: &ForecastConfig,
    history: &Path,
    outlier_multiplier: Option<f64>,
) -> Result<SpendingEstimate> {
    let transactions = load_spending_transactions(history)
        .with_context(|| format!("Failed to load history from {}", history.display()))?;

    let mut config = config.clone();
    if let Some(multiplier) = outlier_multiplier {
        if multiplier.is_nan() || multiplier <= 0.0 {
            anyhow::bail!("--outlier-multiplier must be positive, got {}", multiplier);
        }
        config.outlier_multiplier = multiplier;
    }

    Ok(SpendingEstimator::from_config(&config).estimate(&transactions))
}

pub fn cmd_estimate(
    config: &ForecastConfig,
    history: &Path,
    outlier_multiplier: Option<f64>,
    json: bool,
) -> Result<()> {
    let estimate = estimate_file(config, history, outlier_multiplier)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
        return Ok(());
    }

    println!();
    println!("📊 Spending Baseline");
    println!("   ─────────────────────────────────────────────");

    if estimate.transactions_included == 0 {
        println!("   No expenses found in {}.", history.display());
        return Ok(());
    }

    println!(
        "   Average per day:   {:>12}",
        format_money(estimate.average_daily_spending)
    );
    println!(
        "   Total included:    {:>12}",
        format_money(estimate.total_spending)
    );
    println!(
        "   Median expense:    {:>12}",
        format_money(estimate.median_amount)
    );
    println!("   Days analyzed:     {:>12}", estimate.days_analyzed);
    println!(
        "   Transactions:      {:>12}",
        format!(
            "{} used, {} outliers",
            estimate.transactions_included, estimate.transactions_excluded
        )
    );
    println!("   Confidence:        {:>12}", estimate.confidence.as_str());

    match estimate.confidence {
        Confidence::None => {
            println!();
            println!(
                "   💡 Need at least {} days of expenses to forecast.",
                config.medium_confidence_min_days
            );
        }
        Confidence::Low => {
            println!();
            println!("   ⚠️  Every expense looked like an outlier; the baseline is unreliable.");
        }
        _ => {}
    }

    Ok(())
}
