//! Forecast command implementation

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use runway_core::forecast::{ForecastProjector, ForecastRequest, ForecastSummary};
use runway_core::import::{load_planned_transactions, load_spending_transactions};
use runway_core::{
    ForecastConfig, ForecastResult, PlannedTransaction, RiskLevel, TransactionType, UserSettings,
};
use serde::Serialize;

use super::{format_money, truncate};

/// Default forecast length when neither --to nor --days is given
pub const DEFAULT_FORECAST_DAYS: u32 = 30;

/// Longest range the CLI will project; the projector itself has no bound
pub const MAX_FORECAST_DAYS: u32 = 366;

/// Parsed arguments for the forecast command
#[derive(Debug, Clone)]
pub struct ForecastOptions {
    pub history: PathBuf,
    pub planned: Option<PathBuf>,
    pub balance: f64,
    /// Inclusive (start, end)
    pub range: (NaiveDate, NaiveDate),
    pub minimum_safe_balance: f64,
    pub buffer_days: Option<u32>,
    pub json: bool,
    pub show_all: bool,
}

/// JSON output: the projector result plus its summary
#[derive(Debug, Serialize)]
pub struct ForecastOutput {
    #[serde(flatten)]
    pub result: ForecastResult,
    pub summary: Option<ForecastSummary>,
    /// Planned transactions inside the range, by date (table output only)
    #[serde(skip)]
    pub planned: Vec<PlannedTransaction>,
}

/// Resolve --from/--to/--days into an inclusive date range
pub fn resolve_range(
    from: Option<&str>,
    to: Option<&str>,
    days: Option<u32>,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate)> {
    let start = match from {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --from date format (use YYYY-MM-DD)")?,
        None => today,
    };

    let end = match to {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --to date format (use YYYY-MM-DD)")?,
        None => {
            let days = days.unwrap_or(DEFAULT_FORECAST_DAYS);
            if days == 0 {
                anyhow::bail!("--days must be at least 1");
            }
            if days > MAX_FORECAST_DAYS {
                anyhow::bail!("--days must be at most {}, got {}", MAX_FORECAST_DAYS, days);
            }
            start
                .checked_add_signed(Duration::days(i64::from(days) - 1))
                .with_context(|| format!("--days {} from {} is out of range", days, start))?
        }
    };

    if end < start {
        anyhow::bail!("--to ({}) is before --from ({})", end, start);
    }

    let span = (end - start).num_days() + 1;
    if span > i64::from(MAX_FORECAST_DAYS) {
        anyhow::bail!(
            "Forecast range {} to {} spans {} days (max {})",
            start,
            end,
            span,
            MAX_FORECAST_DAYS
        );
    }

    Ok((start, end))
}

/// Load inputs and run the projector
pub fn run_forecast(
    config: &ForecastConfig,
    options: &ForecastOptions,
    today: NaiveDate,
) -> Result<ForecastOutput> {
    let historical = load_spending_transactions(&options.history).with_context(|| {
        format!("Failed to load history from {}", options.history.display())
    })?;

    let planned = match options.planned {
        Some(ref path) => load_planned_transactions(path)
            .with_context(|| format!("Failed to load planned transactions from {}", path.display()))?,
        None => Vec::new(),
    };

    tracing::debug!(
        historical = historical.len(),
        planned = planned.len(),
        "Loaded forecast inputs"
    );

    let settings = UserSettings {
        minimum_safe_balance: options.minimum_safe_balance,
        safety_buffer_days: options.buffer_days,
    };

    let (start_date, end_date) = options.range;
    let result = ForecastProjector::new(config.clone()).project_as_of(
        today,
        ForecastRequest {
            current_balance: options.balance,
            historical_transactions: &historical,
            planned_transactions: &planned,
            start_date,
            end_date,
            settings: &settings,
        },
    );
    let summary = ForecastSummary::from_result(&result);

    let mut planned: Vec<PlannedTransaction> = planned
        .into_iter()
        .filter(|tx| tx.planned_date >= start_date && tx.planned_date <= end_date)
        .collect();
    planned.sort_by_key(|tx| tx.planned_date);

    Ok(ForecastOutput {
        result,
        summary,
        planned,
    })
}

pub fn cmd_forecast(config: &ForecastConfig, options: &ForecastOptions) -> Result<()> {
    let output = run_forecast(config, options, chrono::Local::now().date_naive())?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let result = &output.result;
    let (start, end) = options.range;

    println!();
    println!("📈 Cash-Flow Forecast");
    println!("   Period: {} to {}", start, end);
    println!("   ─────────────────────────────────────────────────────────────");

    if result.forecasts.is_empty() {
        println!("   Not enough spending history to forecast.");
        println!(
            "   💡 Need at least {} days of expenses in the history file.",
            config.medium_confidence_min_days
        );
        return Ok(());
    }

    println!(
        "   Baseline: {}/day ({} confidence), projected at {}/day",
        format_money(result.average_daily_spending),
        result.spending_confidence.as_str(),
        format_money(result.forecasts[0].breakdown.estimated_daily_spending)
    );

    if !result.should_display && !options.show_all {
        println!();
        println!("   ⚠️  Baseline confidence is too low to show a forecast.");
        println!("   Run with --all to see it anyway.");
        return Ok(());
    }

    println!();
    println!(
        "   {:10} │ {:>12} │ {:>10} │ {:>10} │ {:>9} │ {:>12} │ {:7} │ {:6}",
        "Date", "Start", "Income", "Expenses", "Spending", "End", "Risk", "Conf."
    );
    println!("   ───────────┼──────────────┼────────────┼────────────┼───────────┼──────────────┼─────────┼───────");

    for day in &result.forecasts {
        let b = &day.breakdown;
        println!(
            "   {:10} │ {:>12} │ {:>10} │ {:>10} │ {:>9} │ {:>12} │ {} │ {:6}",
            day.date.to_string(),
            format_money(b.starting_balance),
            format_money(b.planned_income),
            format_money(b.planned_expenses),
            format_money(b.estimated_daily_spending),
            format_money(b.ending_balance),
            risk_badge(day.risk_level),
            day.confidence.as_str()
        );
    }

    if !output.planned.is_empty() {
        println!();
        println!("   Planned");
        println!("   ─────────────────────────────");
        for tx in &output.planned {
            println!("   {}", planned_line(tx));
        }
    }

    if let Some(ref summary) = output.summary {
        print_summary(summary);
    }

    Ok(())
}

/// One row of the planned-transactions listing
pub fn planned_line(tx: &PlannedTransaction) -> String {
    let sign = match tx.transaction_type {
        TransactionType::Income => '+',
        TransactionType::Expense => '-',
    };
    format!(
        "{}  {}{:>11}  {}",
        tx.planned_date,
        sign,
        format_money(tx.amount),
        truncate(tx.description.as_deref().unwrap_or("(no description)"), 30)
    )
}

fn risk_badge(risk: RiskLevel) -> String {
    match risk {
        RiskLevel::Safe => format!("{:7}", "safe"),
        RiskLevel::Warning => format!("\x1b[33m{:7}\x1b[0m", "warning"),
        RiskLevel::Danger => format!("\x1b[31m{:7}\x1b[0m", "danger"),
    }
}

fn print_summary(summary: &ForecastSummary) {
    println!();
    println!("   Summary");
    println!("   ─────────────────────────────");
    println!(
        "   Balance: {} → {}",
        format_money(summary.starting_balance),
        format_money(summary.ending_balance)
    );
    println!(
        "   Lowest:  {} on {}",
        format_money(summary.lowest_balance),
        summary.lowest_balance_date
    );
    println!(
        "   Planned: +{} / -{}",
        format_money(summary.total_planned_income),
        format_money(summary.total_planned_expenses)
    );
    println!(
        "   Days:    {} safe, {} warning, {} danger",
        summary.safe_days, summary.warning_days, summary.danger_days
    );

    match (summary.first_danger_date, summary.first_warning_date) {
        (Some(date), _) => println!("   🚨 Balance drops below your minimum on {}", date),
        (None, Some(date)) => println!("   ⚠️  Balance enters your safety buffer on {}", date),
        (None, None) => println!("   ✅ Balance stays above your safety buffer"),
    }
}
