//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `config` - Config loading and the `config` command
//! - `estimate` - Baseline spending estimate
//! - `forecast` - Daily balance forecast and date range resolution

pub mod config;
pub mod estimate;
pub mod forecast;

// Re-export command functions for main.rs
pub use config::*;
pub use estimate::*;
pub use forecast::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a currency amount with a sign and thousands separators
pub fn format_money(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!(
        "{}${}.{:02}",
        if negative { "-" } else { "" },
        grouped,
        cents % 100
    )
}
