//! Data models for Runway forecasting

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Infer the type from a signed amount (negative = expense)
    pub fn from_signed_amount(amount: f64) -> Self {
        if amount < 0.0 {
            Self::Expense
        } else {
            Self::Income
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "credit" => Ok(Self::Income),
            "expense" | "debit" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A completed, historical transaction used to estimate baseline spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingTransaction {
    /// Magnitude of the transaction (always non-negative)
    pub amount: f64,
    #[serde(alias = "date")]
    pub transaction_date: NaiveDate,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SpendingTransaction {
    pub fn expense(amount: f64, transaction_date: NaiveDate) -> Self {
        Self {
            amount,
            transaction_date,
            transaction_type: TransactionType::Expense,
            description: None,
        }
    }

    pub fn income(amount: f64, transaction_date: NaiveDate) -> Self {
        Self {
            amount,
            transaction_date,
            transaction_type: TransactionType::Income,
            description: None,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

/// A scheduled transaction that has not happened yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedTransaction {
    /// Magnitude of the transaction (always non-negative)
    pub amount: f64,
    #[serde(alias = "date")]
    pub planned_date: NaiveDate,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PlannedTransaction {
    pub fn expense(amount: f64, planned_date: NaiveDate) -> Self {
        Self {
            amount,
            planned_date,
            transaction_type: TransactionType::Expense,
            description: None,
        }
    }

    pub fn income(amount: f64, planned_date: NaiveDate) -> Self {
        Self {
            amount,
            planned_date,
            transaction_type: TransactionType::Income,
            description: None,
        }
    }

    /// Attach a free-form label (listed under "Planned" in CLI forecast output)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// How much historical data backs an estimate or a forecast day
///
/// Ordered from weakest to strongest, so `Confidence::Medium >= Confidence::Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    None,
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification of a projected balance against the user's thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Warning,
    Danger,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    /// Numeric severity for comparisons (higher = riskier)
    pub fn severity(&self) -> u8 {
        match self {
            Self::Safe => 0,
            Self::Warning => 1,
            Self::Danger => 2,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output of the spending baseline estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingEstimate {
    /// Included expense total divided by the day span
    pub average_daily_spending: f64,
    pub confidence: Confidence,
    /// Inclusive day span between the earliest and latest expense
    pub days_analyzed: u32,
    pub transactions_included: usize,
    /// Expenses dropped as outliers
    pub transactions_excluded: usize,
    /// Sum of included amounts
    pub total_spending: f64,
    /// Median of every expense amount, before exclusion
    pub median_amount: f64,
}

impl SpendingEstimate {
    /// The estimate returned when there is no expense data at all
    pub fn empty() -> Self {
        Self {
            average_daily_spending: 0.0,
            confidence: Confidence::None,
            days_analyzed: 0,
            transactions_included: 0,
            transactions_excluded: 0,
            total_spending: 0.0,
            median_amount: 0.0,
        }
    }
}

/// User-supplied risk thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Balances below this are `danger`
    pub minimum_safe_balance: f64,
    /// Days of conservative spending kept above the minimum before `warning`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_buffer_days: Option<u32>,
}

impl UserSettings {
    pub fn new(minimum_safe_balance: f64) -> Self {
        Self {
            minimum_safe_balance,
            safety_buffer_days: None,
        }
    }

    pub fn with_safety_buffer_days(mut self, days: u32) -> Self {
        self.safety_buffer_days = Some(days);
        self
    }
}

/// Arithmetic trace for one projected day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBreakdown {
    pub starting_balance: f64,
    pub planned_income: f64,
    pub planned_expenses: f64,
    pub estimated_daily_spending: f64,
    pub ending_balance: f64,
}

/// One day of a balance projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    /// Balance at the end of the day
    pub projected_balance: f64,
    pub confidence: Confidence,
    pub risk_level: RiskLevel,
    pub breakdown: DayBreakdown,
}

/// Complete projector output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub forecasts: Vec<DailyForecast>,
    /// Raw baseline (before the conservative margin)
    pub average_daily_spending: f64,
    pub spending_confidence: Confidence,
    /// False when the caller should not surface the forecast
    pub should_display: bool,
}

impl ForecastResult {
    /// The result returned when there is not enough history to forecast
    pub fn suppressed() -> Self {
        Self {
            forecasts: Vec::new(),
            average_daily_spending: 0.0,
            spending_confidence: Confidence::None,
            should_display: false,
        }
    }
}
