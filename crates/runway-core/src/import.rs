//! CSV/JSON import for historical and planned transactions
//!
//! CSV files need a header row. Columns are matched by name (case-insensitive):
//! `date` (or `transaction_date` / `planned_date`), `amount`, and optionally
//! `type` and `description`. Without a type, the amount's sign decides:
//! negative = expense, positive = income. Stored amounts are always magnitudes.
//!
//! JSON files hold an array of records in the serde shape of
//! [`SpendingTransaction`] / [`PlannedTransaction`].

use std::fs;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{PlannedTransaction, SpendingTransaction, TransactionType};

/// One parsed CSV row, before it becomes a concrete transaction type
struct ParsedRow {
    date: NaiveDate,
    amount: f64,
    transaction_type: TransactionType,
    description: Option<String>,
}

/// Column positions resolved from the header
struct Columns {
    date: usize,
    amount: usize,
    transaction_type: Option<usize>,
    description: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord, date_names: &[&str]) -> Result<Self> {
        let date = find_column(headers, date_names).ok_or_else(|| {
            Error::Import(format!(
                "Missing date column (expected one of: {})",
                date_names.join(", ")
            ))
        })?;
        let amount = find_column(headers, &["amount"])
            .ok_or_else(|| Error::Import("Missing amount column".to_string()))?;

        Ok(Self {
            date,
            amount,
            transaction_type: find_column(headers, &["type", "transaction_type"]),
            description: find_column(headers, &["description", "memo", "name"]),
        })
    }
}

fn find_column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim().to_lowercase();
        names.iter().any(|n| h == *n)
    })
}

/// Load historical transactions from a `.json` or CSV file
pub fn load_spending_transactions(path: &Path) -> Result<Vec<SpendingTransaction>> {
    if is_json(path) {
        parse_spending_json(&fs::read_to_string(path)?)
    } else {
        parse_spending_csv(fs::File::open(path)?)
    }
}

/// Load planned transactions from a `.json` or CSV file
pub fn load_planned_transactions(path: &Path) -> Result<Vec<PlannedTransaction>> {
    if is_json(path) {
        parse_planned_json(&fs::read_to_string(path)?)
    } else {
        parse_planned_csv(fs::File::open(path)?)
    }
}

pub fn parse_spending_json(content: &str) -> Result<Vec<SpendingTransaction>> {
    let transactions: Vec<SpendingTransaction> = serde_json::from_str(content)?;
    check_amounts(transactions.iter().map(|tx| tx.amount))?;
    debug!("Parsed {} historical transactions (JSON)", transactions.len());
    Ok(transactions)
}

pub fn parse_planned_json(content: &str) -> Result<Vec<PlannedTransaction>> {
    let transactions: Vec<PlannedTransaction> = serde_json::from_str(content)?;
    check_amounts(transactions.iter().map(|tx| tx.amount))?;
    debug!("Parsed {} planned transactions (JSON)", transactions.len());
    Ok(transactions)
}

pub fn parse_spending_csv<R: Read>(reader: R) -> Result<Vec<SpendingTransaction>> {
    let rows = parse_rows(reader, &["date", "transaction_date"])?;
    debug!("Parsed {} historical transactions (CSV)", rows.len());
    Ok(rows
        .into_iter()
        .map(|row| SpendingTransaction {
            amount: row.amount,
            transaction_date: row.date,
            transaction_type: row.transaction_type,
            description: row.description,
        })
        .collect())
}

pub fn parse_planned_csv<R: Read>(reader: R) -> Result<Vec<PlannedTransaction>> {
    let rows = parse_rows(reader, &["date", "planned_date"])?;
    debug!("Parsed {} planned transactions (CSV)", rows.len());
    Ok(rows
        .into_iter()
        .map(|row| PlannedTransaction {
            amount: row.amount,
            planned_date: row.date,
            transaction_type: row.transaction_type,
            description: row.description,
        })
        .collect())
}

fn parse_rows<R: Read>(reader: R, date_names: &[&str]) -> Result<Vec<ParsedRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?, date_names)?;
    let mut rows = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        // Header is line 1
        let line = index + 2;

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let date_str = record
            .get(columns.date)
            .ok_or_else(|| Error::Import(format!("Line {}: missing date", line)))?;
        let date = parse_date(date_str).ok_or_else(|| {
            Error::Import(format!("Line {}: unable to parse date: {}", line, date_str))
        })?;

        let amount_str = record
            .get(columns.amount)
            .ok_or_else(|| Error::Import(format!("Line {}: missing amount", line)))?;
        let signed = parse_amount(amount_str).ok_or_else(|| {
            Error::Import(format!("Line {}: unable to parse amount: {}", line, amount_str))
        })?;

        let transaction_type = match columns
            .transaction_type
            .and_then(|i| record.get(i))
            .filter(|s| !s.is_empty())
        {
            Some(s) => s
                .parse::<TransactionType>()
                .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?,
            None => TransactionType::from_signed_amount(signed),
        };

        let description = columns
            .description
            .and_then(|i| record.get(i))
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        rows.push(ParsedRow {
            date,
            amount: signed.abs(),
            transaction_type,
            description,
        });
    }

    Ok(rows)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// JSON amounts are magnitudes; a negative one means the file is in the wrong shape
fn check_amounts(amounts: impl Iterator<Item = f64>) -> Result<()> {
    for (index, amount) in amounts.enumerate() {
        if amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Record {}: amount must be non-negative (use \"type\" for direction), got {}",
                index, amount
            )));
        }
    }
    Ok(())
}

/// Parse a date string in various common formats
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%m/%d/%Y", // 01/15/2024
        "%m/%d/%y", // 01/15/24
        "%m-%d-%Y", // 01-15-2024
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    None
}

/// Parse an amount string, handling currency symbols and commas
fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned.parse::<f64>().ok()
}
