//! Raw financial record types
//!
//! Revenue (invoice) and cost records as supplied by the storage layer,
//! plus JSON parsing that rejects malformed input at the boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::AnalyticsError;

/// Common shape shared by revenue and cost records
pub trait FinancialRecord {
    fn date(&self) -> NaiveDate;
    fn amount(&self) -> f64;
    fn label(&self) -> &str;
}

/// A single invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRecord {
    pub date: NaiveDate,
    pub amount: f64,
    pub label: String,
    /// Client identifier, used for client diversity
    #[serde(default)]
    pub counterparty_name: Option<String>,
}

impl RevenueRecord {
    pub fn new(date: NaiveDate, amount: f64, label: impl Into<String>) -> Self {
        Self {
            date,
            amount,
            label: label.into(),
            counterparty_name: None,
        }
    }

    pub fn with_counterparty(mut self, name: impl Into<String>) -> Self {
        self.counterparty_name = Some(name.into());
        self
    }
}

impl FinancialRecord for RevenueRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// A single expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    pub date: NaiveDate,
    pub amount: f64,
    pub description: String,
}

impl CostRecord {
    pub fn new(date: NaiveDate, amount: f64, description: impl Into<String>) -> Self {
        Self {
            date,
            amount,
            description: description.into(),
        }
    }
}

impl FinancialRecord for CostRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn label(&self) -> &str {
        &self.description
    }
}

/// Wire shape of an incoming revenue record
#[derive(Debug, Deserialize)]
struct RawRevenue {
    date: String,
    amount: f64,
    #[serde(default)]
    label: String,
    #[serde(default, alias = "counterpartyName")]
    counterparty_name: Option<String>,
}

/// Wire shape of an incoming cost record
#[derive(Debug, Deserialize)]
struct RawCost {
    date: String,
    amount: f64,
    #[serde(default)]
    description: String,
}

/// Parse a date from a YYYY-MM-DD string or the date portion of an ISO 8601 timestamp
///
/// Handles formats like:
/// - "2024-02-15"
/// - "2024-02-15T10:30:00Z"
/// - "2024-02-15T10:30:00.000+01:00"
///
/// Anything after the date must start a time part (`T` or a space).
pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.get(0..10)?;
    match value.as_bytes().get(10) {
        None | Some(b'T') | Some(b' ') => {}
        Some(_) => return None,
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn validate_amount(amount: f64, index: usize) -> Result<f64, AnalyticsError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(AnalyticsError::InvalidRecord(format!(
            "record {}: amount must be a non-negative number, got {}",
            index, amount
        )));
    }
    Ok(amount)
}

fn validate_date(value: &str, index: usize) -> Result<NaiveDate, AnalyticsError> {
    parse_record_date(value).ok_or_else(|| {
        AnalyticsError::InvalidRecord(format!("record {}: invalid date '{}'", index, value))
    })
}

/// Parse a JSON array of revenue records
pub fn parse_revenue_json(json: &str) -> Result<Vec<RevenueRecord>, AnalyticsError> {
    let raw: Vec<RawRevenue> = serde_json::from_str(json)?;

    raw.into_iter()
        .enumerate()
        .map(|(i, r)| {
            Ok(RevenueRecord {
                date: validate_date(&r.date, i)?,
                amount: validate_amount(r.amount, i)?,
                label: r.label,
                counterparty_name: r.counterparty_name.filter(|n| !n.trim().is_empty()),
            })
        })
        .collect()
}

/// Parse a JSON array of cost records
pub fn parse_cost_json(json: &str) -> Result<Vec<CostRecord>, AnalyticsError> {
    let raw: Vec<RawCost> = serde_json::from_str(json)?;

    raw.into_iter()
        .enumerate()
        .map(|(i, r)| {
            Ok(CostRecord {
                date: validate_date(&r.date, i)?,
                amount: validate_amount(r.amount, i)?,
                description: r.description,
            })
        })
        .collect()
}
