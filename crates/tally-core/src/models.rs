//! Domain models for Tally

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Monthly limit seeded when the database is first created
pub const DEFAULT_MONTHLY_LIMIT: f64 = 1000.0;

/// Whether a transaction adds to or takes from available funds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowDirection {
    /// Income, refunds, transfers in
    Credit,
    /// Spending
    Debit,
}

impl FlowDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "Credit",
            Self::Debit => "Debit",
        }
    }
}

impl std::str::FromStr for FlowDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: f64,
    #[serde(rename = "type")]
    pub flow: FlowDirection,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// A validated transaction waiting to be appended to the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: f64,
    pub flow: FlowDirection,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl NewTransaction {
    /// Build a transaction, rejecting amounts that are not strictly positive.
    ///
    /// Blank descriptions are dropped.
    pub fn new(
        amount: f64,
        flow: FlowDirection,
        description: Option<&str>,
        date: NaiveDate,
    ) -> Result<Self> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Amount must be a positive number, got {}",
                amount
            )));
        }

        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(Self {
            amount,
            flow,
            description,
            date,
        })
    }

    /// Build a transaction from raw text fields (API bodies, CLI args)
    pub fn parse(
        amount: f64,
        flow: &str,
        description: Option<&str>,
        date: &str,
    ) -> Result<Self> {
        let flow: FlowDirection = flow.parse().map_err(Error::InvalidData)?;
        let date = parse_date(date)?;
        Self::new(amount, flow, description, date)
    }
}

/// Parse an ISO 8601 calendar date (YYYY-MM-DD)
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidData(format!("Invalid date '{}' (use YYYY-MM-DD)", s)))
}

/// The singleton monthly spending limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub monthly_limit: f64,
    pub updated_at: DateTime<Utc>,
}

/// Check a candidate monthly limit before it replaces the current one
pub fn validate_monthly_limit(monthly_limit: f64) -> Result<f64> {
    if !monthly_limit.is_finite() || monthly_limit < 0.0 {
        return Err(Error::InvalidData(format!(
            "Monthly limit must be a non-negative number, got {}",
            monthly_limit
        )));
    }
    Ok(monthly_limit)
}

/// Which transactions count toward "this month"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryWindow {
    /// Everything dated on or after the 1st of the month, including
    /// future-dated entries
    #[default]
    FromMonthStart,
    /// The 1st of the month through the reference date, inclusive
    MonthToDate,
}

impl SummaryWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FromMonthStart => "from_month_start",
            Self::MonthToDate => "month_to_date",
        }
    }
}

impl std::str::FromStr for SummaryWindow {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "from_month_start" | "month" => Ok(Self::FromMonthStart),
            "month_to_date" | "mtd" => Ok(Self::MonthToDate),
            _ => Err(format!("Unknown summary window: {}", s)),
        }
    }
}

/// Financial state for the current calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(rename = "total_spent")]
    pub total_debit: f64,
    pub total_credit: f64,
    /// Monthly limit the summary was computed against
    pub limit: f64,
    /// Spending ceiling implied by this month's income (equals `total_credit`)
    pub effective_limit: f64,
    /// Available balance: credits minus debits
    pub remaining: f64,
    pub exceeded: bool,
    pub over_budget_amount: f64,
}

/// Outcome of a forecast run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastStatus {
    Success,
    InsufficientData,
}

impl ForecastStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::InsufficientData => "insufficient_data",
        }
    }
}

/// Direction of the fitted spending line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
}

impl Trend {
    /// Flat lines count as decreasing
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            Self::Increasing
        } else {
            Self::Decreasing
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
        }
    }
}

/// Projected total spending over the forecast horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub prediction: f64,
    pub status: ForecastStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

impl Forecast {
    pub fn insufficient_data() -> Self {
        Self {
            prediction: 0.0,
            status: ForecastStatus::InsufficientData,
            trend: None,
        }
    }

    pub fn success(prediction: f64, trend: Trend) -> Self {
        Self {
            prediction,
            status: ForecastStatus::Success,
            trend: Some(trend),
        }
    }
}
