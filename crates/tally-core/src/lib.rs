//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance tracker:
//! - Database access and schema setup
//! - Ledger storage abstraction used by the engines
//! - Monthly summary engine (income, spending, over-budget status)
//! - Spending forecast engine (linear trend over daily debit totals)
//! - Ledger export (CSV, JSON)

pub mod db;
pub mod error;
pub mod export;
pub mod insights;
pub mod models;
pub mod store;

/// Test utilities including an in-memory ledger store
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use db::{AuditEntry, Database};
pub use error::{Error, Result};
pub use export::{export_transactions, ExportFormat, ExportOptions};
pub use insights::{ForecastEngine, SummaryEngine};
pub use models::{
    Budget, FlowDirection, Forecast, ForecastStatus, NewTransaction, Summary, SummaryWindow,
    Transaction, Trend,
};
pub use store::LedgerStore;
