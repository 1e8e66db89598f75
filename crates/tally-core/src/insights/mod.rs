//! Financial insights computed over the ledger
//!
//! - `summary` - Current-month income, spending, balance, and budget status
//! - `forecast` - Projected spending from a linear trend of daily debit totals
//! - `regression` - Ordinary least-squares line fitting

pub mod forecast;
pub mod regression;
pub mod summary;

pub use forecast::{ForecastEngine, FORECAST_DAYS, MIN_SPENDING_DAYS};
pub use regression::LinearFit;
pub use summary::{month_start, SummaryEngine};
