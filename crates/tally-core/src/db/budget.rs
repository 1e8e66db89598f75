//! Budget operations
//!
//! The budget table always holds exactly one row (`id = 1`), seeded when the
//! schema is created. Callers go through `get_budget` / `set_budget` only.

use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{validate_monthly_limit, Budget};

impl Database {
    /// Get the current monthly limit
    pub fn get_budget(&self) -> Result<Budget> {
        let conn = self.conn()?;

        let budget = conn
            .query_row(
                "SELECT monthly_limit, updated_at FROM budget WHERE id = 1",
                [],
                |row| {
                    let updated_at_str: String = row.get(1)?;
                    Ok(Budget {
                        monthly_limit: row.get(0)?,
                        updated_at: parse_datetime(&updated_at_str),
                    })
                },
            )
            .optional()?;

        budget.ok_or(Error::MissingBudget)
    }

    /// Replace the monthly limit
    pub fn set_budget(&self, monthly_limit: f64) -> Result<Budget> {
        let monthly_limit = validate_monthly_limit(monthly_limit)?;
        let conn = self.conn()?;

        let affected = conn.execute(
            "UPDATE budget SET monthly_limit = ?, updated_at = CURRENT_TIMESTAMP WHERE id = 1",
            params![monthly_limit],
        )?;
        if affected == 0 {
            return Err(Error::MissingBudget);
        }

        info!(monthly_limit, "Monthly limit updated");
        drop(conn);
        self.get_budget()
    }
}
