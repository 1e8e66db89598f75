//! Storage abstraction consumed by the summary and forecast engines

use chrono::NaiveDate;

use crate::db::Database;
use crate::error::Result;
use crate::insights::forecast::group_daily_debits;
use crate::models::{Budget, NewTransaction, Transaction};

/// Read/write access to the ledger and the monthly limit
///
/// Each call is an independent unit of work; implementations rely on the
/// backing store's own atomicity and do not coordinate between calls.
pub trait LedgerStore {
    /// All transactions, newest first
    fn list_transactions(&self) -> Result<Vec<Transaction>>;

    /// Append a transaction and return it with its assigned ID
    fn append_transaction(&self, tx: &NewTransaction) -> Result<Transaction>;

    /// Remove a transaction. Returns `false` if the ID was unknown.
    fn delete_transaction(&self, id: i64) -> Result<bool>;

    /// The monthly limit. Fails with `Error::MissingBudget` if it was never seeded.
    fn get_budget(&self) -> Result<Budget>;

    /// Replace the monthly limit
    fn set_budget(&self, monthly_limit: f64) -> Result<Budget>;

    /// Summed debit amounts per distinct date, oldest first
    fn daily_debit_totals(&self) -> Result<Vec<(NaiveDate, f64)>> {
        Ok(group_daily_debits(&self.list_transactions()?))
    }
}

// Paths below resolve to the inherent `Database` methods, not back into the trait.
impl LedgerStore for Database {
    fn list_transactions(&self) -> Result<Vec<Transaction>> {
        Database::list_transactions(self, None)
    }

    fn append_transaction(&self, tx: &NewTransaction) -> Result<Transaction> {
        let id = self.insert_transaction(tx)?;
        self.get_transaction(id)?.ok_or_else(|| {
            crate::Error::NotFound(format!("Transaction {} not found after insert", id))
        })
    }

    fn delete_transaction(&self, id: i64) -> Result<bool> {
        Database::delete_transaction(self, id)
    }

    fn get_budget(&self) -> Result<Budget> {
        Database::get_budget(self)
    }

    fn set_budget(&self, monthly_limit: f64) -> Result<Budget> {
        Database::set_budget(self, monthly_limit)
    }

    fn daily_debit_totals(&self) -> Result<Vec<(NaiveDate, f64)>> {
        Database::daily_debit_totals(self)
    }
}
