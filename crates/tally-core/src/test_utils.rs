//! Test utilities
//!
//! `MemoryStore` is a `LedgerStore` backed by a `Vec`, for exercising the
//! engines without SQLite.

use std::sync::Mutex;

use chrono::{NaiveDate, Utc};

use crate::error::{Error, Result};
use crate::models::{
    validate_monthly_limit, Budget, FlowDirection, NewTransaction, Transaction,
    DEFAULT_MONTHLY_LIMIT,
};
use crate::store::LedgerStore;

#[derive(Default)]
struct Inner {
    transactions: Vec<Transaction>,
    budget: Option<Budget>,
    next_id: i64,
}

/// In-memory ledger store
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Empty ledger with the default monthly limit
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MONTHLY_LIMIT)
    }

    /// Empty ledger with the given monthly limit
    pub fn with_limit(monthly_limit: f64) -> Self {
        Self {
            inner: Mutex::new(Inner {
                transactions: Vec::new(),
                budget: Some(Budget {
                    monthly_limit,
                    updated_at: Utc::now(),
                }),
                next_id: 1,
            }),
        }
    }

    /// Store whose budget row is missing, for invariant-violation tests
    pub fn without_budget() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                ..Default::default()
            }),
        }
    }

    /// Append a transaction from literal parts, panicking on invalid input
    pub fn add(&self, amount: f64, flow: FlowDirection, date: NaiveDate) -> Transaction {
        let tx = NewTransaction::new(amount, flow, None, date).expect("valid test transaction");
        self.append_transaction(&tx).expect("append to memory store")
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for MemoryStore {
    fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let inner = self.inner.lock().expect("memory store lock poisoned");
        let mut transactions = inner.transactions.clone();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(transactions)
    }

    fn append_transaction(&self, tx: &NewTransaction) -> Result<Transaction> {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        let transaction = Transaction {
            id: inner.next_id,
            amount: tx.amount,
            flow: tx.flow,
            description: tx.description.clone(),
            date: tx.date,
            created_at: Utc::now(),
        };
        inner.next_id += 1;
        inner.transactions.push(transaction.clone());
        Ok(transaction)
    }

    fn delete_transaction(&self, id: i64) -> Result<bool> {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        let before = inner.transactions.len();
        inner.transactions.retain(|t| t.id != id);
        Ok(inner.transactions.len() != before)
    }

    fn get_budget(&self) -> Result<Budget> {
        let inner = self.inner.lock().expect("memory store lock poisoned");
        inner.budget.clone().ok_or(Error::MissingBudget)
    }

    fn set_budget(&self, monthly_limit: f64) -> Result<Budget> {
        let monthly_limit = validate_monthly_limit(monthly_limit)?;
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        let budget = inner.budget.as_mut().ok_or(Error::MissingBudget)?;
        budget.monthly_limit = monthly_limit;
        budget.updated_at = Utc::now();
        Ok(budget.clone())
    }
}
