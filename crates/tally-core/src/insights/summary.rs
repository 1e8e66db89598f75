//! Monthly summary
//!
//! Totals credits and debits for the reference month and compares spending
//! against the monthly limit.

use chrono::{Datelike, Duration, Local, NaiveDate};
use tracing::debug;

use crate::error::Result;
use crate::models::{FlowDirection, Summary, SummaryWindow, Transaction};
use crate::store::LedgerStore;

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// Computes the current-month summary from a ledger store
pub struct SummaryEngine<'a, S: ?Sized> {
    store: &'a S,
    window: SummaryWindow,
}

impl<'a, S: LedgerStore + ?Sized> SummaryEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            window: SummaryWindow::default(),
        }
    }

    pub fn with_window(mut self, window: SummaryWindow) -> Self {
        self.window = window;
        self
    }

    /// Summarize the month containing `today`
    ///
    /// Fails if the budget row is missing; that is never treated as a zero limit.
    pub fn summarize(&self, today: NaiveDate) -> Result<Summary> {
        let budget = self.store.get_budget()?;
        let transactions = self.store.list_transactions()?;

        let summary = summarize(&transactions, budget.monthly_limit, today, self.window);
        debug!(
            %today,
            window = self.window.as_str(),
            total_debit = summary.total_debit,
            total_credit = summary.total_credit,
            exceeded = summary.exceeded,
            "Computed monthly summary"
        );
        Ok(summary)
    }

    /// Summarize the current month in local time
    pub fn summarize_current_month(&self) -> Result<Summary> {
        self.summarize(Local::now().date_naive())
    }
}

/// Pure summary computation over an already-loaded ledger
pub fn summarize(
    transactions: &[Transaction],
    monthly_limit: f64,
    today: NaiveDate,
    window: SummaryWindow,
) -> Summary {
    let start = month_start(today);
    let in_window = |date: NaiveDate| match window {
        SummaryWindow::FromMonthStart => date >= start,
        SummaryWindow::MonthToDate => date >= start && date <= today,
    };

    let (total_debit, total_credit) = transactions
        .iter()
        .filter(|tx| in_window(tx.date))
        .fold((0.0, 0.0), |(debit, credit), tx| match tx.flow {
            FlowDirection::Debit => (debit + tx.amount, credit),
            FlowDirection::Credit => (debit, credit + tx.amount),
        });

    let exceeded = total_debit > monthly_limit;
    let over_budget_amount = if exceeded {
        total_debit - monthly_limit
    } else {
        0.0
    };

    Summary {
        total_debit,
        total_credit,
        limit: monthly_limit,
        effective_limit: total_credit,
        remaining: total_credit - total_debit,
        exceeded,
        over_budget_amount,
    }
}
