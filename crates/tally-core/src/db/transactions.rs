//! Transaction operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{FlowDirection, NewTransaction, Transaction};

const TRANSACTION_COLUMNS: &str = "id, amount, type, description, date, created_at";

impl Database {
    /// Append a transaction to the ledger, returning its new ID
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO transactions (amount, type, description, date) VALUES (?, ?, ?, ?)",
            params![
                tx.amount,
                tx.flow.as_str(),
                tx.description,
                tx.date.to_string(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(id, amount = tx.amount, flow = %tx.flow, date = %tx.date, "Transaction inserted");
        Ok(id)
    }

    /// List transactions, newest first
    ///
    /// `limit` of `None` returns the whole ledger.
    pub fn list_transactions(&self, limit: Option<i64>) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        let sql = format!(
            "SELECT {} FROM transactions ORDER BY date DESC, id DESC LIMIT ?",
            TRANSACTION_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;

        // SQLite treats a negative LIMIT as "no limit"
        let transactions = stmt
            .query_map(params![limit.unwrap_or(-1)], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Get a single transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;

        let sql = format!("SELECT {} FROM transactions WHERE id = ?", TRANSACTION_COLUMNS);
        let tx = conn
            .query_row(&sql, params![id], Self::row_to_transaction)
            .optional()?;

        Ok(tx)
    }

    /// Delete a transaction by ID
    ///
    /// Returns whether a row was removed. Deleting an unknown ID is not an error.
    pub fn delete_transaction(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let affected = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
        Ok(affected > 0)
    }

    /// Count transactions in the ledger
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Summed debit amounts per distinct date, oldest first
    pub fn daily_debit_totals(&self) -> Result<Vec<(NaiveDate, f64)>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT date, SUM(amount)
            FROM transactions
            WHERE type = ?
            GROUP BY date
            ORDER BY date
            "#,
        )?;

        let totals = stmt
            .query_map(params![FlowDirection::Debit.as_str()], |row| {
                let date_str: String = row.get(0)?;
                let total: f64 = row.get(1)?;
                Ok((parse_date_column(0, &date_str)?, total))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(totals)
    }

    fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
        let flow_str: String = row.get(2)?;
        let date_str: String = row.get(4)?;
        let created_at_str: String = row.get(5)?;

        let flow = flow_str.parse::<FlowDirection>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                e.into(),
            )
        })?;

        Ok(Transaction {
            id: row.get(0)?,
            amount: row.get(1)?,
            flow,
            description: row.get(3)?,
            date: parse_date_column(4, &date_str)?,
            created_at: parse_datetime(&created_at_str),
        })
    }
}

fn parse_date_column(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
