//! Ledger export
//!
//! Supports:
//! - CSV with one row per transaction
//! - Pretty-printed JSON array of transactions
//!
//! Rows are written oldest first, optionally limited to a date range.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;
use crate::models::Transaction;
use crate::store::LedgerStore;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {} (use csv or json)", s)),
        }
    }
}

/// Options for transaction export
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Start date filter (inclusive)
    pub from: Option<NaiveDate>,
    /// End date filter (inclusive)
    pub to: Option<NaiveDate>,
}

impl ExportOptions {
    fn includes(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// One CSV row
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: i64,
    date: String,
    #[serde(rename = "type")]
    flow: &'static str,
    amount: String,
    description: &'a str,
}

/// Write the ledger to `out`, returning the number of transactions written
pub fn export_transactions<S, W>(
    store: &S,
    format: ExportFormat,
    opts: &ExportOptions,
    out: W,
) -> Result<usize>
where
    S: LedgerStore + ?Sized,
    W: Write,
{
    let mut transactions: Vec<Transaction> = store
        .list_transactions()?
        .into_iter()
        .filter(|tx| opts.includes(tx.date))
        .collect();
    transactions.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    match format {
        ExportFormat::Csv => write_csv(&transactions, out)?,
        ExportFormat::Json => write_json(&transactions, out)?,
    }

    Ok(transactions.len())
}

fn write_csv<W: Write>(transactions: &[Transaction], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for tx in transactions {
        writer.serialize(CsvRow {
            id: tx.id,
            date: tx.date.to_string(),
            flow: tx.flow.as_str(),
            amount: format!("{:.2}", tx.amount),
            description: tx.description.as_deref().unwrap_or(""),
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json<W: Write>(transactions: &[Transaction], mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, transactions)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FlowDirection::{Credit, Debit};
    use crate::models::NewTransaction;
    use crate::test_utils::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .append_transaction(
                &NewTransaction::new(1200.0, Debit, Some("Rent, January"), date(2026, 1, 2))
                    .unwrap(),
            )
            .unwrap();
        store
            .append_transaction(
                &NewTransaction::new(2000.0, Credit, Some("Salary"), date(2026, 1, 1)).unwrap(),
            )
            .unwrap();
        store.add(15.5, Debit, date(2026, 2, 3));
        store
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("json".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_csv_export_oldest_first_with_quoting() {
        let store = sample_store();
        let mut buf = Vec::new();

        let count =
            export_transactions(&store, ExportFormat::Csv, &ExportOptions::default(), &mut buf)
                .unwrap();
        assert_eq!(count, 3);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,date,type,amount,description");
        assert_eq!(lines[1], "2,2026-01-01,Credit,2000.00,Salary");
        assert_eq!(lines[2], "1,2026-01-02,Debit,1200.00,\"Rent, January\"");
        assert_eq!(lines[3], "3,2026-02-03,Debit,15.50,");
    }

    #[test]
    fn test_json_export_with_date_range() {
        let store = sample_store();
        let opts = ExportOptions {
            from: Some(date(2026, 1, 2)),
            to: Some(date(2026, 1, 31)),
        };
        let mut buf = Vec::new();

        let count = export_transactions(&store, ExportFormat::Json, &opts, &mut buf).unwrap();
        assert_eq!(count, 1);

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["type"], "Debit");
        assert_eq!(rows[0]["description"], "Rent, January");
    }
}
