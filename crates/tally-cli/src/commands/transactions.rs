//! Transaction command implementations

use anyhow::{Context, Result};
use chrono::Local;
use tally_core::db::Database;
use tally_core::models::NewTransaction;
use tally_core::LedgerStore;

use super::{format_flow_amount, record_audit, truncate};

/// Record a transaction, dated today unless `date` is given
pub fn cmd_add(
    db: &Database,
    amount: f64,
    flow: &str,
    date: Option<&str>,
    description: Option<&str>,
) -> Result<i64> {
    let date = date
        .map(str::to_string)
        .unwrap_or_else(|| Local::now().date_naive().to_string());

    let new_tx = NewTransaction::parse(amount, flow, description, &date)
        .context("Invalid transaction")?;
    let tx = db.append_transaction(&new_tx)?;

    record_audit(
        db,
        "create",
        "transaction",
        Some(tx.id),
        Some(&format!(
            "amount={:.2}, type={}, date={}",
            tx.amount, tx.flow, tx.date
        )),
    );

    println!(
        "✅ Recorded #{}: {} on {}",
        tx.id,
        format_flow_amount(tx.flow, tx.amount),
        tx.date
    );

    Ok(tx.id)
}

pub fn cmd_list(db: &Database, limit: i64) -> Result<()> {
    let transactions = db.list_transactions(Some(limit.max(1)))?;

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  tally add --amount 25 --type debit");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        println!(
            "   [{}] {} │ {:>10} │ {}",
            tx.id,
            tx.date,
            format_flow_amount(tx.flow, tx.amount),
            truncate(tx.description.as_deref().unwrap_or(""), 40)
        );
    }

    Ok(())
}

/// Delete a transaction; unknown IDs are reported, not treated as errors
pub fn cmd_delete(db: &Database, id: i64) -> Result<bool> {
    let deleted = db.delete_transaction(id)?;

    if deleted {
        record_audit(db, "delete", "transaction", Some(id), None);
        println!("🗑️  Deleted transaction #{}", id);
    } else {
        println!("Transaction #{} not found (nothing to delete)", id);
    }

    Ok(deleted)
}
