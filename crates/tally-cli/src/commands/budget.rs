//! Monthly limit command implementations

use anyhow::{Context, Result};
use tally_core::db::Database;

use super::record_audit;

pub fn cmd_budget_show(db: &Database) -> Result<()> {
    let budget = db.get_budget()?;

    println!();
    println!("💰 Monthly limit: ${:.2}", budget.monthly_limit);
    println!(
        "   Last changed: {}",
        budget.updated_at.format("%Y-%m-%d %H:%M UTC")
    );

    Ok(())
}

pub fn cmd_budget_set(db: &Database, limit: f64) -> Result<()> {
    let previous = db.get_budget()?;
    let budget = db.set_budget(limit).context("Failed to update monthly limit")?;

    record_audit(
        db,
        "update",
        "budget",
        None,
        Some(&format!(
            "monthly_limit: {:.2} -> {:.2}",
            previous.monthly_limit, budget.monthly_limit
        )),
    );

    println!(
        "✅ Monthly limit changed: ${:.2} → ${:.2}",
        previous.monthly_limit, budget.monthly_limit
    );

    Ok(())
}
