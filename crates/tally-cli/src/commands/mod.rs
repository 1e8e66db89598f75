//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init) and shared utilities (open_db)
//! - `transactions` - Ledger commands (add, list, delete)
//! - `budget` - Monthly limit commands (show, set)
//! - `insights` - Summary and forecast commands
//! - `export` - Ledger export
//! - `audit` - Audit log listing
//! - `serve` - Web server command

pub mod audit;
pub mod budget;
pub mod core;
pub mod export;
pub mod insights;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use audit::*;
pub use budget::*;
pub use core::*;
pub use export::*;
pub use insights::*;
pub use serve::*;
pub use transactions::*;

use tally_core::db::Database;
use tracing::warn;

/// Actor recorded in the audit log for CLI mutations
pub const AUDIT_ACTOR: &str = "cli";

/// Record a mutation that has already been committed
///
/// Audit failures are logged, not returned: the change itself already stands.
pub fn record_audit(
    db: &Database,
    action: &str,
    entity_type: &str,
    entity_id: Option<i64>,
    details: Option<&str>,
) {
    if let Err(e) = db.log_audit(AUDIT_ACTOR, action, Some(entity_type), entity_id, details) {
        warn!(error = %e, action, entity_type, ?entity_id, "Failed to write audit log entry");
    }
}

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an amount with a sign and color for terminal output
pub fn format_flow_amount(flow: tally_core::FlowDirection, amount: f64) -> String {
    match flow {
        tally_core::FlowDirection::Debit => format!("\x1b[31m-${:.2}\x1b[0m", amount), // Red for spending
        tally_core::FlowDirection::Credit => format!("\x1b[32m+${:.2}\x1b[0m", amount), // Green for income
    }
}
