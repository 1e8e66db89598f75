//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod audit;
pub mod budget;
pub mod expenses;
pub mod insights;

// Re-export all handlers for use in router
pub use audit::*;
pub use budget::*;
pub use expenses::*;
pub use insights::*;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query},
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::{AppError, AUDIT_ACTOR, MAX_BODY_SIZE};
use tally_core::db::Database;

/// Decode a JSON request body, reporting any problem as a 400
pub(crate) fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    if body.len() > MAX_BODY_SIZE {
        return Err(AppError::bad_request("Request body too large"));
    }
    serde_json::from_slice(body).map_err(|_| AppError::bad_request("Invalid JSON"))
}

/// Unwrap query parameters, reporting a rejection as a JSON 400
pub(crate) fn parse_query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(params)| params)
        .map_err(|_| AppError::bad_request("Invalid query parameters"))
}

/// Record a mutation that has already been committed
///
/// A failed audit insert is logged and swallowed: the write it describes
/// stands, and failing the request would invite a duplicate retry.
pub(crate) fn record_audit(
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
