//! Ledger handlers

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{parse_json_body, parse_query, record_audit};
use crate::{AppError, AppState, MAX_PAGE_LIMIT};
use tally_core::models::{NewTransaction, Transaction};
use tally_core::LedgerStore;

/// Query parameters for listing the ledger
#[derive(Debug, Deserialize)]
pub struct ExpenseQuery {
    /// Omit to return the whole ledger
    pub limit: Option<i64>,
}

/// Request body for recording a transaction
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub amount: f64,
    #[serde(rename = "type")]
    pub flow: String,
    pub description: Option<String>,
    pub date: String,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    /// False when the ID was already gone
    pub deleted: bool,
}

/// GET /api/expenses - List transactions, newest first
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ExpenseQuery>, QueryRejection>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let params = parse_query(query)?;
    let limit = params.limit.map(|l| l.max(1).min(MAX_PAGE_LIMIT));
    let transactions = state.db.list_transactions(limit)?;
    Ok(Json(transactions))
}

/// POST /api/expenses - Record a transaction
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Transaction>, AppError> {
    let req: CreateExpenseRequest = parse_json_body(&body)?;

    let new_tx = NewTransaction::parse(
        req.amount,
        &req.flow,
        req.description.as_deref(),
        &req.date,
    )
    .map_err(AppError::from_core)?;

    let tx = state.db.append_transaction(&new_tx)?;

    record_audit(
        &state.db,
        "create",
        "transaction",
        Some(tx.id),
        Some(&format!(
            "amount={:.2}, type={}, date={}",
            tx.amount, tx.flow, tx.date
        )),
    );

    info!(id = tx.id, flow = %tx.flow, amount = tx.amount, "Recorded transaction");
    Ok(Json(tx))
}

/// DELETE /api/expenses/:id - Delete a transaction (no-op if absent)
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state.db.delete_transaction(id)?;

    if deleted {
        record_audit(&state.db, "delete", "transaction", Some(id), None);
    }

    Ok(Json(DeleteResponse {
        success: true,
        deleted,
    }))
}
