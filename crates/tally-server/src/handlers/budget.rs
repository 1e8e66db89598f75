//! Budget handlers

use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};

use super::{parse_json_body, record_audit};
use crate::{AppError, AppState};
use tally_core::models::validate_monthly_limit;

/// Request and response body for the monthly limit
#[derive(Debug, Serialize, Deserialize)]
pub struct BudgetBody {
    pub limit: f64,
}

/// GET /api/budget - Current monthly limit
pub async fn get_budget(State(state): State<Arc<AppState>>) -> Result<Json<BudgetBody>, AppError> {
    let budget = state.db.get_budget()?;
    Ok(Json(BudgetBody {
        limit: budget.monthly_limit,
    }))
}

/// POST /api/budget - Replace the monthly limit
pub async fn update_budget(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<BudgetBody>, AppError> {
    let req: BudgetBody = parse_json_body(&body)?;
    let limit = validate_monthly_limit(req.limit).map_err(AppError::from_core)?;

    let previous = state.db.get_budget()?;
    let budget = state.db.set_budget(limit)?;

    record_audit(
        &state.db,
        "update",
        "budget",
        None,
        Some(&format!(
            "monthly_limit: {:.2} -> {:.2}",
            previous.monthly_limit, budget.monthly_limit
        )),
    );

    Ok(Json(BudgetBody {
        limit: budget.monthly_limit,
    }))
}
