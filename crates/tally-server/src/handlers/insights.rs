//! Summary and forecast handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use super::parse_query;
use crate::{AppError, AppState};
use tally_core::models::{Forecast, Summary, SummaryWindow};
use tally_core::{ForecastEngine, SummaryEngine};

/// Query parameters for the monthly summary
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// `from_month_start` (default) or `month_to_date`
    pub window: Option<String>,
}

/// GET /api/summary - Current-month totals and budget status
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Result<Json<Summary>, AppError> {
    let params = parse_query(query)?;
    let window = match params.window.as_deref() {
        Some(w) => w
            .parse::<SummaryWindow>()
            .map_err(|e| AppError::bad_request(&e))?,
        None => SummaryWindow::default(),
    };

    let summary = SummaryEngine::new(&state.db)
        .with_window(window)
        .summarize_current_month()?;

    Ok(Json(summary))
}

/// GET /api/prediction - Projected spending for the next 30 days
pub async fn get_prediction(State(state): State<Arc<AppState>>) -> Result<Json<Forecast>, AppError> {
    let forecast = ForecastEngine::new(&state.db).forecast()?;
    Ok(Json(forecast))
}
