use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::performance::PerformanceRecordRow;
use crate::performance::{self, PerformanceSummary, RatingEligibility};
use crate::state::AppState;

fn default_kind() -> String {
    "Module".to_string()
}

#[derive(Deserialize)]
pub struct LogPerformanceRequest {
    pub employee_id: Uuid,
    pub score: f64,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub comment: String,
}

/// POST /api/v1/performance/logs
pub async fn handle_log_performance(
    State(state): State<AppState>,
    Json(req): Json<LogPerformanceRequest>,
) -> Result<(StatusCode, Json<PerformanceRecordRow>), AppError> {
    let record = performance::log_performance(
        &state.db,
        req.employee_id,
        req.score,
        &req.kind,
        &req.comment,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/performance/eligibility/:employee_id
pub async fn handle_rating_eligibility(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<RatingEligibility>, AppError> {
    Ok(Json(
        performance::check_rating_eligibility(&state.db, employee_id).await?,
    ))
}

/// GET /api/v1/performance/summary/:employee_id
pub async fn handle_performance_summary(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<PerformanceSummary>, AppError> {
    Ok(Json(performance::summarize(&state.db, employee_id).await?))
}
