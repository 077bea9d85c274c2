use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::catalog;
use crate::errors::AppError;
use crate::learning::paths::{self, ModuleUpdate};
use crate::learning::training::{self, StatusUpdate};
use crate::models::learning::{LearningPathRow, TrainingEnrollmentRow};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GeneratePathRequest {
    pub employee_id: Uuid,
    pub current_role: String,
    pub career_goal: String,
}

/// POST /api/v1/learning/paths
pub async fn handle_generate_path(
    State(state): State<AppState>,
    Json(req): Json<GeneratePathRequest>,
) -> Result<(StatusCode, Json<LearningPathRow>), AppError> {
    let row = paths::generate_path(
        &state.db,
        state.generator.as_ref(),
        req.employee_id,
        &req.current_role,
        &req.career_goal,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/learning/paths/:employee_id
pub async fn handle_list_paths(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<Vec<LearningPathRow>>, AppError> {
    Ok(Json(paths::list_paths(&state.db, employee_id).await?))
}

fn default_completed() -> bool {
    true
}

#[derive(Deserialize)]
pub struct CompleteModuleRequest {
    pub path_id: Uuid,
    pub module_index: usize,
    #[serde(default = "default_completed")]
    pub completed: bool,
}

/// PATCH /api/v1/learning/modules
pub async fn handle_complete_module(
    State(state): State<AppState>,
    Json(req): Json<CompleteModuleRequest>,
) -> Result<Json<ModuleUpdate>, AppError> {
    let update =
        paths::complete_module(&state.db, req.path_id, req.module_index, req.completed).await?;
    Ok(Json(update))
}

/// GET /api/v1/learning/options
pub async fn handle_learning_options() -> Json<catalog::RoleOptions> {
    Json(catalog::roles_and_goals())
}

/// GET /api/v1/trainings/:employee_id
pub async fn handle_training_progress(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<Vec<TrainingEnrollmentRow>>, AppError> {
    Ok(Json(
        training::progress_for_employee(&state.db, employee_id).await?,
    ))
}

#[derive(Deserialize)]
pub struct UpdateTrainingStatusRequest {
    pub enrollment_id: Uuid,
    #[serde(flatten)]
    pub update: StatusUpdate,
}

/// PATCH /api/v1/trainings/status
pub async fn handle_update_training_status(
    State(state): State<AppState>,
    Json(req): Json<UpdateTrainingStatusRequest>,
) -> Result<Json<TrainingEnrollmentRow>, AppError> {
    let row = training::update_status(&state.db, req.enrollment_id, req.update).await?;
    Ok(Json(row))
}
