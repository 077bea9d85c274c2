//! Manager and training assignment for employees.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::learning::training;
use crate::models::employee::EmployeeRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AssignmentRequest {
    pub employee_id: Uuid,
    pub manager_id: Option<Uuid>,
    pub training_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub employee_id: Uuid,
    pub manager_id: Option<Uuid>,
    pub training_assigned: bool,
}

/// Updates an employee's manager and/or enrolls them in a training. The
/// manager reference is stored as an id and resolved via lookup; an employee
/// can never be their own manager.
pub async fn assign(pool: &PgPool, req: &AssignmentRequest) -> Result<AssignmentResponse, AppError> {
    let employee: Option<EmployeeRow> = sqlx::query_as("SELECT * FROM employees WHERE id = $1")
        .bind(req.employee_id)
        .fetch_optional(pool)
        .await?;
    let mut employee = employee
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", req.employee_id)))?;

    if let Some(manager_id) = req.manager_id {
        validate_manager(req.employee_id, manager_id)?;

        let manager: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM employees WHERE id = $1")
            .bind(manager_id)
            .fetch_optional(pool)
            .await?;
        if manager.is_none() {
            return Err(AppError::NotFound(format!("Manager {manager_id} not found")));
        }

        sqlx::query("UPDATE employees SET manager_id = $1 WHERE id = $2")
            .bind(manager_id)
            .bind(req.employee_id)
            .execute(pool)
            .await?;
        employee.manager_id = Some(manager_id);
    }

    let mut training_assigned = false;
    if let Some(training_id) = req.training_id {
        let training: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM trainings WHERE id = $1")
            .bind(training_id)
            .fetch_optional(pool)
            .await?;
        if training.is_none() {
            return Err(AppError::NotFound(format!(
                "Training {training_id} not found"
            )));
        }

        training::enroll(pool, req.employee_id, training_id).await?;
        training_assigned = true;
    }

    Ok(AssignmentResponse {
        employee_id: req.employee_id,
        manager_id: employee.manager_id,
        training_assigned,
    })
}

fn validate_manager(employee_id: Uuid, manager_id: Uuid) -> Result<(), AppError> {
    if manager_id == employee_id {
        return Err(AppError::Validation(
            "Employee cannot be their own manager".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/v1/employees/assign
pub async fn handle_assign(
    State(state): State<AppState>,
    Json(req): Json<AssignmentRequest>,
) -> Result<Json<AssignmentResponse>, AppError> {
    Ok(Json(assign(&state.db, &req).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_management_is_rejected() {
        let id = Uuid::new_v4();
        assert!(matches!(
            validate_manager(id, id),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_distinct_manager_is_accepted() {
        assert!(validate_manager(Uuid::new_v4(), Uuid::new_v4()).is_ok());
    }
}
