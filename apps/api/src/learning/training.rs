//! Training enrollment lifecycle.
//!
//! Status transitions are caller-driven and carry no ordering constraint
//! across trainings. Reaching `Completed` stamps the completion date and
//! auto-logs a performance record.

use chrono::Local;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::learning::{TrainingEnrollmentRow, TrainingStatus};
use crate::models::performance::TYPE_TRAINING_COMPLETE;
use crate::performance;

/// Fixed score for auto-logged training completion records.
const COMPLETION_SCORE: f64 = 100.0;

/// Enrollments for an employee, oldest first.
pub async fn progress_for_employee(
    pool: &PgPool,
    employee_id: Uuid,
) -> Result<Vec<TrainingEnrollmentRow>, AppError> {
    let rows = sqlx::query_as(
        "SELECT * FROM training_enrollments WHERE employee_id = $1 ORDER BY enrollment_date",
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Enrolls an employee in a training. At most one enrollment exists per
/// (employee, training) pair — a duplicate request returns the existing row
/// unchanged.
pub async fn enroll(
    pool: &PgPool,
    employee_id: Uuid,
    training_id: Uuid,
) -> Result<TrainingEnrollmentRow, AppError> {
    let existing: Option<TrainingEnrollmentRow> = sqlx::query_as(
        "SELECT * FROM training_enrollments WHERE employee_id = $1 AND training_id = $2",
    )
    .bind(employee_id)
    .bind(training_id)
    .fetch_optional(pool)
    .await?;

    if let Some(row) = existing {
        return Ok(row);
    }

    let row = sqlx::query_as(
        r#"
        INSERT INTO training_enrollments (id, employee_id, training_id, status, enrollment_date)
        VALUES ($1, $2, $3, $4, now())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(employee_id)
    .bind(training_id)
    .bind(TrainingStatus::Enrolled.as_str())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: TrainingStatus,
    pub score: Option<f64>,
    pub certificate_url: Option<String>,
}

/// Sets an enrollment's status. `Completed` additionally stamps today's date
/// and appends a performance record; the record write is best-effort and
/// never fails the status change.
pub async fn update_status(
    pool: &PgPool,
    enrollment_id: Uuid,
    update: StatusUpdate,
) -> Result<TrainingEnrollmentRow, AppError> {
    let existing: Option<TrainingEnrollmentRow> =
        sqlx::query_as("SELECT * FROM training_enrollments WHERE id = $1")
            .bind(enrollment_id)
            .fetch_optional(pool)
            .await?;
    let existing = existing
        .ok_or_else(|| AppError::NotFound(format!("Enrollment {enrollment_id} not found")))?;

    let completion_date = if update.status == TrainingStatus::Completed {
        Some(Local::now().date_naive())
    } else {
        existing.completion_date
    };

    let row: TrainingEnrollmentRow = sqlx::query_as(
        r#"
        UPDATE training_enrollments
        SET status = $1,
            completion_date = $2,
            score = COALESCE($3, score),
            certificate_url = COALESCE($4, certificate_url)
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(update.status.as_str())
    .bind(completion_date)
    .bind(update.score)
    .bind(update.certificate_url)
    .bind(enrollment_id)
    .fetch_one(pool)
    .await?;

    if update.status == TrainingStatus::Completed {
        if let Err(e) = performance::insert_record(
            pool,
            row.employee_id,
            COMPLETION_SCORE,
            TYPE_TRAINING_COMPLETE,
            "Employee completed training",
        )
        .await
        {
            warn!(
                "Failed to auto-log training completion for employee {}: {e}",
                row.employee_id
            );
        }
    }

    Ok(row)
}
