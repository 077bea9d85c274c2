//! Append-only performance logging.
//!
//! Records are never updated or deleted. Manual HR ratings (`HR_Manual`) are
//! limited to one per employee per server-local calendar day; automatic
//! records (module and training completions) bypass validation through
//! `insert_record` and carry a fixed score.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::performance::{PerformanceRecordRow, TYPE_HR_MANUAL};

pub mod handlers;

pub const MIN_SCORE: f64 = -2.0;
pub const MAX_SCORE: f64 = 2.0;

const DAILY_LIMIT_MESSAGE: &str =
    "You have already rated this employee today. Please try again tomorrow.";

/// Appends a caller-driven record. Scores must lie in `[MIN_SCORE,
/// MAX_SCORE]` inclusive; `HR_Manual` records are additionally subject to
/// the daily limit.
pub async fn log_performance(
    pool: &PgPool,
    employee_id: Uuid,
    score: f64,
    kind: &str,
    comment: &str,
) -> Result<PerformanceRecordRow, AppError> {
    validate_score(score)?;

    if kind == TYPE_HR_MANUAL {
        let (start, end) = local_day_bounds(Local::now().date_naive());
        if hr_rating_exists(pool, employee_id, start, end).await? {
            return Err(AppError::RateLimited(DAILY_LIMIT_MESSAGE.to_string()));
        }
    }

    let record = insert_record(pool, employee_id, score, kind, comment).await?;
    Ok(record)
}

/// Low-level append used by the automatic completion logs. No score
/// validation, no rate limit.
pub(crate) async fn insert_record(
    pool: &PgPool,
    employee_id: Uuid,
    score: f64,
    kind: &str,
    comment: &str,
) -> Result<PerformanceRecordRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO performance_records (id, employee_id, score, type, comment)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(employee_id)
    .bind(score)
    .bind(kind)
    .bind(comment)
    .fetch_one(pool)
    .await
}

#[derive(Debug, Serialize)]
pub struct RatingEligibility {
    pub can_rate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Pure query mirroring the `HR_Manual` check in [`log_performance`]: the
/// answer matches what an immediately following log attempt would decide.
pub async fn check_rating_eligibility(
    pool: &PgPool,
    employee_id: Uuid,
) -> Result<RatingEligibility, AppError> {
    let (start, end) = local_day_bounds(Local::now().date_naive());
    if hr_rating_exists(pool, employee_id, start, end).await? {
        return Ok(RatingEligibility {
            can_rate: false,
            message: Some(DAILY_LIMIT_MESSAGE.to_string()),
        });
    }
    Ok(RatingEligibility {
        can_rate: true,
        message: None,
    })
}

#[derive(Debug, Serialize)]
pub struct PerformanceSummary {
    pub total_score: f64,
    pub total_logs: usize,
    pub history: Vec<PerformanceRecordRow>,
}

/// Sum of all scores (deliberately not an average — scores are not weighted
/// or normalized across types), plus count and full history in
/// chronological order.
pub async fn summarize(pool: &PgPool, employee_id: Uuid) -> Result<PerformanceSummary, AppError> {
    let history: Vec<PerformanceRecordRow> = sqlx::query_as(
        "SELECT * FROM performance_records WHERE employee_id = $1 ORDER BY created_at",
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await?;

    let total_score = round2(history.iter().map(|r| r.score).sum());
    Ok(PerformanceSummary {
        total_score,
        total_logs: history.len(),
        history,
    })
}

fn validate_score(score: f64) -> Result<(), AppError> {
    if !score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(AppError::InvalidScore(format!(
            "Score must be between {MIN_SCORE} and {MAX_SCORE}"
        )));
    }
    Ok(())
}

/// UTC bounds of the half-open window `[local midnight, next local
/// midnight)` for a server-local date. Midnight can be skipped on DST
/// transition days; the naive time is then read as UTC.
fn local_day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let to_utc = |naive: NaiveDateTime| {
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
    };
    let start = day.and_time(NaiveTime::MIN);
    (to_utc(start), to_utc(start + Duration::days(1)))
}

async fn hr_rating_exists(
    pool: &PgPool,
    employee_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let existing: Option<(Uuid,)> = sqlx::query_as(
        r#"
        SELECT id FROM performance_records
        WHERE employee_id = $1 AND type = $2 AND created_at >= $3 AND created_at < $4
        LIMIT 1
        "#,
    )
    .bind(employee_id)
    .bind(TYPE_HR_MANUAL)
    .bind(start)
    .bind(end)
    .fetch_optional(pool)
    .await?;
    Ok(existing.is_some())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds_are_inclusive() {
        assert!(validate_score(2.0).is_ok());
        assert!(validate_score(-2.0).is_ok());
        assert!(validate_score(1.5).is_ok());
        assert!(validate_score(0.0).is_ok());
    }

    #[test]
    fn test_out_of_range_scores_rejected() {
        for score in [3.0, -2.01, 2.01, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(validate_score(score), Err(AppError::InvalidScore(_))),
                "{score} should be rejected"
            );
        }
    }

    #[test]
    fn test_day_bounds_are_ordered_and_contiguous() {
        let day = NaiveDate::from_ymd_opt(2026, 8, 27).unwrap();
        let next = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let (start, end) = local_day_bounds(day);
        assert!(start < end);
        // today's window ends exactly where tomorrow's begins
        assert_eq!(end, local_day_bounds(next).0);
    }

    #[test]
    fn test_day_bounds_contain_local_noon() {
        let day = NaiveDate::from_ymd_opt(2026, 8, 27).unwrap();
        let noon = Local
            .from_local_datetime(&day.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()))
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        let (start, end) = local_day_bounds(day);
        assert!(start <= noon && noon < end);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.004), 3.0);
        assert_eq!(round2(1.5 - 0.5 + 2.0), 3.0);
        assert_eq!(round2(-0.125), -0.13);
    }
}
