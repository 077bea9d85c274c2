use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Persisted learning path. The plan is strongly typed in memory and stored
/// as a single JSONB column; (de)serialization happens only at this boundary.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LearningPathRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub current_role: String,
    pub career_goal: String,
    pub plan: Json<LearningPlan>,
    /// 1-based position of the next module eligible for completion.
    /// `modules.len() + 1` means the path is fully completed.
    pub progress: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The module sequence of a learning path. Extraction fills absent fields
/// with defaults, so every field tolerates being missing on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPlan {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub total_duration_weeks: u32,
    #[serde(default)]
    pub modules: Vec<PlanModule>,
}

/// A single module inside a plan. No identity outside its parent path and
/// position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanModule {
    pub module_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration_weeks: u32,
    #[serde(default)]
    pub key_topics: Vec<String>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Enrollment lifecycle. Transitions are caller-driven; only `Completed` has
/// a side effect (completion date + performance record).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingStatus {
    Enrolled,
    InProgress,
    Completed,
    Dropped,
}

impl TrainingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingStatus::Enrolled => "Enrolled",
            TrainingStatus::InProgress => "InProgress",
            TrainingStatus::Completed => "Completed",
            TrainingStatus::Dropped => "Dropped",
        }
    }
}

/// One row per (employee, training) pair — duplicates are skipped at
/// enrollment time and backstopped by a unique constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrainingEnrollmentRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub training_id: Uuid,
    pub status: String,
    pub enrollment_date: DateTime<Utc>,
    pub completion_date: Option<NaiveDate>,
    pub score: Option<f64>,
    pub certificate_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_module_defaults_apply_to_sparse_json() {
        let parsed: PlanModule =
            serde_json::from_str(r#"{"module_name": "1. Foundations"}"#).unwrap();
        assert_eq!(parsed.module_name, "1. Foundations");
        assert!(!parsed.completed);
        assert!(parsed.key_topics.is_empty());
        assert_eq!(parsed.duration_weeks, 0);
    }

    #[test]
    fn test_training_status_round_trip() {
        for status in [
            TrainingStatus::Enrolled,
            TrainingStatus::InProgress,
            TrainingStatus::Completed,
            TrainingStatus::Dropped,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }
}
