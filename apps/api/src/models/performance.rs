use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Record emitted automatically when a learning module is completed.
pub const TYPE_MODULE_COMPLETION: &str = "Module Completion";
/// Record emitted automatically when a training reaches `Completed`.
pub const TYPE_TRAINING_COMPLETE: &str = "Employee Training complete";
/// Manual HR rating — limited to one per employee per calendar day.
pub const TYPE_HR_MANUAL: &str = "HR_Manual";

/// Append-only performance log entry. Never updated or deleted; aggregate
/// views sum scores per employee.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PerformanceRecordRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub score: f64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
