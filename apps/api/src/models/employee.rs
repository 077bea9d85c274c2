use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Employee row, reduced to the fields the assignment and progression logic
/// touch. The manager relationship is id-based — resolved via lookup, never
/// embedded — and self-reference is rejected at write time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeRow {
    pub id: Uuid,
    pub full_name: String,
    pub role: Option<String>,
    pub department: Option<String>,
    pub manager_id: Option<Uuid>,
}
