//! Learning-path generation and the sequential module-unlock state machine.
//!
//! A path holds an ordered module sequence and a 1-based `progress` cursor.
//! The module at 0-based index `i` can be acted on only while
//! `progress == i + 1`; every accepted call advances the cursor by one and
//! never moves it back. `progress == modules.len() + 1` is terminal — every
//! further attempt is rejected as out of sequence.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::catalog;
use crate::errors::AppError;
use crate::extract::{coerce, recover, RequiredField, Shape, StructuredResult};
use crate::learning::prompts::{PATH_PROMPT_TEMPLATE, PATH_SYSTEM};
use crate::llm_client::TextGenerator;
use crate::models::learning::{LearningPathRow, LearningPlan};
use crate::models::performance::TYPE_MODULE_COMPLETION;
use crate::performance;

/// Fixed score for auto-logged module completion records.
const COMPLETION_SCORE: f64 = 100.0;

const PLAN_FIELDS: &[RequiredField] = &[
    RequiredField::text("title"),
    RequiredField::list("modules"),
];

/// Generates a plan and persists it as a new path with `progress = 1`.
/// Always creates a new record; prior paths for the employee are untouched.
/// The persisted module sequence is never empty — extraction and generation
/// failures degrade to the catalog plan.
pub async fn generate_path(
    pool: &PgPool,
    generator: &dyn TextGenerator,
    employee_id: Uuid,
    current_role: &str,
    career_goal: &str,
) -> Result<LearningPathRow, AppError> {
    let plan = request_plan(generator, current_role, career_goal).await;

    let row: LearningPathRow = sqlx::query_as(
        r#"
        INSERT INTO learning_paths (id, employee_id, current_role, career_goal, plan, progress)
        VALUES ($1, $2, $3, $4, $5, 1)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(employee_id)
    .bind(current_role)
    .bind(career_goal)
    .bind(Json(&plan))
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Saved paths for an employee, newest first.
pub async fn list_paths(pool: &PgPool, employee_id: Uuid) -> Result<Vec<LearningPathRow>, AppError> {
    let rows = sqlx::query_as(
        "SELECT * FROM learning_paths WHERE employee_id = $1 ORDER BY created_at DESC",
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Result of an accepted module update.
#[derive(Debug, Serialize)]
pub struct ModuleUpdate {
    pub progress: i32,
    pub module_index: usize,
    pub completed: bool,
}

/// Marks the module at `module_index` and advances the cursor.
///
/// The cursor advances whether `completed` is true or false — a "not
/// completed" mark still consumes the sequence slot. The row is locked for
/// the duration of the check-then-write so concurrent calls cannot
/// double-advance. The completion performance record is a best-effort side
/// effect: a failed write is logged and never rolls back the module update.
pub async fn complete_module(
    pool: &PgPool,
    path_id: Uuid,
    module_index: usize,
    completed: bool,
) -> Result<ModuleUpdate, AppError> {
    let mut tx = pool.begin().await?;

    let row: Option<LearningPathRow> =
        sqlx::query_as("SELECT * FROM learning_paths WHERE id = $1 FOR UPDATE")
            .bind(path_id)
            .fetch_optional(&mut *tx)
            .await?;
    let row = row.ok_or_else(|| AppError::NotFound(format!("Learning path {path_id} not found")))?;

    let mut plan = row.plan.0.clone();
    check_unlock(row.progress, module_index, plan.modules.len())?;

    plan.modules[module_index].completed = completed;
    let progress = row.progress + 1;

    sqlx::query("UPDATE learning_paths SET plan = $1, progress = $2, updated_at = now() WHERE id = $3")
        .bind(Json(&plan))
        .bind(progress)
        .bind(path_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    if completed {
        if let Err(e) = performance::insert_record(
            pool,
            row.employee_id,
            COMPLETION_SCORE,
            TYPE_MODULE_COMPLETION,
            "Module Completion",
        )
        .await
        {
            warn!(
                "Failed to auto-log module completion for employee {}: {e}",
                row.employee_id
            );
        }
    }

    Ok(ModuleUpdate {
        progress,
        module_index,
        completed,
    })
}

/// The unlock rule: index in range, and exactly the module the cursor
/// points at.
fn check_unlock(progress: i32, module_index: usize, module_count: usize) -> Result<(), AppError> {
    if module_index >= module_count {
        return Err(AppError::InvalidIndex(format!(
            "Module index {module_index} is out of range (path has {module_count} modules)"
        )));
    }
    if module_index as i32 + 1 != progress {
        return Err(AppError::OutOfSequence(format!(
            "You must complete module {progress} first"
        )));
    }
    Ok(())
}

async fn request_plan(
    generator: &dyn TextGenerator,
    current_role: &str,
    career_goal: &str,
) -> LearningPlan {
    let prompt = PATH_PROMPT_TEMPLATE
        .replace("{current_role}", current_role)
        .replace("{career_goal}", career_goal);

    let raw = match generator.generate(PATH_SYSTEM, &prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Learning path generation failed: {e}");
            return catalog::default_learning_plan(current_role, career_goal);
        }
    };

    let result = extract_plan(&raw, catalog::default_learning_plan(current_role, career_goal));
    if let Some(reason) = result.fallback_reason() {
        warn!(reason, "Learning path extraction degraded to fallback");
    }

    let plan = result.into_value();
    if plan.modules.is_empty() {
        warn!("Generated plan has no modules, serving catalog plan");
        return catalog::default_learning_plan(current_role, career_goal);
    }
    plan
}

/// Plan-specific extraction: recovers an object, unwraps a `learning_path`
/// envelope if the model added one, and coerces with required fields.
fn extract_plan(raw: &str, fallback: LearningPlan) -> StructuredResult<LearningPlan> {
    let value = match recover(raw, Shape::Object) {
        Ok(v) => v,
        Err(reason) => {
            return StructuredResult::Fallback {
                value: fallback,
                reason,
            }
        }
    };

    let value = match value.get("learning_path") {
        Some(inner) if inner.is_object() => inner.clone(),
        _ => value,
    };

    match coerce(value, PLAN_FIELDS) {
        Some(plan) => StructuredResult::Parsed(plan),
        None => StructuredResult::Fallback {
            value: fallback,
            reason: "schema",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback() -> LearningPlan {
        catalog::default_learning_plan("engineer", "tech-lead")
    }

    // ── unlock rule ─────────────────────────────────────────────────────────

    #[test]
    fn test_first_module_unlocks_at_progress_one() {
        assert!(check_unlock(1, 0, 3).is_ok());
    }

    #[test]
    fn test_repeating_a_completed_module_is_out_of_sequence() {
        // progress advanced to 2 after completing index 0
        let err = check_unlock(2, 0, 3).unwrap_err();
        assert!(matches!(err, AppError::OutOfSequence(_)));
    }

    #[test]
    fn test_skipping_ahead_is_out_of_sequence() {
        let err = check_unlock(2, 2, 3).unwrap_err();
        let AppError::OutOfSequence(msg) = err else {
            panic!("expected OutOfSequence");
        };
        assert!(msg.contains("module 2"), "message names the required module: {msg}");
    }

    #[test]
    fn test_last_module_unlocks_then_path_is_terminal() {
        assert!(check_unlock(3, 2, 3).is_ok());
        // terminal state: progress = N + 1, no index can match
        for index in 0..3 {
            assert!(matches!(
                check_unlock(4, index, 3),
                Err(AppError::OutOfSequence(_))
            ));
        }
    }

    #[test]
    fn test_index_out_of_range_is_invalid_index() {
        assert!(matches!(
            check_unlock(1, 3, 3),
            Err(AppError::InvalidIndex(_))
        ));
        assert!(matches!(
            check_unlock(1, 0, 0),
            Err(AppError::InvalidIndex(_))
        ));
    }

    // ── plan extraction ─────────────────────────────────────────────────────

    #[test]
    fn test_plan_extracted_from_clean_json() {
        let raw = r#"{
            "title": "Path from engineer to tech-lead",
            "total_duration_weeks": 12,
            "modules": [{"module_name": "1. Basics"}]
        }"#;
        let result = extract_plan(raw, fallback());
        assert!(!result.is_fallback());
        let plan = result.into_value();
        assert_eq!(plan.total_duration_weeks, 12);
        assert_eq!(plan.modules.len(), 1);
        assert!(!plan.modules[0].completed);
    }

    #[test]
    fn test_plan_envelope_is_unwrapped() {
        let raw = r#"{"learning_path": {"title": "t", "modules": [{"module_name": "1. A"}]}}"#;
        let result = extract_plan(raw, fallback());
        assert!(!result.is_fallback());
        assert_eq!(result.into_value().modules[0].module_name, "1. A");
    }

    #[test]
    fn test_fenced_plan_with_prose_is_recovered() {
        let raw = "Here you go:\n```json\n{\"title\": \"t\", \"modules\": [{\"module_name\": \"1. A\"},]}\n```";
        let result = extract_plan(raw, fallback());
        assert!(!result.is_fallback());
    }

    #[test]
    fn test_unusable_output_falls_back_to_catalog_plan() {
        let result = extract_plan("no json here", fallback());
        assert_eq!(result.fallback_reason(), Some("unparseable"));
        assert_eq!(result.into_value(), fallback());
    }

    #[test]
    fn test_missing_modules_field_defaults_to_empty_list() {
        // request_plan rejects the empty list and serves the catalog plan
        let result = extract_plan(r#"{"title": "t"}"#, fallback());
        assert!(!result.is_fallback());
        assert!(result.into_value().modules.is_empty());
    }
}
