pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::employees;
use crate::insights::handlers as insights;
use crate::learning::handlers as learning;
use crate::performance::handlers as performance;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Learning paths & progression
        .route(
            "/api/v1/learning/paths",
            post(learning::handle_generate_path),
        )
        .route(
            "/api/v1/learning/paths/:employee_id",
            get(learning::handle_list_paths),
        )
        .route(
            "/api/v1/learning/modules",
            patch(learning::handle_complete_module),
        )
        .route(
            "/api/v1/learning/options",
            get(learning::handle_learning_options),
        )
        // Trainings
        .route(
            "/api/v1/trainings/:employee_id",
            get(learning::handle_training_progress),
        )
        .route(
            "/api/v1/trainings/status",
            patch(learning::handle_update_training_status),
        )
        // Employees
        .route("/api/v1/employees/assign", post(employees::handle_assign))
        // Performance
        .route(
            "/api/v1/performance/logs",
            post(performance::handle_log_performance),
        )
        .route(
            "/api/v1/performance/eligibility/:employee_id",
            get(performance::handle_rating_eligibility),
        )
        .route(
            "/api/v1/performance/summary/:employee_id",
            get(performance::handle_performance_summary),
        )
        // AI insights
        .route(
            "/api/v1/insights/job-posting",
            post(insights::handle_structure_posting),
        )
        .route(
            "/api/v1/insights/wellness-tips",
            get(insights::handle_wellness_tips),
        )
        .route(
            "/api/v1/insights/skills",
            post(insights::handle_recommend_skills),
        )
        .route(
            "/api/v1/insights/skills/trending",
            get(insights::handle_trending_skills),
        )
        .with_state(state)
}
