use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::insights::posting::{self, StructuredPosting};
use crate::insights::skills::{self, SkillRecommendation, TrendingSkill};
use crate::insights::wellness::{self, WellnessTip};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StructurePostingRequest {
    pub posting_text: String,
}

/// POST /api/v1/insights/job-posting
pub async fn handle_structure_posting(
    State(state): State<AppState>,
    Json(req): Json<StructurePostingRequest>,
) -> Result<Json<StructuredPosting>, AppError> {
    if req.posting_text.trim().is_empty() {
        return Err(AppError::Validation("Posting text is required".to_string()));
    }
    let structured = posting::structure_posting(state.generator.as_ref(), &req.posting_text).await?;
    Ok(Json(structured))
}

fn default_category() -> String {
    "general".to_string()
}

#[derive(Deserialize)]
pub struct WellnessQuery {
    #[serde(default = "default_category")]
    pub category: String,
}

#[derive(Serialize)]
pub struct WellnessResponse {
    pub category: String,
    pub tips: Vec<WellnessTip>,
}

/// GET /api/v1/insights/wellness-tips?category=
pub async fn handle_wellness_tips(
    State(state): State<AppState>,
    Query(params): Query<WellnessQuery>,
) -> Result<Json<WellnessResponse>, AppError> {
    let tips = wellness::tips(state.generator.as_ref(), &params.category).await?;
    Ok(Json(WellnessResponse {
        category: params.category,
        tips,
    }))
}

fn default_department() -> String {
    "General".to_string()
}

#[derive(Deserialize)]
pub struct RecommendSkillsRequest {
    pub current_role: String,
    pub career_goal: String,
    #[serde(default = "default_department")]
    pub department: String,
}

/// POST /api/v1/insights/skills
pub async fn handle_recommend_skills(
    State(state): State<AppState>,
    Json(req): Json<RecommendSkillsRequest>,
) -> Result<Json<Vec<SkillRecommendation>>, AppError> {
    let skills = skills::recommend(
        state.generator.as_ref(),
        &req.current_role,
        &req.career_goal,
        &req.department,
    )
    .await?;
    Ok(Json(skills))
}

#[derive(Deserialize)]
pub struct TrendingQuery {
    #[serde(default = "default_department")]
    pub department: String,
}

/// GET /api/v1/insights/skills/trending?department=
pub async fn handle_trending_skills(
    State(state): State<AppState>,
    Query(params): Query<TrendingQuery>,
) -> Result<Json<Vec<TrendingSkill>>, AppError> {
    let skills = skills::trending(state.generator.as_ref(), &params.department).await?;
    Ok(Json(skills))
}
