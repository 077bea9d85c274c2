//! Skill recommendations and department trending skills.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog;
use crate::errors::AppError;
use crate::extract::{extract, Shape};
use crate::insights::prompts::{INSIGHTS_SYSTEM, SKILLS_PROMPT_TEMPLATE, TRENDING_PROMPT_TEMPLATE};
use crate::llm_client::TextGenerator;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecommendation {
    pub skill: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub timeframe: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingSkill {
    pub skill: String,
    #[serde(default)]
    pub trend: String,
    #[serde(default)]
    pub demand_level: String,
}

/// Skills to develop for a role-to-goal transition.
pub async fn recommend(
    generator: &dyn TextGenerator,
    current_role: &str,
    career_goal: &str,
    department: &str,
) -> Result<Vec<SkillRecommendation>, AppError> {
    let prompt = SKILLS_PROMPT_TEMPLATE
        .replace("{current_role}", current_role)
        .replace("{career_goal}", career_goal)
        .replace("{department}", department);

    let raw = match generator.generate(INSIGHTS_SYSTEM, &prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Skill recommendation failed: {e}");
            return Ok(catalog::default_skills());
        }
    };

    let result = extract(&raw, Shape::Array, &[], catalog::default_skills());
    if let Some(reason) = result.fallback_reason() {
        warn!(reason, "Skill extraction degraded to fallback");
    }

    let skills = result.into_value();
    if skills.is_empty() {
        return Ok(catalog::default_skills());
    }
    Ok(skills)
}

/// Trending skills for a department.
pub async fn trending(
    generator: &dyn TextGenerator,
    department: &str,
) -> Result<Vec<TrendingSkill>, AppError> {
    let prompt = TRENDING_PROMPT_TEMPLATE.replace("{department}", department);

    let raw = match generator.generate(INSIGHTS_SYSTEM, &prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Trending skills lookup failed for {department}: {e}");
            return Ok(catalog::default_trending());
        }
    };

    let result = extract(&raw, Shape::Array, &[], catalog::default_trending());
    if let Some(reason) = result.fallback_reason() {
        warn!(reason, department, "Trending skill extraction degraded to fallback");
    }

    let skills = result.into_value();
    if skills.is_empty() {
        return Ok(catalog::default_trending());
    }
    Ok(skills)
}
