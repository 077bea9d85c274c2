//! Category-scoped workplace wellness tips.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog;
use crate::errors::AppError;
use crate::extract::{extract, Shape};
use crate::insights::prompts::{INSIGHTS_SYSTEM, WELLNESS_PROMPT_TEMPLATE};
use crate::llm_client::TextGenerator;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessTip {
    pub tip: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
}

/// Generates tips for a category. Unknown categories, failed calls, empty
/// results, and unextractable output all degrade to the static catalog.
pub async fn tips(
    generator: &dyn TextGenerator,
    category: &str,
) -> Result<Vec<WellnessTip>, AppError> {
    if !catalog::WELLNESS_CATEGORIES.contains(&category) {
        warn!(category, "Unknown wellness category, serving catalog tips");
        return Ok(catalog::wellness_tips(category));
    }

    let prompt = WELLNESS_PROMPT_TEMPLATE.replace("{category}", category);
    let raw = match generator.generate(INSIGHTS_SYSTEM, &prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Wellness tip generation failed for {category}: {e}");
            return Ok(catalog::wellness_tips(category));
        }
    };

    let result = extract(&raw, Shape::Array, &[], catalog::wellness_tips(category));
    if let Some(reason) = result.fallback_reason() {
        warn!(reason, category, "Wellness tip extraction degraded to fallback");
    }

    let tips = result.into_value();
    if tips.is_empty() {
        return Ok(catalog::wellness_tips(category));
    }
    Ok(tips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{FailingGenerator, StaticGenerator};

    #[tokio::test]
    async fn test_generated_tips_are_parsed() {
        let generator = StaticGenerator(
            r#"[{"tip": "Stretch hourly", "category": "physical", "difficulty": "easy"}]"#
                .to_string(),
        );
        let tips = tips(&generator, "physical").await.unwrap();
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].tip, "Stretch hourly");
    }

    #[tokio::test]
    async fn test_unknown_category_serves_catalog_without_calling_llm() {
        // FailingGenerator would surface if the LLM were consulted.
        let tips = tips(&FailingGenerator, "astrology").await.unwrap();
        assert!(!tips.is_empty());
        assert!(tips.iter().all(|t| t.category == "general"));
    }

    #[tokio::test]
    async fn test_empty_array_degrades_to_catalog() {
        let generator = StaticGenerator("[]".to_string());
        let tips = tips(&generator, "sleep").await.unwrap();
        assert!(!tips.is_empty());
        assert!(tips.iter().all(|t| t.category == "sleep"));
    }

    #[tokio::test]
    async fn test_generator_failure_degrades_to_catalog() {
        let tips = tips(&FailingGenerator, "mental").await.unwrap();
        assert!(!tips.is_empty());
        assert!(tips.iter().all(|t| t.category == "mental"));
    }
}
