//! Structured job postings — rewrites a raw posting into typed sections.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog;
use crate::errors::AppError;
use crate::extract::{extract, RequiredField, Shape};
use crate::insights::prompts::{INSIGHTS_SYSTEM, POSTING_PROMPT_TEMPLATE};
use crate::llm_client::TextGenerator;

/// Sections of a structured posting. Every field tolerates being absent on
/// the wire so partially structured model output still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredPosting {
    #[serde(default)]
    pub role_definition: RoleDefinition,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub must_have_skills: Vec<String>,
    #[serde(default)]
    pub nice_to_have_skills: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub structured_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleDefinition {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub mission: String,
}

const REQUIRED_FIELDS: &[RequiredField] = &[
    RequiredField::list("responsibilities"),
    RequiredField::list("must_have_skills"),
    RequiredField::list("nice_to_have_skills"),
    RequiredField::list("tools"),
    RequiredField::list("benefits"),
    RequiredField::text("structured_text"),
];

/// Structures a raw posting via the LLM. A failed call or unextractable
/// response yields the catalog fallback, which embeds the raw input so the
/// caller still gets the full text back.
pub async fn structure_posting(
    generator: &dyn TextGenerator,
    raw_posting: &str,
) -> Result<StructuredPosting, AppError> {
    let prompt = POSTING_PROMPT_TEMPLATE.replace("{posting}", raw_posting);

    let raw = match generator.generate(INSIGHTS_SYSTEM, &prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Job posting generation failed: {e}");
            return Ok(catalog::fallback_posting(raw_posting));
        }
    };

    let result = extract(
        &raw,
        Shape::Object,
        REQUIRED_FIELDS,
        catalog::fallback_posting(raw_posting),
    );
    if let Some(reason) = result.fallback_reason() {
        warn!(reason, "Job posting extraction degraded to fallback");
    }
    Ok(result.into_value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{FailingGenerator, StaticGenerator};

    #[tokio::test]
    async fn test_well_formed_output_is_parsed() {
        let generator = StaticGenerator(
            r#"{
                "role_definition": {"job_title": "Data Analyst", "summary": "s", "mission": "m"},
                "responsibilities": ["analyze"],
                "must_have_skills": ["SQL"],
                "nice_to_have_skills": [],
                "tools": ["dbt"],
                "benefits": [],
                "structured_text": "Data Analyst..."
            }"#
            .to_string(),
        );
        let posting = structure_posting(&generator, "raw text").await.unwrap();
        assert_eq!(posting.role_definition.job_title, "Data Analyst");
        assert_eq!(posting.must_have_skills, vec!["SQL".to_string()]);
    }

    #[tokio::test]
    async fn test_partial_output_gets_defaults_not_fallback() {
        let generator = StaticGenerator(
            r#"{"role_definition": {"job_title": "Engineer"}, "responsibilities": ["build"]}"#
                .to_string(),
        );
        let posting = structure_posting(&generator, "raw text").await.unwrap();
        assert_eq!(posting.role_definition.job_title, "Engineer");
        assert!(posting.tools.is_empty());
        assert!(posting.structured_text.is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_output_falls_back_with_raw_text() {
        let generator = StaticGenerator("I cannot help with that.".to_string());
        let posting = structure_posting(&generator, "the original posting")
            .await
            .unwrap();
        assert_eq!(posting.structured_text, "the original posting");
    }

    #[tokio::test]
    async fn test_generator_failure_falls_back() {
        let posting = structure_posting(&FailingGenerator, "the original posting")
            .await
            .unwrap();
        assert_eq!(posting.structured_text, "the original posting");
    }
}
