// LLM prompt constants for learning-path generation.

/// System prompt — enforces JSON-only output.
pub const PATH_SYSTEM: &str = "You are an expert career development coach. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Path generation template.
/// Replace `{current_role}` and `{career_goal}` before sending.
pub const PATH_PROMPT_TEMPLATE: &str = r#"Create a detailed learning path for someone transitioning from {current_role} to {career_goal}.

Provide 5-7 learning modules with:
- Module name (numbered)
- Description (2-3 sentences explaining what will be learned)
- Duration (in weeks, realistic timeframe)
- Key topics (list of 4-5 specific topics)
- Prerequisites (what's needed before starting this module)
- Resources (specific types of learning resources)

Return a JSON object with this EXACT schema:
{
  "title": "Path from {current_role} to {career_goal}",
  "total_duration_weeks": 24,
  "modules": [
    {
      "module_name": "1. Module Title",
      "description": "Detailed description of what this module covers",
      "duration_weeks": 4,
      "key_topics": ["Topic 1", "Topic 2", "Topic 3", "Topic 4"],
      "prerequisites": ["Prerequisite 1"],
      "resources": ["Resource type 1", "Resource type 2"]
    }
  ]
}"#;
