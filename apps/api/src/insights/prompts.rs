// All LLM prompt constants for the insights module.

/// System prompt shared by insight generation — enforces JSON-only output.
pub const INSIGHTS_SYSTEM: &str = "You are an expert HR assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Job posting structuring template. Replace `{posting}` before sending.
pub const POSTING_PROMPT_TEMPLATE: &str = r#"Rewrite and structure the following job posting into clean, well-organized sections.

Return a JSON object with this EXACT schema (no extra fields):
{
  "role_definition": {
    "job_title": "",
    "summary": "",
    "mission": ""
  },
  "responsibilities": [],
  "must_have_skills": [],
  "nice_to_have_skills": [],
  "tools": [],
  "benefits": [],
  "structured_text": ""
}

RAW POSTING:
{posting}"#;

/// Wellness tips template. Replace `{category}` before sending.
pub const WELLNESS_PROMPT_TEMPLATE: &str = r#"Generate 5 specific, actionable workplace wellness tips for the category: {category}

Requirements:
- Each tip should be practical and easy to implement
- Include a difficulty level (easy/medium/hard)
- Focus on workplace wellness

Return a JSON array:
[
  {"tip": "specific actionable tip", "category": "{category}", "difficulty": "easy"}
]"#;

/// Skill recommendation template.
/// Replace `{current_role}`, `{career_goal}`, `{department}` before sending.
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"You are a career development expert. Recommend skills for someone to develop.

Current Role: {current_role}
Career Goal: {career_goal}
Department: {department}

Provide 8-10 specific skills they should learn to achieve their career goal.

Return a JSON array of objects:
[
  {"skill": "Python", "reason": "Essential for backend development", "priority": "high", "timeframe": "3 months"}
]"#;

/// Trending skills template. Replace `{department}` before sending.
pub const TRENDING_PROMPT_TEMPLATE: &str = r#"List the top 10 trending skills in {department} right now.

Return a JSON array of objects:
[
  {"skill": "AI/ML", "trend": "rising", "demand_level": "high"}
]

Allowed trend values: rising, stable, emerging.
Allowed demand_level values: high, medium, low."#;
