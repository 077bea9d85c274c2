//! Fallback content catalogs.
//!
//! Static defaults served when an AI-backed operation degrades: a generic
//! learning plan, wellness tips per category, skill lists, and the role/goal
//! options offered to the learning-path UI. This is configuration data, not
//! behavior — swapping any list leaves the core contracts untouched.

use serde::Serialize;

use crate::insights::posting::StructuredPosting;
use crate::insights::skills::{SkillRecommendation, TrendingSkill};
use crate::insights::wellness::WellnessTip;
use crate::models::learning::{LearningPlan, PlanModule};

pub const WELLNESS_CATEGORIES: &[&str] = &["general", "mental", "physical", "nutrition", "sleep"];

/// Generic five-module plan used when path generation cannot produce a
/// tailored one. Guarantees `generate_path` never persists an empty module
/// sequence.
pub fn default_learning_plan(current_role: &str, career_goal: &str) -> LearningPlan {
    LearningPlan {
        title: format!("Path from {current_role} to {career_goal}"),
        total_duration_weeks: 24,
        modules: vec![
            module(
                "1. Foundations",
                "Build core skills and understand fundamental concepts needed for your career transition.",
                4,
                &["Basics", "Core concepts", "Best practices", "Industry standards"],
                &["Basic understanding of current role"],
                &["Online courses", "Books", "Tutorials", "Practice exercises"],
            ),
            module(
                "2. Advanced Skills",
                "Develop advanced technical and professional skills required for the target role.",
                6,
                &["Advanced techniques", "Problem solving", "System design", "Best practices"],
                &["Completion of Foundations module"],
                &["Advanced courses", "Real-world projects", "Mentorship"],
            ),
            module(
                "3. Practical Experience",
                "Apply learned skills through hands-on projects and real-world scenarios.",
                8,
                &["Project work", "Case studies", "Portfolio building", "Collaboration"],
                &["Completion of Advanced Skills"],
                &["Project templates", "Team collaboration tools", "Portfolio platforms"],
            ),
            module(
                "4. Leadership & Soft Skills",
                "Develop leadership, communication, and interpersonal skills essential for the role.",
                4,
                &["Communication", "Team leadership", "Conflict resolution", "Presentation skills"],
                &["Professional experience"],
                &["Leadership courses", "Communication workshops", "Coaching sessions"],
            ),
            module(
                "5. Career Transition",
                "Prepare for the transition with resume building, interview prep, and networking.",
                2,
                &["Resume optimization", "Interview preparation", "Networking", "Job search strategies"],
                &["Completion of all previous modules"],
                &["Career coaches", "Resume templates", "Interview guides"],
            ),
        ],
    }
}

fn module(
    name: &str,
    description: &str,
    duration_weeks: u32,
    key_topics: &[&str],
    prerequisites: &[&str],
    resources: &[&str],
) -> PlanModule {
    PlanModule {
        module_name: name.to_string(),
        description: description.to_string(),
        duration_weeks,
        key_topics: key_topics.iter().map(|s| s.to_string()).collect(),
        prerequisites: prerequisites.iter().map(|s| s.to_string()).collect(),
        resources: resources.iter().map(|s| s.to_string()).collect(),
        completed: false,
    }
}

/// Tips for a category; unknown categories map to `general`.
pub fn wellness_tips(category: &str) -> Vec<WellnessTip> {
    let tips: &[(&str, &str)] = match category {
        "mental" => &[
            ("Practice mindfulness meditation for 10 minutes daily to reduce stress", "medium"),
            ("Use the 4-7-8 breathing technique when feeling anxious", "easy"),
            ("Set clear boundaries between work and personal time to prevent burnout", "medium"),
            ("Keep a gratitude journal and write down 3 things you're thankful for each day", "easy"),
        ],
        "physical" => &[
            ("Stand up and stretch every 30 minutes to improve circulation", "easy"),
            ("Exercise for at least 30 minutes, 5 days a week", "medium"),
            ("Adjust your workspace ergonomics: monitor at eye level, feet flat on floor", "easy"),
            ("Take the stairs instead of the elevator whenever possible", "easy"),
        ],
        "nutrition" => &[
            ("Eat a balanced breakfast with protein, whole grains, and fruit", "medium"),
            ("Pack healthy lunches to avoid relying on fast food", "medium"),
            ("Limit caffeine intake to before 2 PM to avoid sleep disruption", "easy"),
            ("Keep healthy snacks visible: nuts, fruit, yogurt", "easy"),
        ],
        "sleep" => &[
            ("Go to bed and wake up at the same time daily", "medium"),
            ("Dim lights and avoid screens 30 minutes before bed", "medium"),
            ("Keep your bedroom cool and dark for optimal sleep quality", "easy"),
            ("Avoid heavy meals, alcohol, and exercise close to bedtime", "medium"),
        ],
        _ => &[
            ("Take regular breaks every hour to stretch and move around", "easy"),
            ("Stay hydrated by drinking at least 8 glasses of water daily", "easy"),
            ("Maintain a consistent sleep schedule, even on weekends", "medium"),
            ("Every 20 minutes, look at something 20 feet away for 20 seconds", "easy"),
        ],
    };

    let resolved = if WELLNESS_CATEGORIES.contains(&category) {
        category
    } else {
        "general"
    };

    tips.iter()
        .map(|(tip, difficulty)| WellnessTip {
            tip: tip.to_string(),
            category: resolved.to_string(),
            difficulty: difficulty.to_string(),
        })
        .collect()
}

pub fn default_skills() -> Vec<SkillRecommendation> {
    vec![
        SkillRecommendation {
            skill: "Leadership".to_string(),
            reason: "Essential for career growth".to_string(),
            priority: "high".to_string(),
            timeframe: "6 months".to_string(),
        },
        SkillRecommendation {
            skill: "Communication".to_string(),
            reason: "Important for all roles".to_string(),
            priority: "high".to_string(),
            timeframe: "3 months".to_string(),
        },
    ]
}

pub fn default_trending() -> Vec<TrendingSkill> {
    vec![
        TrendingSkill {
            skill: "Artificial Intelligence".to_string(),
            trend: "rising".to_string(),
            demand_level: "high".to_string(),
        },
        TrendingSkill {
            skill: "Cloud Computing".to_string(),
            trend: "stable".to_string(),
            demand_level: "high".to_string(),
        },
    ]
}

/// Posting fallback keeps the raw input in `structured_text` so the caller
/// never loses the original content.
pub fn fallback_posting(raw_posting: &str) -> StructuredPosting {
    StructuredPosting {
        structured_text: raw_posting.to_string(),
        ..StructuredPosting::default()
    }
}

/// Role and goal options offered by the learning-path UI.
#[derive(Debug, Clone, Serialize)]
pub struct RoleOptions {
    pub roles: Vec<&'static str>,
    pub goals: Vec<&'static str>,
}

pub fn roles_and_goals() -> RoleOptions {
    RoleOptions {
        roles: vec![
            "software-engineer",
            "data-analyst",
            "product-manager",
            "designer",
            "marketing-specialist",
            "hr-specialist",
            "business-analyst",
            "project-manager",
            "devops-engineer",
        ],
        goals: vec![
            "senior-software-engineer",
            "tech-lead",
            "engineering-manager",
            "data-scientist",
            "senior-analyst",
            "product-lead",
            "design-lead",
            "marketing-manager",
            "hr-manager",
            "program-manager",
            "devops-architect",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_is_never_empty_and_starts_uncompleted() {
        let plan = default_learning_plan("data-analyst", "data-scientist");
        assert_eq!(plan.modules.len(), 5);
        assert!(plan.modules.iter().all(|m| !m.completed));
        assert!(plan.title.contains("data-analyst"));
        assert!(plan.title.contains("data-scientist"));
    }

    #[test]
    fn test_every_category_has_tips() {
        for category in WELLNESS_CATEGORIES {
            let tips = wellness_tips(category);
            assert!(!tips.is_empty(), "no tips for {category}");
            assert!(tips.iter().all(|t| t.category == *category));
        }
    }

    #[test]
    fn test_unknown_category_maps_to_general() {
        let tips = wellness_tips("astrology");
        assert!(tips.iter().all(|t| t.category == "general"));
    }

    #[test]
    fn test_skill_defaults_are_nonempty() {
        assert!(!default_skills().is_empty());
        assert!(!default_trending().is_empty());
    }
}
