use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::experience::ExperienceSummary;
use crate::analysis::skills::missing_keywords;

const MIN_SKILLS: usize = 5;
const MIN_MONTHS: u32 = 12;
const QUANTIFY_BELOW_SCORE: u32 = 70;
const LEARN_NEXT_COUNT: usize = 5;

static MEASURABLE_IMPACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+\s*(?:percent|%|increased|decreased|reduced|improved)")
        .expect("impact pattern is valid")
});

/// Builds the ordered improvement suggestions shown after an upload.
pub fn build_suggestions(
    text: &str,
    skills: &[String],
    experience: &ExperienceSummary,
    ats_score: u32,
) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut suggestions = Vec::new();

    if skills.len() < MIN_SKILLS {
        suggestions.push("Add more technical skills to strengthen your profile".to_string());
    }
    if !experience.has_internship && experience.total_months < MIN_MONTHS {
        suggestions.push("Consider adding internship or project experience".to_string());
    }
    if !lower.contains("project") {
        suggestions.push("Include specific project descriptions with technologies used".to_string());
    }

    let missing = missing_keywords(skills);
    if !missing.is_empty() {
        let next: Vec<&str> = missing.into_iter().take(LEARN_NEXT_COUNT).collect();
        suggestions.push(format!("Consider learning: {}", next.join(", ")));
    }

    if ats_score < QUANTIFY_BELOW_SCORE {
        suggestions.push("Quantify achievements with metrics and numbers".to_string());
    }
    if !MEASURABLE_IMPACT.is_match(&lower) {
        suggestions.push("Add measurable achievements and impact statements".to_string());
    }

    if suggestions.is_empty() {
        suggestions
            .push("Strong resume! Consider tailoring it for specific job applications".to_string());
    }
    suggestions
}
