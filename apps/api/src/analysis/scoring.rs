//! ATS score: a deterministic 0–95 heuristic over extracted skills and raw text.

use std::sync::LazyLock;

use regex::Regex;

pub const MAX_SCORE: u32 = 95;
const BASE_CAP: u32 = 50;
const POINTS_PER_SKILL: u32 = 3;
const WORD_COUNT_THRESHOLD: usize = 200;

const FRONTEND: &[&str] = &["React", "Angular", "Vue", "HTML", "CSS"];
// "Express" is never emitted by the extractor (it knows "Express.js"), so it
// cannot contribute. Kept to match scores already stored for existing users.
const BACKEND: &[&str] = &["Node.js", "Express", "Django", "Spring"];
const DATABASE: &[&str] = &["MongoDB", "SQL", "PostgreSQL"];
const CLOUD: &[&str] = &["AWS", "Azure", "Google Cloud", "Docker"];
const TOOLS: &[&str] = &["Git", "GitHub", "Jira"];

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Category bonuses, checked against the case-preserved extractor output.
const CATEGORY_BONUSES: &[(&[&str], u32)] = &[
    (FRONTEND, 10),
    (BACKEND, 10),
    (DATABASE, 10),
    (CLOUD, 10),
    (TOOLS, 5),
];

/// Computes the ATS score. Zero skills always scores zero.
pub fn calculate_ats_score(skills: &[String], text: &str) -> u32 {
    if skills.is_empty() {
        return 0;
    }

    let mut score = (skills.len() as u32 * POINTS_PER_SKILL).min(BASE_CAP);

    for (category, bonus) in CATEGORY_BONUSES {
        if skills.iter().any(|s| category.contains(&s.as_str())) {
            score += bonus;
        }
    }

    if word_count(text) > WORD_COUNT_THRESHOLD {
        score += 5;
    }

    let lower = text.to_lowercase();
    if lower.contains("project") {
        score += 5;
    }
    if lower.contains("experience") {
        score += 5;
    }

    score.min(MAX_SCORE)
}

/// Number of pieces produced by splitting on whitespace runs. Leading or
/// trailing whitespace yields an empty piece that still counts.
pub fn word_count(text: &str) -> usize {
    WHITESPACE.split(text).count()
}
