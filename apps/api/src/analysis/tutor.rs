//! Tutor Responder: routes a free-text question to one of three canned answers.
//! Roadmap and job matches are derived fresh for every question.

use serde_json::Value;

use crate::analysis::jobs::{match_jobs, MatchedJob};
use crate::analysis::roadmap::{count_with_status, generate_roadmap, RoadmapStep, StepStatus};

const ROADMAP_WORDS: &[&str] = &["roadmap", "next", "learn"];
const JOB_WORDS: &[&str] = &["job", "apply"];
const NEXT_FOCUS_COUNT: usize = 2;
const TOP_JOBS_COUNT: usize = 3;
const GAP_COUNT: usize = 8;
const DETECTED_SKILLS_COUNT: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorIntent {
    Roadmap,
    Jobs,
    Overview,
}

/// Returns the trimmed question if `message` is a non-blank string.
pub fn question_from(message: &Value) -> Option<&str> {
    message.as_str().map(str::trim).filter(|q| !q.is_empty())
}

/// First matching rule wins: roadmap words, then job words, then overview.
pub fn classify(question: &str) -> TutorIntent {
    let q = question.to_lowercase();
    if ROADMAP_WORDS.iter().any(|w| q.contains(w)) {
        TutorIntent::Roadmap
    } else if JOB_WORDS.iter().any(|w| q.contains(w)) {
        TutorIntent::Jobs
    } else {
        TutorIntent::Overview
    }
}

pub fn answer(question: &str, skills: &[String], ats_score: u32) -> String {
    match classify(question) {
        TutorIntent::Roadmap => roadmap_answer(&generate_roadmap(skills, ats_score)),
        TutorIntent::Jobs => {
            let report = match_jobs(skills, ats_score);
            jobs_answer(&report.matched_jobs, &report.missing_skills, ats_score)
        }
        TutorIntent::Overview => overview_answer(skills, ats_score),
    }
}

fn roadmap_answer(roadmap: &[RoadmapStep]) -> String {
    let status_line = format!(
        "Roadmap status: {} completed, {} in progress, {} locked.",
        count_with_status(roadmap, StepStatus::Completed),
        count_with_status(roadmap, StepStatus::Current),
        count_with_status(roadmap, StepStatus::Locked),
    );

    let next: Vec<String> = roadmap
        .iter()
        .filter(|s| s.status == StepStatus::Current)
        .take(NEXT_FOCUS_COUNT)
        .enumerate()
        .map(|(i, s)| format!("{}. {} ({})", i + 1, s.title, s.estimated_time))
        .collect();

    let focus = if next.is_empty() {
        "Next focus: Keep going—your roadmap is already optimized.".to_string()
    } else {
        format!("Next focus:\n{}", next.join("\n"))
    };

    [status_line, focus].join("\n\n")
}

fn jobs_answer(jobs: &[MatchedJob], missing_skills: &[String], ats_score: u32) -> String {
    let summary = format!(
        "Based on your resume (ATS {ats_score}%) I found {} matching roles.",
        jobs.len()
    );

    let mut ranked: Vec<&MatchedJob> = jobs.iter().collect();
    // stable: ties keep catalog order
    ranked.sort_by(|a, b| b.skill_match_percentage.cmp(&a.skill_match_percentage));

    let top = if ranked.is_empty() {
        "No strong matches yet—add more projects/skills and re-upload.".to_string()
    } else {
        ranked
            .iter()
            .take(TOP_JOBS_COUNT)
            .enumerate()
            .map(|(i, j)| {
                format!(
                    "{}. {} at {} ({}% match)\n   Apply: {}",
                    i + 1,
                    j.title,
                    j.company,
                    j.skill_match_percentage,
                    j.apply_link
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let gaps = if missing_skills.is_empty() {
        "Your coverage is strong—tailor your resume to each job description.".to_string()
    } else {
        let focus: Vec<&str> = missing_skills
            .iter()
            .take(GAP_COUNT)
            .map(String::as_str)
            .collect();
        format!("Skill gaps to focus: {}.", focus.join(", "))
    };

    [summary, top, gaps].join("\n\n")
}

fn overview_answer(skills: &[String], ats_score: u32) -> String {
    let detected = if skills.is_empty() {
        "(none detected)".to_string()
    } else {
        skills
            .iter()
            .take(DETECTED_SKILLS_COUNT)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    [
        format!("Your ATS score is {ats_score}%."),
        format!("Detected skills: {detected}"),
        "Ask: 'What should I learn next?' or 'Which jobs should I apply for first?'".to_string(),
    ]
    .join("\n\n")
}
