// Resume analysis core: pure, deterministic functions over resume text and the
// fixed catalogs. No I/O here; handlers in `resume` own persistence.

pub mod experience;
pub mod gaps;
pub mod jobs;
pub mod roadmap;
pub mod scoring;
pub mod skills;
pub mod suggestions;
pub mod tutor;

use crate::analysis::experience::{parse_experience, ExperienceSummary};
use crate::analysis::jobs::estimated_jobs_matched;
use crate::analysis::roadmap::{generate_roadmap, progress_percent};
use crate::analysis::scoring::calculate_ats_score;
use crate::analysis::skills::extract_skills;
use crate::analysis::suggestions::build_suggestions;

/// Everything derived from one uploaded resume.
#[derive(Debug, Clone)]
pub struct ResumeAnalysis {
    pub skills: Vec<String>,
    pub ats_score: u32,
    pub experience: ExperienceSummary,
    pub suggestions: Vec<String>,
    pub roadmap_progress: u32,
    pub jobs_matched: u32,
}

/// Runs extraction → scoring → experience → suggestions over extracted text.
pub fn analyze_resume(text: &str) -> ResumeAnalysis {
    let skills = extract_skills(text);
    let ats_score = calculate_ats_score(&skills, text);
    let experience = parse_experience(text);
    let suggestions = build_suggestions(text, &skills, &experience, ats_score);
    let roadmap_progress = progress_percent(&generate_roadmap(&skills, ats_score));
    let jobs_matched = estimated_jobs_matched(ats_score, skills.len());

    ResumeAnalysis {
        skills,
        ats_score,
        experience,
        suggestions,
        roadmap_progress,
        jobs_matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_STACK_RESUME: &str = "\
        Jane Doe, Software Engineer. Experience: 4 years of experience building web \
        platforms with React, Node.js, MongoDB and AWS, using Git for every project. \
        Also shipped TypeScript services, Docker images, Kubernetes manifests, \
        PostgreSQL schemas and Redis caches, improved p99 latency by 35%.";

    fn padded(text: &str) -> String {
        format!("{text} {}", vec!["filler"; 220].join(" "))
    }

    #[test]
    fn test_full_stack_resume_hits_the_cap() {
        let text = padded(FULL_STACK_RESUME);
        let analysis = analyze_resume(&text);

        for skill in ["React", "Node.js", "MongoDB", "AWS", "Git"] {
            assert!(analysis.skills.contains(&skill.to_string()), "missing {skill}");
        }
        assert_eq!(analysis.ats_score, 95);
        assert_eq!(analysis.experience.label, "4 years");
    }

    #[test]
    fn test_identical_text_gives_identical_analysis() {
        let text = padded(FULL_STACK_RESUME);
        let a = analyze_resume(&text);
        let b = analyze_resume(&text);
        assert_eq!(a.skills, b.skills);
        assert_eq!(a.ats_score, b.ats_score);
        assert_eq!(a.suggestions, b.suggestions);
        assert_eq!(a.roadmap_progress, b.roadmap_progress);
    }

    #[test]
    fn test_blank_resume() {
        let analysis = analyze_resume("");
        assert!(analysis.skills.is_empty());
        assert_eq!(analysis.ats_score, 0);
        assert_eq!(analysis.experience.label, "Not specified");
        assert_eq!(analysis.roadmap_progress, 0);
        assert_eq!(analysis.jobs_matched, 0);
        assert!(!analysis.suggestions.is_empty());
    }

    #[test]
    fn test_jobs_matched_uses_score_and_skill_count() {
        let text = padded(FULL_STACK_RESUME);
        let analysis = analyze_resume(&text);
        let expected = analysis.ats_score as usize * analysis.skills.len() * 2 / 100;
        assert_eq!(analysis.jobs_matched as usize, expected);
    }
}
