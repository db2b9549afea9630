//! Job Matcher: filters the fixed posting catalog by ATS threshold and skill
//! overlap, and reports which required skills the user still lacks.

use std::collections::HashSet;

use serde::Serialize;

use crate::analysis::skills::lowercase_all;

const MIN_MATCH_PERCENT: f64 = 50.0;

#[derive(Debug)]
pub struct JobPosting {
    pub id: &'static str,
    pub title: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub required_skills: &'static [&'static str],
    pub min_ats_score: u32,
    pub apply_link: &'static str,
    pub description: &'static str,
}

pub static JOB_POSTINGS: [JobPosting; 6] = [
    JobPosting {
        id: "frontend-dev-google",
        title: "Frontend Developer",
        company: "Google",
        location: "Remote",
        required_skills: &["react", "javascript", "html", "css", "redux", "typescript", "webpack", "git"],
        min_ats_score: 70,
        apply_link: "https://www.google.com/about/careers/applications/jobs/results/?q=Frontend%20Developer",
        description: "Develop and maintain user-facing features using modern frontend technologies.",
    },
    JobPosting {
        id: "backend-eng-amazon",
        title: "Backend Engineer",
        company: "Amazon",
        location: "Bangalore",
        required_skills: &["java", "spring", "microservices", "aws", "sql", "docker", "kubernetes", "git"],
        min_ats_score: 75,
        apply_link: "https://www.amazon.jobs/en/search?base_query=Backend%20Engineer",
        description: "Design, build, and maintain scalable backend services and APIs.",
    },
    JobPosting {
        id: "ai-engineer-microsoft",
        title: "AI Engineer",
        company: "Microsoft",
        location: "Hyderabad",
        required_skills: &[
            "python",
            "machine learning",
            "deep learning",
            "tensorflow",
            "pytorch",
            "azure",
            "nlp",
            "git",
        ],
        min_ats_score: 80,
        apply_link: "https://jobs.careers.microsoft.com/global/en/search?q=AI%20Engineer",
        description: "Build and deploy machine learning models and AI-powered applications.",
    },
    JobPosting {
        id: "fullstack-meta",
        title: "Full Stack Developer",
        company: "Meta",
        location: "Menlo Park",
        required_skills: &["react", "node.js", "javascript", "python", "sql", "graphql", "git"],
        min_ats_score: 75,
        apply_link: "https://www.metacareers.com/jobs/?q=Full%20Stack%20Developer",
        description: "Build end-to-end applications across frontend, backend, and infrastructure.",
    },
    JobPosting {
        id: "devops-netflix",
        title: "DevOps Engineer",
        company: "Netflix",
        location: "Los Gatos",
        required_skills: &[
            "aws",
            "docker",
            "kubernetes",
            "terraform",
            "jenkins",
            "ci/cd",
            "linux",
            "python",
            "git",
        ],
        min_ats_score: 75,
        apply_link: "https://jobs.netflix.com/search?q=DevOps%20Engineer",
        description: "Maintain and improve deployment infrastructure for streaming services.",
    },
    JobPosting {
        id: "data-scientist-spark",
        title: "Data Scientist",
        company: "Apache Spark",
        location: "San Francisco",
        required_skills: &[
            "python",
            "pandas",
            "numpy",
            "machine learning",
            "deep learning",
            "sql",
            "spark",
        ],
        min_ats_score: 80,
        apply_link: "https://www.linkedin.com/jobs/search/?keywords=Data%20Scientist%20Spark",
        description: "Analyze large datasets and build predictive models using Apache Spark.",
    },
];

/// A posting the user qualifies for.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedJob {
    pub id: &'static str,
    pub title: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub required_skills: &'static [&'static str],
    pub min_ats_score: u32,
    pub apply_link: &'static str,
    pub description: &'static str,
    pub skill_match_percentage: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatchReport {
    pub matched_jobs: Vec<MatchedJob>,
    /// Required-but-absent skills across matched postings, lowercase, first-seen order.
    pub missing_skills: Vec<String>,
}

pub fn match_jobs(skills: &[String], ats_score: u32) -> JobMatchReport {
    match_against(&JOB_POSTINGS, skills, ats_score)
}

fn match_against(postings: &[JobPosting], skills: &[String], ats_score: u32) -> JobMatchReport {
    let skills_lower = lowercase_all(skills);
    let has = |skill: &str| skills_lower.iter().any(|s| *s == skill.to_lowercase());

    let mut matched_jobs = Vec::new();
    let mut missing_skills = Vec::new();
    let mut seen = HashSet::new();

    for job in postings {
        if ats_score < job.min_ats_score || job.required_skills.is_empty() {
            continue;
        }

        let overlap = job.required_skills.iter().filter(|s| has(s)).count();
        let percent = overlap as f64 / job.required_skills.len() as f64 * 100.0;
        if percent < MIN_MATCH_PERCENT {
            continue;
        }

        for skill in job.required_skills.iter().filter(|s| !has(s)) {
            let lower = skill.to_lowercase();
            if seen.insert(lower.clone()) {
                missing_skills.push(lower);
            }
        }

        matched_jobs.push(MatchedJob {
            id: job.id,
            title: job.title,
            company: job.company,
            location: job.location,
            required_skills: job.required_skills,
            min_ats_score: job.min_ats_score,
            apply_link: job.apply_link,
            description: job.description,
            skill_match_percentage: percent.round() as u32,
        });
    }

    JobMatchReport {
        matched_jobs,
        missing_skills,
    }
}

/// Jobs-matched figure stored with each upload: floor(score% × skills × 2).
pub fn estimated_jobs_matched(ats_score: u32, skill_count: usize) -> u32 {
    (ats_score as usize * skill_count * 2 / 100) as u32
}
