//! Roadmap Generator: a fixed 13-step curriculum whose per-step status is
//! derived from the user's skills and ATS score on every request.
//! Each step carries its own [`StatusRule`].

use serde::Serialize;

use crate::analysis::skills::{has_all_skills, has_any_skill, lowercase_all};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Current,
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// How a step's status is decided.
#[derive(Debug, Clone, Copy)]
pub enum StatusRule {
    /// Completed with any of `done`; otherwise current. Never locked.
    Open { done: &'static [&'static str] },
    /// Completed with any of `done`; current with any of `ready`; else locked.
    Gated {
        done: &'static [&'static str],
        ready: &'static [&'static str],
    },
    /// Completed with any of `done`; current when the user has all of
    /// `ready_all` and a score strictly above `score_above`; else locked.
    GatedByStackAndScore {
        done: &'static [&'static str],
        ready_all: &'static [&'static str],
        score_above: u32,
    },
    /// Completed with all of `core` plus any of `extra`; current with any of
    /// `core`; else locked.
    Composite {
        core: &'static [&'static str],
        extra: &'static [&'static str],
    },
    /// Current when the score is strictly above `score_above`; else locked.
    /// These steps are never marked completed.
    ScoreOnly { score_above: u32 },
}

impl StatusRule {
    pub fn evaluate(&self, skills_lower: &[String], ats_score: u32) -> StepStatus {
        let any = |set: &[&str]| has_any_skill(skills_lower, set);
        let all = |set: &[&str]| has_all_skills(skills_lower, set);

        match *self {
            StatusRule::Open { done } => {
                if any(done) {
                    StepStatus::Completed
                } else {
                    StepStatus::Current
                }
            }
            StatusRule::Gated { done, ready } => {
                if any(done) {
                    StepStatus::Completed
                } else if any(ready) {
                    StepStatus::Current
                } else {
                    StepStatus::Locked
                }
            }
            StatusRule::GatedByStackAndScore {
                done,
                ready_all,
                score_above,
            } => {
                if any(done) {
                    StepStatus::Completed
                } else if all(ready_all) && ats_score > score_above {
                    StepStatus::Current
                } else {
                    StepStatus::Locked
                }
            }
            StatusRule::Composite { core, extra } => {
                if all(core) && any(extra) {
                    StepStatus::Completed
                } else if any(core) {
                    StepStatus::Current
                } else {
                    StepStatus::Locked
                }
            }
            StatusRule::ScoreOnly { score_above } => {
                if ats_score > score_above {
                    StepStatus::Current
                } else {
                    StepStatus::Locked
                }
            }
        }
    }
}

/// Where a step's resource list comes from.
#[derive(Debug, Clone, Copy)]
pub enum ResourceRule {
    Static(&'static [&'static str]),
    /// Picked per user from the skill areas they already cover.
    Specialization,
}

impl ResourceRule {
    fn resolve(&self, skills_lower: &[String]) -> Vec<String> {
        match self {
            ResourceRule::Static(list) => list.iter().map(|s| s.to_string()).collect(),
            ResourceRule::Specialization => specialization_resources(skills_lower),
        }
    }
}

#[derive(Debug)]
pub struct StepDefinition {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub estimated_time: &'static str,
    pub difficulty: Difficulty,
    pub required_skills: &'static [&'static str],
    pub status: StatusRule,
    pub resources: ResourceRule,
}

/// A step annotated for one user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStep {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub estimated_time: &'static str,
    pub difficulty: Difficulty,
    pub required_skills: Vec<&'static str>,
    pub status: StepStatus,
    pub resources: Vec<String>,
}

pub static ROADMAP_STEPS: [StepDefinition; 13] = [
    StepDefinition {
        id: 1,
        title: "Programming Fundamentals",
        description: "Master basic programming concepts, variables, loops, and functions",
        estimated_time: "2-4 weeks",
        difficulty: Difficulty::Beginner,
        required_skills: &[],
        status: StatusRule::Open {
            done: &["python", "java", "c++", "javascript", "typescript", "go", "rust"],
        },
        resources: ResourceRule::Static(&["Codecademy", "FreeCodeCamp", "CS50", "The Odin Project"]),
    },
    StepDefinition {
        id: 2,
        title: "Data Structures & Algorithms",
        description: "Learn arrays, linked lists, trees, graphs, and algorithmic thinking",
        estimated_time: "6-8 weeks",
        difficulty: Difficulty::Intermediate,
        required_skills: &["python", "java", "c++", "javascript", "dsa", "algorithms"],
        status: StatusRule::Gated {
            done: &["dsa", "algorithms", "data structures"],
            ready: &["python", "java", "c++", "javascript"],
        },
        resources: ResourceRule::Static(&["LeetCode", "HackerRank", "GeeksforGeeks", "AlgoExpert"]),
    },
    StepDefinition {
        id: 3,
        title: "Web Development Basics",
        description: "HTML, CSS, JavaScript fundamentals and responsive design",
        estimated_time: "4-6 weeks",
        difficulty: Difficulty::Beginner,
        required_skills: &[],
        status: StatusRule::Open {
            done: &["html", "css", "javascript", "react", "angular", "vue"],
        },
        resources: ResourceRule::Static(&[
            "MDN Web Docs",
            "CSS Tricks",
            "JavaScript.info",
            "Frontend Masters",
        ]),
    },
    StepDefinition {
        id: 4,
        title: "Frontend Framework Mastery",
        description: "Deep dive into React, Vue, or Angular with state management",
        estimated_time: "6-8 weeks",
        difficulty: Difficulty::Intermediate,
        required_skills: &["react", "angular", "vue", "next.js", "svelte"],
        status: StatusRule::Gated {
            done: &["react", "angular", "vue", "next.js"],
            ready: &["html", "css", "javascript"],
        },
        resources: ResourceRule::Static(&[
            "React Documentation",
            "Vue Mastery",
            "Angular University",
            "Next.js Docs",
        ]),
    },
    StepDefinition {
        id: 5,
        title: "Backend Development",
        description: "Server-side programming with Node.js, Express, databases, and APIs",
        estimated_time: "6-8 weeks",
        difficulty: Difficulty::Intermediate,
        required_skills: &["node.js", "express.js", "django", "flask", "spring", "ruby on rails"],
        status: StatusRule::Gated {
            done: &["node.js", "express.js", "django", "flask", "spring"],
            ready: &["node.js", "python", "java", "javascript"],
        },
        resources: ResourceRule::Static(&[
            "Node.js Docs",
            "Express.js Guide",
            "MongoDB University",
            "API Design",
        ]),
    },
    StepDefinition {
        id: 6,
        title: "Database Management",
        description: "SQL and NoSQL databases, query optimization, and data modeling",
        estimated_time: "4-6 weeks",
        difficulty: Difficulty::Intermediate,
        required_skills: &["mongodb", "sql", "postgresql", "mysql", "redis", "cassandra"],
        status: StatusRule::Gated {
            done: &["mongodb", "sql", "postgresql", "mysql"],
            ready: &["node.js", "python", "java"],
        },
        resources: ResourceRule::Static(&[
            "SQLBolt",
            "MongoDB Docs",
            "PostgreSQL Tutorial",
            "Database Design",
        ]),
    },
    StepDefinition {
        id: 7,
        title: "Cloud & DevOps Fundamentals",
        description: "Learn AWS, Docker, Kubernetes, and deployment strategies",
        estimated_time: "6-8 weeks",
        difficulty: Difficulty::Intermediate,
        required_skills: &["aws", "azure", "google cloud", "docker", "kubernetes", "terraform"],
        status: StatusRule::Gated {
            done: &["aws", "azure", "docker", "kubernetes"],
            ready: &["aws", "azure", "google cloud"],
        },
        resources: ResourceRule::Static(&[
            "AWS Free Tier",
            "Docker Hub",
            "Kubernetes Docs",
            "DevOps Roadmap",
        ]),
    },
    StepDefinition {
        id: 8,
        title: "Version Control & Collaboration",
        description: "Git workflows, GitHub, and team collaboration best practices",
        estimated_time: "2-3 weeks",
        difficulty: Difficulty::Beginner,
        required_skills: &["git", "github", "gitlab", "bitbucket"],
        status: StatusRule::Open {
            done: &["git", "github", "gitlab"],
        },
        resources: ResourceRule::Static(&[
            "Git Tutorial",
            "GitHub Skills",
            "Atlassian Git",
            "Git Flow",
        ]),
    },
    StepDefinition {
        id: 9,
        title: "Machine Learning & AI",
        description: "Introduction to ML concepts, algorithms, and neural networks",
        estimated_time: "8-12 weeks",
        difficulty: Difficulty::Advanced,
        required_skills: &[
            "python",
            "machine learning",
            "deep learning",
            "tensorflow",
            "pytorch",
            "pandas",
        ],
        status: StatusRule::Gated {
            done: &["machine learning", "deep learning", "tensorflow", "pytorch"],
            ready: &["python", "data science", "artificial intelligence"],
        },
        resources: ResourceRule::Static(&[
            "Coursera ML",
            "Fast.ai",
            "TensorFlow Tutorials",
            "PyTorch Docs",
        ]),
    },
    StepDefinition {
        id: 10,
        title: "System Design & Architecture",
        description: "Design scalable systems, microservices, and distributed applications",
        estimated_time: "8-10 weeks",
        difficulty: Difficulty::Advanced,
        required_skills: &[
            "node.js",
            "python",
            "java",
            "sql",
            "mongodb",
            "system design",
            "microservices",
        ],
        status: StatusRule::GatedByStackAndScore {
            done: &["system design", "microservices", "architecture"],
            ready_all: &["node.js", "python", "sql", "mongodb"],
            score_above: 70,
        },
        resources: ResourceRule::Static(&[
            "System Design Primer",
            "Designing Data-Intensive Apps",
            "Grokking System Design",
            "Alex Xu Blog",
        ]),
    },
    StepDefinition {
        id: 11,
        title: "Full-Stack Integration",
        description: "Build complete applications with frontend, backend, and deployment",
        estimated_time: "8-10 weeks",
        difficulty: Difficulty::Advanced,
        required_skills: &["react", "node.js", "mongodb", "aws", "docker"],
        status: StatusRule::Composite {
            core: &["react", "node.js", "mongodb"],
            extra: &["aws", "docker"],
        },
        resources: ResourceRule::Static(&[
            "Full Stack Open",
            "MERN Stack Tutorial",
            "Deployment Guides",
            "Cloud Architecture",
        ]),
    },
    StepDefinition {
        id: 12,
        title: "Interview Preparation",
        description: "Technical interviews, behavioral questions, and problem-solving strategies",
        estimated_time: "4-6 weeks",
        difficulty: Difficulty::Intermediate,
        required_skills: &["dsa", "algorithms", "system design"],
        status: StatusRule::ScoreOnly { score_above: 75 },
        resources: ResourceRule::Static(&[
            "Interview Cake",
            "Pramp",
            "LeetCode Interview Prep",
            "Glassdoor Interview Questions",
        ]),
    },
    StepDefinition {
        id: 13,
        title: "Specialization Tracks",
        description: "Deep dive into your chosen domain: Cloud, ML, or Web Development",
        estimated_time: "10-12 weeks",
        difficulty: Difficulty::Advanced,
        required_skills: &[],
        status: StatusRule::ScoreOnly { score_above: 80 },
        resources: ResourceRule::Specialization,
    },
];

/// Skill areas feeding the specialization step, in display order.
const SPECIALIZATIONS: &[(&[&str], &[&str])] = &[
    (
        &["aws", "azure", "google cloud"],
        &["AWS Solutions Architect", "Azure Developer", "Google Cloud Professional"],
    ),
    (
        &["machine learning", "deep learning", "tensorflow"],
        &["ML Specialization", "Deep Learning Course", "AI Engineer Path"],
    ),
    (
        &["react", "angular", "vue", "next.js"],
        &["Frontend Masters", "React Advanced Patterns", "UI/UX Design"],
    ),
    (
        &["node.js", "express", "django", "spring"],
        &["Backend Architecture", "API Design", "Microservices Course"],
    ),
];

const GENERAL_TRACKS: &[&str] = &[
    "Career Development",
    "Industry Certifications",
    "Open Source Contributions",
];

fn specialization_resources(skills_lower: &[String]) -> Vec<String> {
    let resources: Vec<String> = SPECIALIZATIONS
        .iter()
        .filter(|(area, _)| has_any_skill(skills_lower, area))
        .flat_map(|(_, tracks)| tracks.iter().map(|t| t.to_string()))
        .collect();

    if resources.is_empty() {
        GENERAL_TRACKS.iter().map(|t| t.to_string()).collect()
    } else {
        resources
    }
}

/// Annotates all 13 steps for the given skills and score.
pub fn generate_roadmap(skills: &[String], ats_score: u32) -> Vec<RoadmapStep> {
    let skills_lower = lowercase_all(skills);

    ROADMAP_STEPS
        .iter()
        .map(|step| RoadmapStep {
            id: step.id,
            title: step.title,
            description: step.description,
            estimated_time: step.estimated_time,
            difficulty: step.difficulty,
            required_skills: step.required_skills.to_vec(),
            status: step.status.evaluate(&skills_lower, ats_score),
            resources: step.resources.resolve(&skills_lower),
        })
        .collect()
}

pub fn count_with_status(roadmap: &[RoadmapStep], status: StepStatus) -> usize {
    roadmap.iter().filter(|s| s.status == status).count()
}

/// Share of completed steps, rounded to a whole percentage.
pub fn progress_percent(roadmap: &[RoadmapStep]) -> u32 {
    if roadmap.is_empty() {
        return 0;
    }
    let completed = count_with_status(roadmap, StepStatus::Completed) as f64;
    (completed / roadmap.len() as f64 * 100.0).round().min(100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn status_of(roadmap: &[RoadmapStep], id: u32) -> StepStatus {
        roadmap.iter().find(|s| s.id == id).unwrap().status
    }

    #[test]
    fn test_always_thirteen_steps_in_order() {
        let roadmap = generate_roadmap(&[], 0);
        let ids: Vec<u32> = roadmap.iter().map(|s| s.id).collect();
        assert_eq!(ids, (1..=13).collect::<Vec<_>>());
    }

    #[test]
    fn test_step_one_completed_with_a_language() {
        for lang in ["Python", "Java", "C++", "JavaScript", "TypeScript", "Go", "Rust"] {
            let roadmap = generate_roadmap(&skills(&[lang]), 0);
            assert_eq!(status_of(&roadmap, 1), StepStatus::Completed, "{lang}");
        }
    }

    #[test]
    fn test_step_one_is_never_locked() {
        let roadmap = generate_roadmap(&skills(&["Docker"]), 0);
        assert_eq!(status_of(&roadmap, 1), StepStatus::Current);
        let roadmap = generate_roadmap(&[], 95);
        assert_eq!(status_of(&roadmap, 1), StepStatus::Current);
    }

    #[test]
    fn test_empty_profile() {
        let roadmap = generate_roadmap(&[], 0);
        assert_eq!(count_with_status(&roadmap, StepStatus::Completed), 0);
        // Steps 1, 3 and 8 are open; everything else is gated.
        assert_eq!(count_with_status(&roadmap, StepStatus::Current), 3);
        assert_eq!(count_with_status(&roadmap, StepStatus::Locked), 10);
        assert_eq!(progress_percent(&roadmap), 0);
    }

    #[test]
    fn test_gated_step_moves_through_states() {
        let locked = generate_roadmap(&[], 0);
        assert_eq!(status_of(&locked, 2), StepStatus::Locked);

        let current = generate_roadmap(&skills(&["Python"]), 0);
        assert_eq!(status_of(&current, 2), StepStatus::Current);

        let completed = generate_roadmap(&skills(&["Algorithms"]), 0);
        assert_eq!(status_of(&completed, 2), StepStatus::Completed);
    }

    #[test]
    fn test_system_design_needs_full_stack_and_score_above_70() {
        let stack = skills(&["Node.js", "Python", "SQL", "MongoDB"]);
        assert_eq!(status_of(&generate_roadmap(&stack, 70), 10), StepStatus::Locked);
        assert_eq!(status_of(&generate_roadmap(&stack, 71), 10), StepStatus::Current);

        let partial = skills(&["Node.js", "Python", "SQL"]);
        assert_eq!(status_of(&generate_roadmap(&partial, 95), 10), StepStatus::Locked);

        let done = skills(&["Microservices"]);
        assert_eq!(status_of(&generate_roadmap(&done, 0), 10), StepStatus::Completed);
    }

    #[test]
    fn test_full_stack_integration_requires_deploy_target() {
        let mern = skills(&["React", "Node.js", "MongoDB"]);
        assert_eq!(status_of(&generate_roadmap(&mern, 0), 11), StepStatus::Current);

        let deployed = skills(&["React", "Node.js", "MongoDB", "Docker"]);
        assert_eq!(status_of(&generate_roadmap(&deployed, 0), 11), StepStatus::Completed);
    }

    #[test]
    fn test_score_only_steps() {
        let roadmap = generate_roadmap(&[], 75);
        assert_eq!(status_of(&roadmap, 12), StepStatus::Locked);
        let roadmap = generate_roadmap(&[], 76);
        assert_eq!(status_of(&roadmap, 12), StepStatus::Current);
        assert_eq!(status_of(&roadmap, 13), StepStatus::Locked);
        let roadmap = generate_roadmap(&[], 81);
        assert_eq!(status_of(&roadmap, 13), StepStatus::Current);
    }

    #[test]
    fn test_specialization_resources_follow_skill_areas() {
        let roadmap = generate_roadmap(&skills(&["AWS", "React"]), 0);
        let step = roadmap.iter().find(|s| s.id == 13).unwrap();
        assert_eq!(
            step.resources,
            vec![
                "AWS Solutions Architect",
                "Azure Developer",
                "Google Cloud Professional",
                "Frontend Masters",
                "React Advanced Patterns",
                "UI/UX Design",
            ]
        );
    }

    #[test]
    fn test_specialization_falls_back_to_general_tracks() {
        let roadmap = generate_roadmap(&skills(&["Linux"]), 0);
        let step = roadmap.iter().find(|s| s.id == 13).unwrap();
        assert_eq!(step.resources, GENERAL_TRACKS.to_vec());
    }

    #[test]
    fn test_progress_percent_rounds() {
        // Steps 1 and 3 complete: 2/13 = 15.38%
        let roadmap = generate_roadmap(&skills(&["JavaScript"]), 0);
        assert_eq!(count_with_status(&roadmap, StepStatus::Completed), 2);
        assert_eq!(progress_percent(&roadmap), 15);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_value(StepStatus::Completed).unwrap();
        assert_eq!(json, "completed");
    }
}
