//! Skill Gap Planner: turns missing job skills into learning items.

use serde::Serialize;

use crate::analysis::roadmap::{Difficulty, StepStatus};

const SKILL_RESOURCES: &[(&str, &[&str])] = &[
    ("python", &["Python.org", "Real Python", "Codecademy Python Course"]),
    ("react", &["React Documentation", "React Tutorial", "Frontend Masters"]),
    ("node.js", &["Node.js Docs", "Express.js Guide", "NodeSchool"]),
    ("aws", &["AWS Free Tier", "AWS Solutions Architect", "CloudGuru"]),
    ("docker", &["Docker Hub", "Docker Tutorial", "Play with Docker"]),
    ("kubernetes", &["Kubernetes Docs", "Katacoda", "Kubernetes Academy"]),
    ("sql", &["SQLBolt", "Mode Analytics", "SQL Zoo"]),
    ("machine learning", &["Coursera ML", "Fast.ai", "Google ML Crash Course"]),
    ("git", &["Git Tutorial", "GitHub Skills", "Atlassian Git"]),
];

const GENERAL_RESOURCES: &[&str] = &[
    "General Programming Resources",
    "Online Learning Platforms",
    "Tech Communities",
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillLearningItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub estimated_time: &'static str,
    pub difficulty: Difficulty,
    pub status: StepStatus,
    pub resources: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecommendations {
    pub improve_profile: String,
    pub apply_strategy: String,
    pub next_steps: String,
}

pub fn resources_for(skill: &str) -> Vec<&'static str> {
    let key = skill.to_lowercase();
    SKILL_RESOURCES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, resources)| resources.to_vec())
        .unwrap_or_else(|| GENERAL_RESOURCES.to_vec())
}

/// One learning item per missing skill; `None` when nothing is missing.
pub fn plan_skill_gaps(missing_skills: &[String]) -> Option<Vec<SkillLearningItem>> {
    if missing_skills.is_empty() {
        return None;
    }

    let items = missing_skills
        .iter()
        .enumerate()
        .map(|(index, skill)| SkillLearningItem {
            id: format!("skill-{}", index + 1),
            title: format!("Learn {skill}"),
            description: format!(
                "Master {skill} through online courses, projects, and hands-on practice"
            ),
            estimated_time: "4-8 weeks",
            difficulty: Difficulty::Intermediate,
            status: StepStatus::Current,
            resources: resources_for(skill),
        })
        .collect();

    Some(items)
}

pub fn recommendations(missing_skills: &[String], has_skill_plan: bool) -> JobRecommendations {
    let improve_profile = if missing_skills.is_empty() {
        "Your skill profile is strong!".to_string()
    } else {
        let top: Vec<&str> = missing_skills.iter().take(5).map(String::as_str).collect();
        format!("Consider adding these skills: {}", top.join(", "))
    };

    let next_steps = if has_skill_plan {
        "Complete the recommended skill roadmap before applying"
    } else {
        "Continue building your current skills"
    };

    JobRecommendations {
        improve_profile,
        apply_strategy: "Focus on jobs where you match at least 50% of required skills".to_string(),
        next_steps: next_steps.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_gaps_no_plan() {
        assert!(plan_skill_gaps(&[]).is_none());
        let recs = recommendations(&[], false);
        assert_eq!(recs.improve_profile, "Your skill profile is strong!");
        assert_eq!(recs.next_steps, "Continue building your current skills");
    }

    #[test]
    fn test_plan_numbers_items_and_maps_resources() {
        let missing = vec!["git".to_string(), "redux".to_string()];
        let plan = plan_skill_gaps(&missing).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].id, "skill-1");
        assert_eq!(plan[0].title, "Learn git");
        assert_eq!(plan[0].resources, vec!["Git Tutorial", "GitHub Skills", "Atlassian Git"]);
        assert_eq!(plan[1].resources, GENERAL_RESOURCES.to_vec());
    }

    #[test]
    fn test_recommendations_list_first_five() {
        let missing: Vec<String> = ["a", "b", "c", "d", "e", "f"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let recs = recommendations(&missing, true);
        assert_eq!(recs.improve_profile, "Consider adding these skills: a, b, c, d, e");
        assert_eq!(
            recs.next_steps,
            "Complete the recommended skill roadmap before applying"
        );
    }
}
