//! Skill Extractor: matches resume text against the fixed keyword vocabulary.

/// Reference vocabulary, grouped by area. Order matters: extracted skills and
/// the "Consider learning" suggestion both follow it.
pub const SKILL_KEYWORDS: &[&str] = &[
    // Programming languages
    "Python", "Java", "C++", "JavaScript", "TypeScript", "Go", "Rust", "PHP", "Ruby", "C#",
    "Swift", "Kotlin",
    // Frontend
    "React", "Angular", "Vue", "Next.js", "Svelte", "HTML", "CSS", "Sass", "Tailwind CSS",
    "Bootstrap", "Material UI",
    // Backend
    "Node.js", "Express.js", "Django", "Flask", "Spring", "Ruby on Rails", "ASP.NET", "FastAPI",
    // Databases
    "MongoDB", "SQL", "PostgreSQL", "MySQL", "SQLite", "Redis", "Cassandra", "Elasticsearch",
    "DynamoDB",
    // Cloud & DevOps
    "AWS", "Azure", "Google Cloud", "GCP", "Docker", "Kubernetes", "Terraform", "Ansible",
    "Jenkins", "CI/CD",
    // Data science & ML
    "Machine Learning", "Deep Learning", "TensorFlow", "PyTorch", "Keras", "Pandas", "NumPy",
    "Scikit-learn", "NLP", "Data Science", "Computer Vision", "Reinforcement Learning",
    "Artificial Intelligence",
    // Tools & platforms
    "Git", "GitHub", "GitLab", "Bitbucket", "Jira", "Confluence", "Slack", "Figma", "Postman",
    // Concepts & practices
    "DSA", "Algorithms", "Data Structures", "System Design", "Object-Oriented Programming",
    "REST API", "GraphQL", "Microservices", "Agile", "Scrum", "Kanban",
    "Test-Driven Development", "DevOps",
    // Security & infrastructure
    "Cybersecurity", "Network Security", "Linux", "Unix", "Windows", "Networking",
    "Load Balancing",
    // Other
    "Blockchain", "Web3", "Serverless", "Lambda", "API Gateway", "Message Queues", "Caching",
];

/// Returns every keyword whose lowercase form occurs anywhere in the text.
///
/// Plain substring search: no tokenization and no word boundaries, so "Java"
/// is reported for a resume that only mentions "JavaScript".
pub fn extract_skills(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    let mut skills: Vec<String> = Vec::new();

    for keyword in SKILL_KEYWORDS {
        if haystack.contains(&keyword.to_lowercase()) && !skills.iter().any(|s| s == keyword) {
            skills.push((*keyword).to_string());
        }
    }

    skills
}

/// Keywords from the vocabulary the resume did not mention, in vocabulary order.
pub fn missing_keywords(extracted: &[String]) -> Vec<&'static str> {
    SKILL_KEYWORDS
        .iter()
        .copied()
        .filter(|k| !extracted.iter().any(|s| s == k))
        .collect()
}

/// Case-insensitive membership test shared by the roadmap and job matcher.
pub fn has_any_skill(user_skills_lower: &[String], candidates: &[&str]) -> bool {
    candidates
        .iter()
        .any(|c| user_skills_lower.iter().any(|s| *s == c.to_lowercase()))
}

/// All-of variant of [`has_any_skill`]. An empty candidate list is satisfied.
pub fn has_all_skills(user_skills_lower: &[String], candidates: &[&str]) -> bool {
    candidates
        .iter()
        .all(|c| user_skills_lower.iter().any(|s| *s == c.to_lowercase()))
}

pub fn lowercase_all(skills: &[String]) -> Vec<String> {
    skills.iter().map(|s| s.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_case_insensitively_with_reference_casing() {
        let skills = extract_skills("built services in PYTHON and postgresql");
        assert!(skills.contains(&"Python".to_string()));
        assert!(skills.contains(&"PostgreSQL".to_string()));
        // "SQL" is a substring of "postgresql"
        assert!(skills.contains(&"SQL".to_string()));
    }

    #[test]
    fn test_substring_match_has_no_word_boundary() {
        let skills = extract_skills("Frontend work in JavaScript only");
        assert!(skills.contains(&"JavaScript".to_string()));
        assert!(skills.contains(&"Java".to_string()));
    }

    #[test]
    fn test_go_matches_inside_google() {
        let skills = extract_skills("Deployed on Google Cloud");
        assert!(skills.contains(&"Go".to_string()));
        assert!(skills.contains(&"Google Cloud".to_string()));
    }

    #[test]
    fn test_output_follows_vocabulary_order_without_duplicates() {
        let skills = extract_skills("react react React docker python");
        let react = skills.iter().position(|s| s == "React").unwrap();
        let python = skills.iter().position(|s| s == "Python").unwrap();
        let docker = skills.iter().position(|s| s == "Docker").unwrap();
        assert!(python < react && react < docker);
        assert_eq!(skills.iter().filter(|s| *s == "React").count(), 1);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(extract_skills("").is_empty());
    }

    #[test]
    fn test_missing_keywords_skips_extracted() {
        let extracted = vec!["Python".to_string(), "Java".to_string()];
        let missing = missing_keywords(&extracted);
        assert_eq!(missing[0], "C++");
        assert_eq!(missing.len(), SKILL_KEYWORDS.len() - 2);
    }

    #[test]
    fn test_has_any_and_all() {
        let user = lowercase_all(&["React".to_string(), "Node.js".to_string()]);
        assert!(has_any_skill(&user, &["vue", "react"]));
        assert!(!has_any_skill(&user, &["vue"]));
        assert!(has_all_skills(&user, &["react", "node.js"]));
        assert!(!has_all_skills(&user, &["react", "mongodb"]));
        assert!(has_all_skills(&user, &[]));
    }
}
