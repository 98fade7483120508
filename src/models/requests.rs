use serde::{Deserialize, Serialize};
use validator::Validate;

/// Skills as sent by clients: either a JSON array or one comma-joined string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    Joined(String),
}

impl SkillsInput {
    /// Split into trimmed, non-empty skill tokens
    pub fn tokens(&self) -> Vec<String> {
        match self {
            SkillsInput::List(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            SkillsInput::Joined(text) => text
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

impl Default for SkillsInput {
    fn default() -> Self {
        SkillsInput::List(Vec::new())
    }
}

/// Request to match a caller's skills against the job corpus
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MatchJobsRequest {
    #[serde(default)]
    pub skills: SkillsInput,
    /// Years of experience; accepted and logged, not used for scoring
    #[validate(range(min = 0.0, max = 80.0))]
    #[serde(default)]
    pub experience: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_skills() {
        let req: MatchJobsRequest = serde_json::from_str(r#"{"skills": [" Python ", "", "Django"]}"#).unwrap();
        assert_eq!(req.skills.tokens(), vec!["Python", "Django"]);
        assert_eq!(req.experience, None);
    }

    #[test]
    fn test_joined_skills() {
        let req: MatchJobsRequest = serde_json::from_str(r#"{"skills": "react, css,,  node", "experience": 3}"#).unwrap();
        assert_eq!(req.skills.tokens(), vec!["react", "css", "node"]);
        assert_eq!(req.experience, Some(3.0));
    }

    #[test]
    fn test_missing_skills_is_empty() {
        let req: MatchJobsRequest = serde_json::from_str("{}").unwrap();
        assert!(req.skills.tokens().is_empty());
    }

    #[test]
    fn test_negative_experience_rejected() {
        let req = MatchJobsRequest {
            skills: SkillsInput::List(vec!["rust".to_string()]),
            experience: Some(-1.0),
        };
        assert!(req.validate().is_err());
    }
}
