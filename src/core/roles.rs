use crate::core::cascade::Outcome;
use crate::services::{LlmError, TextGenerator};
use std::sync::Arc;
use std::time::Duration;

/// Role returned when no keyword rule fires
pub const DEFAULT_ROLE: &str = "Software Developer";

/// Upper bound on inferred roles per request
pub const MAX_ROLES: usize = 5;

const WEB_SKILLS: &[&str] = &["html", "css", "javascript", "js", "react", "angular", "vue"];
const BACKEND_SKILLS: &[&str] = &["python", "django", "flask", "node", "express", "java", "spring"];
const DATABASE_SKILLS: &[&str] = &["sql", "mysql", "postgresql", "mongodb", "database"];

/// Build the primary inference prompt, with one worked example to anchor the format
pub fn roles_prompt(skills_text: &str, max_roles: usize) -> String {
    format!(
        r#"TASK: Convert these technical skills into job roles.
SKILLS: {skills_text}

RULES:
1. Return ONLY a comma-separated list of job roles
2. Do not include any other text
3. Each role should be a standard tech industry job title
4. Include both specific and general roles
5. Maximum {max_roles} roles

EXAMPLE:
Input: "Python, Django, HTML, CSS, JavaScript"
Output: "Web Developer,Full Stack Developer,Python Developer,Backend Developer,Frontend Developer"

YOUR RESPONSE MUST BE ONLY THE COMMA-SEPARATED LIST OF ROLES."#
    )
}

/// Build the simplified retry prompt
pub fn simple_roles_prompt(skills_text: &str) -> String {
    format!("List job roles for someone with these skills: {skills_text}\nFormat: role1,role2,role3")
}

/// Split a model reply into role names
///
/// Tokens are trimmed of whitespace and wrapping quotes; empty tokens and
/// case-insensitive duplicates are dropped, and the list is capped.
pub fn parse_roles(text: &str, max_roles: usize) -> Vec<String> {
    let mut roles: Vec<String> = Vec::new();

    for token in text.split(',') {
        let role = token.trim().trim_matches(|c: char| c == '"' || c == '\'' || c == '`').trim();
        if role.is_empty() || roles.iter().any(|r| r.eq_ignore_ascii_case(role)) {
            continue;
        }
        roles.push(role.to_string());
        if roles.len() == max_roles {
            break;
        }
    }

    roles
}

/// Deterministic keyword-table inference, used when the model is unavailable
pub fn rule_based_roles(skills: &[String], max_roles: usize) -> Vec<String> {
    let lowered: Vec<String> = skills.iter().map(|s| s.trim().to_lowercase()).collect();
    let has_any = |set: &[&str]| lowered.iter().any(|s| set.contains(&s.as_str()));

    let web = has_any(WEB_SKILLS);
    let backend = has_any(BACKEND_SKILLS);
    let database = has_any(DATABASE_SKILLS);

    let mut roles = Vec::new();
    if web && backend {
        roles.push("Full Stack Developer");
    }
    if web {
        roles.extend(["Web Developer", "Frontend Developer"]);
    }
    if backend {
        roles.extend(["Backend Developer", "Python Developer", "Node.js Developer"]);
    }
    if database {
        roles.push("Database Developer");
    }
    if roles.is_empty() {
        roles.push(DEFAULT_ROLE);
    }

    roles.into_iter().take(max_roles.max(1)).map(str::to_string).collect()
}

/// Maps a skill set to a short list of canonical job roles
///
/// Tiers: primary prompt, simplified prompt, keyword rules. A prompt reply
/// with no roles moves to the next prompt; a failed call (error or timeout)
/// goes straight to the keyword rules. Never returns an empty list.
#[derive(Clone)]
pub struct RoleInference {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
    max_roles: usize,
}

impl RoleInference {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self {
            generator,
            timeout,
            max_roles: MAX_ROLES,
        }
    }

    pub fn with_max_roles(mut self, max_roles: usize) -> Self {
        self.max_roles = max_roles.clamp(1, MAX_ROLES);
        self
    }

    pub async fn infer(&self, skills: &[String]) -> Vec<String> {
        let skills_text = skills.join(", ");

        let prompts = [
            roles_prompt(&skills_text, self.max_roles),
            simple_roles_prompt(&skills_text),
        ];

        for (tier, prompt) in prompts.iter().enumerate() {
            match self.prompt_tier(prompt).await {
                Outcome::Resolved(roles) => {
                    tracing::info!("Inferred roles from model (tier {}): {:?}", tier + 1, roles);
                    return roles;
                }
                Outcome::Declined => {
                    tracing::warn!("Model tier {} returned no roles", tier + 1);
                }
                Outcome::Failed(reason) => {
                    tracing::warn!("Role inference call failed, using keyword rules: {}", reason);
                    break;
                }
            }
        }

        let roles = rule_based_roles(skills, self.max_roles);
        tracing::info!("Inferred roles from keyword rules: {:?}", roles);
        roles
    }

    async fn prompt_tier(&self, prompt: &str) -> Outcome<Vec<String>> {
        match tokio::time::timeout(self.timeout, self.generator.generate(prompt)).await {
            Err(_) => Outcome::Failed(LlmError::Timeout(self.timeout).to_string()),
            Ok(Err(e)) => Outcome::Failed(e.to_string()),
            Ok(Ok(text)) => {
                tracing::debug!("Raw role response: {}", text.trim());
                let roles = parse_roles(&text, self.max_roles);
                if roles.is_empty() {
                    Outcome::Declined
                } else {
                    Outcome::Resolved(roles)
                }
            }
        }
    }
}
