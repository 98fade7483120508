use crate::core::cascade::Outcome;
use crate::core::variations::RoleVariations;
use crate::services::{LlmError, TextGenerator};
use regex::Regex;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

/// Score for a variation-table hit
pub const DIRECT_MATCH_SCORE: f64 = 100.0;

/// Score for a plain role-in-title hit when the model is unreachable
pub const HEURISTIC_MATCH_SCORE: f64 = 80.0;

/// Lowest model estimate still counted as a match
pub const DEFAULT_MIN_MODEL_SCORE: f64 = 40.0;

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+").expect("number pattern is valid"))
}

/// Build the closeness-rating prompt
pub fn closeness_prompt(roles: &[String], job_title: &str) -> String {
    let roles_text = roles.join(", ");
    format!(
        r#"Compare these potential roles with a job position and determine if there's a match.

Potential Roles: {roles_text}
Job Position: {job_title}

Instructions:
1. Be lenient in matching - consider related roles and variations
2. If the job position is in the same domain as any role, consider it a match
3. Return a number between 0 and 100:
   - 100 for exact matches
   - 80-90 for very close matches
   - 60-70 for related roles
   - 40-50 for same domain but different focus
   - 0 for completely unrelated

Return ONLY the number."#
    )
}

/// First integer in a model reply, capped at 100
pub fn extract_score(text: &str) -> Option<f64> {
    number_pattern()
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(|n| n.min(100.0))
}

/// Whole-role substring check used when the model call fails
pub fn heuristic_score(roles: &[String], job_title: &str) -> f64 {
    let title_lower = job_title.to_lowercase();
    if roles.iter().any(|r| title_lower.contains(&r.to_lowercase())) {
        HEURISTIC_MATCH_SCORE
    } else {
        0.0
    }
}

/// Scores one job title against the inferred roles
///
/// Tiers, first positive result wins:
/// 1. variation table overlap -> 100
/// 2. model estimate, kept when >= the threshold; a lower or unparseable
///    estimate ends scoring at 0
/// 3. only if the model call itself failed: role-in-title heuristic (80 or 0)
#[derive(Clone)]
pub struct MatchScorer {
    generator: Arc<dyn TextGenerator>,
    variations: Arc<RoleVariations>,
    timeout: Duration,
    min_model_score: f64,
}

impl MatchScorer {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        variations: Arc<RoleVariations>,
        timeout: Duration,
    ) -> Self {
        Self {
            generator,
            variations,
            timeout,
            min_model_score: DEFAULT_MIN_MODEL_SCORE,
        }
    }

    pub fn with_min_model_score(mut self, min_model_score: f64) -> Self {
        self.min_model_score = min_model_score.clamp(0.0, 100.0);
        self
    }

    /// Match percentage in [0, 100]
    pub async fn score(&self, roles: &[String], job_title: &str) -> f64 {
        if let Outcome::Resolved(score) = self.variation_tier(roles, job_title) {
            return score;
        }

        match self.model_tier(roles, job_title).await {
            Outcome::Resolved(score) => score,
            Outcome::Declined => 0.0,
            Outcome::Failed(reason) => {
                tracing::warn!("Model scoring failed for '{}', using heuristic: {}", job_title, reason);
                heuristic_score(roles, job_title)
            }
        }
    }

    /// Tier 1 only; no external call
    pub fn variation_tier(&self, roles: &[String], job_title: &str) -> Outcome<f64> {
        let title_lower = job_title.to_lowercase();

        for role in roles {
            if let Some(variation) = self.variations.find_overlap(role, &title_lower) {
                tracing::debug!("Direct match: '{}' matches '{}'", job_title, variation);
                return Outcome::Resolved(DIRECT_MATCH_SCORE);
            }
        }

        Outcome::Declined
    }

    async fn model_tier(&self, roles: &[String], job_title: &str) -> Outcome<f64> {
        let prompt = closeness_prompt(roles, job_title);

        let text = match tokio::time::timeout(self.timeout, self.generator.generate(&prompt)).await {
            Err(_) => return Outcome::Failed(LlmError::Timeout(self.timeout).to_string()),
            Ok(Err(e)) => return Outcome::Failed(e.to_string()),
            Ok(Ok(text)) => text,
        };

        tracing::debug!("Model score for '{}': {}", job_title, text.trim());

        match extract_score(&text) {
            Some(score) if score >= self.min_model_score => Outcome::Resolved(score),
            _ => Outcome::Declined,
        }
    }
}
