use crate::core::quota::QuotaResolver;
use crate::core::roles::RoleInference;
use crate::core::scoring::MatchScorer;
use crate::error::MatchError;
use crate::models::{JobMatch, JobPosting, MatchJobsResponse};
use crate::services::JobCorpus;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Number of corpus titles echoed back when nothing matched
const SAMPLE_JOB_COUNT: usize = 5;

/// Default number of postings scored concurrently
pub const DEFAULT_SCORING_CONCURRENCY: usize = 8;

/// Result of scoring a corpus against a set of roles
#[derive(Debug)]
pub struct RankedMatches {
    /// Qualifying matches, best first, already truncated
    pub matches: Vec<JobMatch>,
    /// Qualifying matches before truncation
    pub total_matches: usize,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Skill validation
/// 2. Role inference
/// 3. Corpus load
/// 4. Per-posting scoring (concurrent, order preserved)
/// 5. Ranking and quota truncation
#[derive(Clone)]
pub struct JobMatcher {
    roles: RoleInference,
    scorer: MatchScorer,
    corpus: Arc<dyn JobCorpus>,
    quota: QuotaResolver,
    concurrency: usize,
}

impl JobMatcher {
    pub fn new(
        roles: RoleInference,
        scorer: MatchScorer,
        corpus: Arc<dyn JobCorpus>,
        quota: QuotaResolver,
    ) -> Self {
        Self {
            roles,
            scorer,
            corpus,
            quota,
            concurrency: DEFAULT_SCORING_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Match a caller's skills against the job corpus
    ///
    /// # Arguments
    /// * `user_id` - Caller identity, used for the quota lookup
    /// * `skills` - Trimmed skill tokens
    ///
    /// # Returns
    /// Ranked, quota-truncated matches, or an explicit "no matches" response
    pub async fn match_jobs(&self, user_id: &str, skills: &[String]) -> Result<MatchJobsResponse, MatchError> {
        if skills.iter().all(|s| s.trim().is_empty()) {
            return Err(MatchError::bad_request("No skills provided", "Resume skills are required"));
        }

        let potential_roles = self.roles.infer(skills).await;
        if potential_roles.is_empty() {
            return Err(MatchError::bad_request(
                "Could not determine potential roles",
                "Unable to analyze skills",
            ));
        }

        let postings = self.corpus.load().await?;

        let max_matches = self.quota.max_matches(user_id).await;
        let ranked = self.rank(&potential_roles, &postings, max_matches).await;

        if ranked.total_matches == 0 {
            tracing::warn!("No matches found for roles: {:?}", potential_roles);
            return Ok(MatchJobsResponse {
                matches: vec![],
                total_matches: 0,
                max_matches,
                potential_roles,
                message: Some("No matching jobs found".to_string()),
                sample_jobs: Some(
                    postings
                        .iter()
                        .take(SAMPLE_JOB_COUNT)
                        .map(|p| p.title.clone())
                        .collect(),
                ),
            });
        }

        tracing::info!(
            "Returning {} of {} matches (limit {})",
            ranked.matches.len(),
            ranked.total_matches,
            max_matches
        );

        Ok(MatchJobsResponse {
            matches: ranked.matches,
            total_matches: ranked.total_matches,
            max_matches,
            potential_roles,
            message: None,
            sample_jobs: None,
        })
    }

    /// Score every titled posting, keep positive scores, sort and truncate
    ///
    /// Sorting is stable, so ties keep corpus order.
    pub async fn rank(&self, roles: &[String], postings: &[JobPosting], limit: usize) -> RankedMatches {
        let scored: Vec<Option<JobMatch>> = stream::iter(postings.iter().filter(|p| !p.title.trim().is_empty()))
            .map(|posting| async move {
                let score = self.scorer.score(roles, &posting.title).await;
                (score > 0.0).then(|| JobMatch::from_posting(posting, score))
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut matches: Vec<JobMatch> = scored.into_iter().flatten().collect();

        matches.sort_by(|a, b| {
            b.match_percentage
                .partial_cmp(&a.match_percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let total_matches = matches.len();
        matches.truncate(limit);

        RankedMatches {
            matches,
            total_matches,
        }
    }
}
