use serde::{Deserialize, Serialize};
use crate::models::domain::{JobMatch, JobPosting, SubscriptionPlan};

/// Response for the match-jobs endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchJobsResponse {
    pub matches: Vec<JobMatch>,
    /// Number of qualifying postings before the quota was applied
    pub total_matches: usize,
    pub max_matches: usize,
    pub potential_roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_jobs: Option<Vec<String>>,
}

/// Response for the listings endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingsResponse {
    pub listings: Vec<JobPosting>,
    pub total: usize,
}

/// Response for the plans endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlansResponse {
    pub plans: Vec<SubscriptionPlan>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
}
