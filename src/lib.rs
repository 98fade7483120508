//! JobAlign - skill-to-job matching service
//!
//! This library turns a caller's skills into a ranked list of scraped job
//! postings. Roles are inferred with a text-generation model backed by
//! keyword rules, and each posting is scored through a tiered cascade.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{JobMatcher, MatchScorer, QuotaResolver, RoleInference, RoleVariations};
pub use error::MatchError;
pub use models::{JobPosting, JobMatch, MatchJobsRequest, MatchJobsResponse, SubscriptionPlan};
