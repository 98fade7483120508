// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{JobPosting, JobMatch, SubscriptionPlan};
pub use requests::{MatchJobsRequest, SkillsInput};
pub use responses::{MatchJobsResponse, ListingsResponse, PlansResponse, HealthResponse, ErrorResponse};
