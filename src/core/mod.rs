// Core algorithm exports
pub mod cascade;
pub mod matcher;
pub mod quota;
pub mod roles;
pub mod scoring;
pub mod variations;

pub use cascade::Outcome;
pub use matcher::{JobMatcher, RankedMatches};
pub use quota::{QuotaResolver, FREE_TIER_MAX_MATCHES};
pub use roles::{RoleInference, rule_based_roles, parse_roles};
pub use scoring::{MatchScorer, extract_score, heuristic_score};
pub use variations::RoleVariations;
