use serde::{Deserialize, Serialize};

/// Fallback company name when a scraped record has none
pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Fallback apply link when a scraped record has none
pub const MISSING_URL: &str = "#";

/// A single scraped job posting
///
/// Deserialized from the scraper's JSON export, whose keys are the literal
/// column names `Job Position`, `Company` and `Source URL`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(rename(deserialize = "Job Position"), default)]
    pub title: String,
    #[serde(rename(deserialize = "Company"), default = "default_company")]
    pub company: String,
    #[serde(rename(deserialize = "Source URL"), default = "default_url")]
    pub apply_url: String,
    #[serde(rename(deserialize = "Location"), default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl JobPosting {
    pub fn new(title: impl Into<String>, company: impl Into<String>, apply_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            apply_url: apply_url.into(),
            location: None,
        }
    }
}

fn default_company() -> String { UNKNOWN_COMPANY.to_string() }
fn default_url() -> String { MISSING_URL.to_string() }

/// Scored job match returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatch {
    pub job_position: String,
    pub company: String,
    /// 0.0 - 100.0, rounded to one decimal
    pub match_percentage: f64,
    pub apply_url: String,
}

impl JobMatch {
    pub fn from_posting(posting: &JobPosting, score: f64) -> Self {
        Self {
            job_position: posting.title.clone(),
            company: posting.company.clone(),
            match_percentage: round_one_decimal(score),
            apply_url: posting.apply_url.clone(),
        }
    }
}

#[inline]
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Subscription plan limiting how many matches a caller may see per request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub name: String,
    pub max_matches: usize,
    pub price_cents: i64,
    pub features: Vec<String>,
}

impl SubscriptionPlan {
    /// Match ceiling used by the "unlimited" tier
    pub const UNLIMITED: usize = 999_999;

    pub fn free() -> Self {
        Self {
            name: "Free".to_string(),
            max_matches: 10,
            price_cents: 0,
            features: vec![
                "Basic job matching".to_string(),
                "Up to 10 matches per search".to_string(),
            ],
        }
    }

    pub fn premium() -> Self {
        Self {
            name: "Premium".to_string(),
            max_matches: 30,
            price_cents: 999,
            features: vec![
                "Advanced job matching".to_string(),
                "Up to 30 matches per search".to_string(),
                "Priority support".to_string(),
            ],
        }
    }

    pub fn pro() -> Self {
        Self {
            name: "Pro".to_string(),
            max_matches: Self::UNLIMITED,
            price_cents: 2999,
            features: vec![
                "Advanced job matching".to_string(),
                "Unlimited matches".to_string(),
                "Priority support".to_string(),
                "Custom alerts".to_string(),
            ],
        }
    }

    /// The plans every deployment starts with
    pub fn catalogue() -> Vec<Self> {
        vec![Self::free(), Self::premium(), Self::pro()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_uses_scraper_column_names() {
        let json = r#"{"Job Position": "Backend Engineer", "Company": "Acme", "Source URL": "https://acme.dev/jobs/1"}"#;
        let posting: JobPosting = serde_json::from_str(json).unwrap();

        assert_eq!(posting.title, "Backend Engineer");
        assert_eq!(posting.company, "Acme");
        assert_eq!(posting.apply_url, "https://acme.dev/jobs/1");
        assert_eq!(posting.location, None);
    }

    #[test]
    fn test_posting_defaults() {
        let posting: JobPosting = serde_json::from_str(r#"{"Job Position": "Data Analyst"}"#).unwrap();

        assert_eq!(posting.company, UNKNOWN_COMPANY);
        assert_eq!(posting.apply_url, MISSING_URL);
    }

    #[test]
    fn test_match_percentage_rounding() {
        let posting = JobPosting::new("Web Developer", "Acme", "#");
        let m = JobMatch::from_posting(&posting, 66.666);
        assert_eq!(m.match_percentage, 66.7);
    }

    #[test]
    fn test_catalogue_ceilings() {
        let ceilings: Vec<usize> = SubscriptionPlan::catalogue().iter().map(|p| p.max_matches).collect();
        assert_eq!(ceilings, vec![10, 30, SubscriptionPlan::UNLIMITED]);
    }
}
