use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use crate::models::ErrorResponse;
use crate::services::CorpusError;
use thiserror::Error;

/// Errors surfaced to callers of the matching API
///
/// Model failures never appear here; they are absorbed by the fallback tiers.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("{error}: {detail}")]
    BadRequest { error: String, detail: String },

    #[error("Authentication required")]
    Unauthorized,

    #[error("Jobs data not found: {0}")]
    CorpusUnavailable(String),

    #[error("Invalid jobs data: {0}")]
    CorpusMalformed(String),

    #[error("An unexpected error occurred: {0}")]
    Internal(String),
}

impl MatchError {
    pub fn bad_request(error: impl Into<String>, detail: impl Into<String>) -> Self {
        MatchError::BadRequest {
            error: error.into(),
            detail: detail.into(),
        }
    }

    /// Body sent to the client
    pub fn to_body(&self) -> ErrorResponse {
        let (error, detail) = match self {
            MatchError::BadRequest { error, detail } => (error.clone(), detail.clone()),
            MatchError::Unauthorized => (
                "Authentication required".to_string(),
                "Missing caller identity".to_string(),
            ),
            MatchError::CorpusUnavailable(_) => (
                "Jobs data not found".to_string(),
                "The jobs database is currently unavailable".to_string(),
            ),
            MatchError::CorpusMalformed(_) => (
                "Invalid jobs data".to_string(),
                "Error reading jobs database".to_string(),
            ),
            MatchError::Internal(msg) => ("An unexpected error occurred".to_string(), msg.clone()),
        };

        ErrorResponse { error, detail }
    }
}

impl From<CorpusError> for MatchError {
    fn from(err: CorpusError) -> Self {
        match err {
            CorpusError::Unavailable { .. } => MatchError::CorpusUnavailable(err.to_string()),
            CorpusError::Malformed(msg) => MatchError::CorpusMalformed(msg),
        }
    }
}

impl ResponseError for MatchError {
    fn status_code(&self) -> StatusCode {
        match self {
            MatchError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            MatchError::Unauthorized => StatusCode::UNAUTHORIZED,
            MatchError::CorpusUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            MatchError::CorpusMalformed(_) | MatchError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            MatchError::CorpusUnavailable(_) | MatchError::CorpusMalformed(_) | MatchError::Internal(_) => {
                tracing::error!("{}", self);
            }
            _ => tracing::info!("Rejected request: {}", self),
        }

        HttpResponse::build(self.status_code()).json(self.to_body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(MatchError::bad_request("x", "y").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(MatchError::CorpusUnavailable("gone".into()).status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(MatchError::CorpusMalformed("bad".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_corpus_error_mapping() {
        let err: MatchError = CorpusError::Unavailable {
            path: "jobs.json".into(),
            reason: "file not found".into(),
        }
        .into();
        assert!(matches!(err, MatchError::CorpusUnavailable(_)));
        assert_eq!(err.to_body().detail, "The jobs database is currently unavailable");
    }
}
