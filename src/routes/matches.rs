use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::Instrument;
use validator::Validate;
use crate::core::JobMatcher;
use crate::error::MatchError;
use crate::models::{HealthResponse, ListingsResponse, MatchJobsRequest, PlansResponse};
use crate::services::{JobCorpus, SubscriptionStore};
use std::sync::Arc;

/// Header carrying the caller identity, set by the upstream auth layer
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<JobMatcher>,
    pub corpus: Arc<dyn JobCorpus>,
    pub subscriptions: Arc<dyn SubscriptionStore>,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/match-jobs", web::post().to(match_jobs))
        .route("/listings", web::get().to(job_listings))
        .route("/plans", web::get().to(list_plans));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = match state.subscriptions.ping().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::warn!("Subscription store health check failed: {}", e);
            "degraded"
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn caller_id(req: &HttpRequest) -> Result<String, MatchError> {
    req.headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(MatchError::Unauthorized)
}

/// Match jobs endpoint
///
/// POST /api/v1/match-jobs
///
/// Request body:
/// ```json
/// {
///   "skills": ["Python", "Django"],
///   "experience": 3
/// }
/// ```
async fn match_jobs(
    state: web::Data<AppState>,
    req: web::Json<MatchJobsRequest>,
    http_req: HttpRequest,
) -> Result<HttpResponse, MatchError> {
    let user_id = caller_id(&http_req)?;

    if let Err(errors) = req.validate() {
        return Err(MatchError::bad_request("Validation failed", errors.to_string()));
    }

    let skills = req.skills.tokens();
    let span = tracing::info_span!(
        "match_jobs",
        request_id = %uuid::Uuid::new_v4(),
        user_id = %user_id
    );

    async move {
        tracing::info!("Skills: {:?}, experience: {:?}", skills, req.experience);

        let response = state.matcher.match_jobs(&user_id, &skills).await?;
        Ok::<_, MatchError>(HttpResponse::Ok().json(response))
    }
    .instrument(span)
    .await
}

/// Job listings endpoint
///
/// GET /api/v1/listings
async fn job_listings(state: web::Data<AppState>) -> Result<HttpResponse, MatchError> {
    let listings = state.corpus.load().await?;

    Ok(HttpResponse::Ok().json(ListingsResponse {
        total: listings.len(),
        listings,
    }))
}

/// Subscription plans endpoint
///
/// GET /api/v1/plans
async fn list_plans(state: web::Data<AppState>) -> Result<HttpResponse, MatchError> {
    let plans = state
        .subscriptions
        .list_plans()
        .await
        .map_err(|e| MatchError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(PlansResponse { plans }))
}
