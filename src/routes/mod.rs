// Route exports
pub mod matches;

use actix_web::{error, web, HttpRequest};
use crate::error::MatchError;

pub use matches::{AppState, USER_ID_HEADER};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure),
    );
}

/// JSON extractor config that reports payload errors as `{error, detail}`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}

/// Handle JSON payload errors
fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    MatchError::bad_request("Invalid JSON", err.to_string()).into()
}
