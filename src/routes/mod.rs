// Route exports
pub mod messages;
pub mod players;
pub mod profile;

use actix_web::{error, http::StatusCode, web, HttpResponse};
use std::sync::Arc;
use std::time::Duration;

use crate::core::Matcher;
use crate::models::ErrorResponse;
use crate::services::{AssistantClient, ConversationStore, ProfileStore, RosterSource, SessionRegistry};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<dyn RosterSource>,
    pub profiles: Arc<dyn ProfileStore>,
    pub sessions: SessionRegistry,
    pub conversations: Arc<ConversationStore>,
    pub assistant: Arc<AssistantClient>,
    pub matcher: Matcher,
    /// Cosmetic latency before a search result is shown
    pub search_delay: Duration,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(players::configure)
            .configure(profile::configure)
            .configure(messages::configure),
    );
}

/// Run a profile store call on the blocking thread pool
///
/// The file-backed store does synchronous disk I/O, so handlers never call it
/// on the async workers directly.
pub async fn with_profiles<T, F>(state: &AppState, f: F) -> Result<T, error::BlockingError>
where
    F: FnOnce(&dyn ProfileStore) -> T + Send + 'static,
    T: Send + 'static,
{
    let profiles = state.profiles.clone();
    web::block(move || f(profiles.as_ref())).await
}

/// JSON error body with the given status
pub fn error_response(status: StatusCode, error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status.as_u16(),
    })
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let message = format!("Invalid JSON: {}", err);
    error::InternalError::from_response(
        err,
        error_response(StatusCode::BAD_REQUEST, "invalid_json", message),
    )
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    let message = format!("Invalid query: {}", err);
    error::InternalError::from_response(
        err,
        error_response(StatusCode::BAD_REQUEST, "invalid_query", message),
    )
    .into()
}
