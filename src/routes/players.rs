use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use super::{error_response, with_profiles, AppState};
use crate::models::{
    HealthResponse, MatchRequestResponse, PlayerCard, SearchPlayersRequest, SearchPlayersResponse,
    SendMatchRequest, SupersededResponse,
};
use crate::services::{SearchOutcome, SessionError};

const NO_RESULTS_MESSAGE: &str = "No players found. Try changing your filters to see more players";

fn session_error(e: SessionError) -> HttpResponse {
    match e {
        SessionError::RegistryFull => error_response(StatusCode::SERVICE_UNAVAILABLE, "Session unavailable", e),
        SessionError::AlreadySent(_) => error_response(StatusCode::CONFLICT, "Request already sent", e),
        SessionError::SelfRequest => error_response(StatusCode::BAD_REQUEST, "Invalid match request", e),
        SessionError::UnknownPlayer(_) => error_response(StatusCode::NOT_FOUND, "Player not found", e),
    }
}

/// Configure player browsing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/players/search", web::post().to(search_players))
        .route("/players/{player_id}/request", web::post().to(send_match_request));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Browse players endpoint
///
/// POST /api/v1/players/search
///
/// Request body:
/// ```json
/// {
///   "sessionId": "string",
///   "searchQuery": "neon",
///   "gameFilter": "All Games",
///   "regionFilter": "NA",
///   "lookingForTeammateOnly": true
/// }
/// ```
async fn search_players(
    state: web::Data<AppState>,
    req: web::Json<SearchPlayersRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let roster = match state.roster.players() {
        Ok(players) => players,
        Err(e) => {
            tracing::error!("Failed to load roster: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load roster", e);
        }
    };

    let viewer = match with_profiles(&state, |p| p.load_or_empty()).await {
        Ok(viewer) => viewer,
        Err(e) => {
            tracing::error!("Failed to read viewer profile: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read profile", e);
        }
    };

    let session = match state.sessions.get_or_create(&req.session_id).await {
        Ok(session) => session,
        Err(e) => return session_error(e),
    };

    let SearchPlayersRequest { session_id, criteria } = req.into_inner();
    let matcher = state.matcher.clone();

    tracing::info!("Searching players for session {} with {:?}", session_id, criteria);

    let outcome = session
        .search
        .run(state.search_delay, move || {
            matcher.filter_and_score(&roster, &viewer, &criteria)
        })
        .await;

    match outcome {
        SearchOutcome::Superseded => {
            tracing::debug!("Search for session {} superseded by a newer one", session_id);
            HttpResponse::Ok().json(SupersededResponse { superseded: true })
        }
        SearchOutcome::Fresh(result) => {
            let mut players = Vec::with_capacity(result.players.len());
            for player in result.players.iter().cloned() {
                let request_sent = session.requests.has_sent(&player.id).await;
                players.push(PlayerCard::new(player, request_sent));
            }

            let no_results = result.is_empty();
            let response = SearchPlayersResponse {
                players,
                total_candidates: result.total_candidates,
                no_results,
                message: no_results.then(|| NO_RESULTS_MESSAGE.to_string()),
            };

            tracing::info!(
                "Returning {} players for session {} (from {} candidates)",
                response.players.len(),
                session_id,
                result.total_candidates
            );

            HttpResponse::Ok().json(response)
        }
    }
}

/// Send a match request to one player
///
/// POST /api/v1/players/{playerId}/request
///
/// A session may send at most one request per player.
async fn send_match_request(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SendMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let player_id = path.into_inner();
    let viewer = match with_profiles(&state, |p| p.load_or_empty()).await {
        Ok(viewer) => viewer,
        Err(e) => {
            tracing::error!("Failed to read viewer profile: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read profile", e);
        }
    };

    if !viewer.id.is_empty() && viewer.id == player_id {
        return session_error(SessionError::SelfRequest);
    }

    match state.roster.contains(&player_id) {
        Ok(true) => {}
        Ok(false) => {
            return session_error(SessionError::UnknownPlayer(player_id));
        }
        Err(e) => {
            tracing::error!("Failed to load roster: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load roster", e);
        }
    }

    let session = match state.sessions.get_or_create(&req.session_id).await {
        Ok(session) => session,
        Err(e) => return session_error(e),
    };

    match session.requests.record(&player_id).await {
        Ok(()) => {
            tracing::info!("Session {} sent a match request to player {}", session.id, player_id);
            HttpResponse::Ok().json(MatchRequestResponse {
                success: true,
                message: format!("Match request sent to player #{}", player_id),
                player_id,
            })
        }
        Err(e) => {
            tracing::debug!("Rejected duplicate match request: {}", e);
            session_error(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_health_check_response() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        let resp = health_check().await.respond_to(&req);

        assert_eq!(resp.status(), StatusCode::OK);
    }
}
