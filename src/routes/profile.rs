use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::collections::BTreeMap;
use validator::Validate;

use super::{error_response, with_profiles, AppState};
use crate::core::catalog::{game_filter_options, ranks_for, region_filter_options, roles_for, GAMES, RANK_LADDER, REGIONS};
use crate::core::{apply_edit, check_gamer_tag, ProfileSetup, SetupError};
use crate::models::{PlayerProfile, ProfileSetupRequest, ProfileUpdateRequest};
use crate::services::{ProfileStore, ProfileStoreError};

/// Configure profile and catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/catalog", web::get().to(get_catalog))
        .route("/profile", web::get().to(get_profile))
        .route("/profile", web::put().to(update_profile))
        .route("/profile", web::delete().to(delete_profile))
        .route("/profile/setup", web::post().to(setup_profile));
}

/// Games, regions, ranks and roles offered by the setup and browse screens
async fn get_catalog() -> impl Responder {
    let ranks: BTreeMap<&str, &[&str]> = GAMES.iter().map(|g| (*g, ranks_for(g))).collect();
    let roles: BTreeMap<&str, &[&str]> = GAMES.iter().map(|g| (*g, roles_for(g))).collect();

    HttpResponse::Ok().json(serde_json::json!({
        "games": GAMES,
        "regions": REGIONS,
        "rankLadder": RANK_LADDER,
        "ranks": ranks,
        "roles": roles,
        "gameFilters": game_filter_options(),
        "regionFilters": region_filter_options(),
    }))
}

/// Stored viewer profile
///
/// GET /api/v1/profile
async fn get_profile(state: web::Data<AppState>) -> impl Responder {
    match with_profiles(&state, |p| p.load()).await {
        Ok(Ok(Some(profile))) => HttpResponse::Ok().json(profile),
        Ok(Ok(None)) => error_response(StatusCode::NOT_FOUND, "Profile not found", "profile not set up"),
        Ok(Err(e)) => {
            tracing::warn!("Failed to read viewer profile: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read profile", e)
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read profile", e),
    }
}

enum EditOutcome {
    Saved(PlayerProfile),
    Invalid(SetupError),
    Missing,
}

/// Load, edit and save in one blocking call
fn edit_stored(store: &dyn ProfileStore, req: &ProfileUpdateRequest) -> Result<EditOutcome, ProfileStoreError> {
    let Some(base) = store.load()? else {
        return Ok(EditOutcome::Missing);
    };

    match apply_edit(&base, req) {
        Ok(edited) => {
            store.save(&edited)?;
            Ok(EditOutcome::Saved(edited))
        }
        Err(e) => Ok(EditOutcome::Invalid(e)),
    }
}

/// Edit the stored profile from the settings screen
///
/// PUT /api/v1/profile
///
/// Request body:
/// ```json
/// {
///   "gamerTag": "string (min 3 chars)",
///   "game": "Valorant",
///   "rank": "Diamond",
///   "role": "Duelist",
///   "region": "NA",
///   "bio": "string (max 280 chars)",
///   "lookingForTeammate": true
/// }
/// ```
async fn update_profile(
    state: web::Data<AppState>,
    req: web::Json<ProfileUpdateRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let req = req.into_inner();
    let outcome = with_profiles(&state, move |p| edit_stored(p, &req)).await;

    match outcome {
        Ok(Ok(EditOutcome::Saved(profile))) => {
            tracing::info!("Profile {} updated", profile.id);
            HttpResponse::Ok().json(profile)
        }
        Ok(Ok(EditOutcome::Invalid(e))) => error_response(StatusCode::BAD_REQUEST, "Invalid profile", e),
        Ok(Ok(EditOutcome::Missing)) => {
            error_response(StatusCode::NOT_FOUND, "Profile not found", "profile not set up")
        }
        Ok(Err(e)) => {
            tracing::error!("Failed to save profile data: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save profile data", e)
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save profile data", e),
    }
}

/// Delete the stored profile
///
/// DELETE /api/v1/profile
async fn delete_profile(state: web::Data<AppState>) -> impl Responder {
    match with_profiles(&state, |p| p.clear()).await {
        Ok(Ok(())) => {
            tracing::info!("Viewer profile deleted");
            HttpResponse::NoContent().finish()
        }
        Ok(Err(e)) => {
            tracing::error!("Failed to delete profile: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete profile", e)
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete profile", e),
    }
}

/// Complete the profile setup wizard
///
/// POST /api/v1/profile/setup
///
/// Request body:
/// ```json
/// {
///   "gamerTag": "string (min 3 chars, required when none is stored)",
///   "game": "Valorant",
///   "rank": "Diamond",
///   "role": "Duelist",
///   "region": "NA",
///   "bio": "string (max 280 chars)",
///   "lookingForTeammate": true
/// }
/// ```
async fn setup_profile(
    state: web::Data<AppState>,
    req: web::Json<ProfileSetupRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let wizard = match ProfileSetup::from_request(&req) {
        Ok(wizard) => wizard,
        Err(e) => {
            tracing::info!("Profile setup rejected: {}", e);
            return error_response(StatusCode::BAD_REQUEST, "Profile setup incomplete", e);
        }
    };

    let mut base = match with_profiles(&state, |p| p.load_or_empty()).await {
        Ok(base) => base,
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read profile", e),
    };
    if base.id.is_empty() {
        base.id = uuid::Uuid::new_v4().to_string();
    }

    // A fresh profile has to pick its gamer tag here
    let tag = req.gamer_tag.as_deref().unwrap_or(&base.gamer_tag);
    match check_gamer_tag(tag) {
        Ok(tag) => base.gamer_tag = tag,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, "Profile setup incomplete", e),
    }

    let profile = match wizard.apply_to(&base) {
        Ok(profile) => profile,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, "Profile setup incomplete", e),
    };

    let to_save = profile.clone();
    match with_profiles(&state, move |p| p.save(&to_save)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            tracing::error!("Failed to save profile data: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save profile data", e);
        }
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save profile data", e),
    }

    tracing::info!("Profile setup completed for {} ({})", profile.id, profile.game);
    HttpResponse::Ok().json(profile)
}
