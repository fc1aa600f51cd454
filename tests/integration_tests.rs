// Integration tests for Arena Nexus

use actix_web::{http::StatusCode, test, web, App};
use arena_nexus::core::Matcher;
use arena_nexus::models::{FilterCriteria, PlayerProfile, ScoringRules};
use arena_nexus::routes::{self, handle_json_payload_error, AppState};
use arena_nexus::services::{
    AssistantClient, AssistantConfig, ConversationStore, MemoryProfileStore, ProfileStore,
    SessionRegistry, StaticRoster,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

fn valorant_viewer() -> PlayerProfile {
    PlayerProfile {
        id: "me".to_string(),
        gamer_tag: "Viewer".to_string(),
        game: "Valorant".to_string(),
        rank: "Diamond".to_string(),
        role: "Duelist".to_string(),
        region: "NA".to_string(),
        ..Default::default()
    }
}

fn create_state(viewer: Option<PlayerProfile>) -> (AppState, Arc<MemoryProfileStore>) {
    let profiles = Arc::new(MemoryProfileStore::new(viewer));
    let assistant = AssistantClient::new(AssistantConfig::default()).expect("assistant client");

    let state = AppState {
        roster: Arc::new(StaticRoster::builtin()),
        profiles: profiles.clone(),
        sessions: SessionRegistry::new(100, 60),
        conversations: Arc::new(ConversationStore::seeded()),
        assistant: Arc::new(assistant),
        matcher: Matcher::new(ScoringRules::default()),
        search_delay: Duration::ZERO,
    };

    (state, profiles)
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
                .configure(routes::configure_routes),
        )
        .await
    };
}

#[::core::prelude::v1::test]
fn test_integration_end_to_end_pipeline() {
    let matcher = Matcher::default();
    let roster = StaticRoster::builtin();
    let players = arena_nexus::services::RosterSource::players(&roster).unwrap();

    let result = matcher.filter_and_score(&players, &valorant_viewer(), &FilterCriteria::default());

    assert_eq!(result.players.len(), 6);
    // NeonBlade: same game, rank and region, same role => 100 + 10 - 15, capped => 95
    assert_eq!(result.players[0].gamer_tag, "NeonBlade");
    assert_eq!(result.players[0].match_score, Some(95));
    // VoidWalker: Immortal is 4 tiers above Diamond, other region => 80
    assert_eq!(result.players[1].gamer_tag, "VoidWalker");
    assert_eq!(result.players[1].match_score, Some(80));
    // Everyone else plays another game; ties keep roster order
    let rest: Vec<_> = result.players[2..].iter().map(|p| p.gamer_tag.as_str()).collect();
    assert_eq!(rest, vec!["PixelWarrior", "StormRider", "ShadowBeast", "FrostGiant"]);
    assert!(result.players[2..].iter().all(|p| p.match_score == Some(0)));
}

#[actix_web::test]
async fn test_search_endpoint_filters_and_scores() {
    let (state, _) = create_state(Some(valorant_viewer()));
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/players/search")
        .set_json(json!({
            "sessionId": "tab-1",
            "searchQuery": "VALO",
            "gameFilter": "All Games",
            "regionFilter": "All Regions",
            "lookingForTeammateOnly": true
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let players = body["players"].as_array().unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0]["gamerTag"], "NeonBlade");
    assert_eq!(players[0]["matchScore"], 95);
    assert_eq!(players[0]["matchTier"], "Perfect Match");
    assert_eq!(body["noResults"], false);
    assert_eq!(body["totalCandidates"], 6);
}

#[actix_web::test]
async fn test_search_with_no_results() {
    let (state, _) = create_state(Some(valorant_viewer()));
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/players/search")
        .set_json(json!({
            "sessionId": "tab-1",
            "gameFilter": "Overwatch"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["noResults"], true);
    assert!(body["players"].as_array().unwrap().is_empty());
    assert!(body["message"].as_str().unwrap().starts_with("No players found"));
}

#[actix_web::test]
async fn test_search_without_profile_scores_zero() {
    let (state, _) = create_state(None);
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/players/search")
        .set_json(json!({ "sessionId": "tab-1" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let players = body["players"].as_array().unwrap();
    assert_eq!(players.len(), 6);
    assert!(players.iter().all(|p| p["matchScore"] == 0));
}

#[actix_web::test]
async fn test_search_requires_session() {
    let (state, _) = create_state(Some(valorant_viewer()));
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/players/search")
        .set_json(json!({ "sessionId": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_malformed_json_is_rejected() {
    let (state, _) = create_state(Some(valorant_viewer()));
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/players/search")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}

#[actix_web::test]
async fn test_match_request_sent_once_per_session() {
    let (state, _) = create_state(Some(valorant_viewer()));
    let app = init_app!(state);

    let send = |session: &str| {
        test::TestRequest::post()
            .uri("/api/v1/players/1/request")
            .set_json(json!({ "sessionId": session }))
            .to_request()
    };

    let resp = test::call_service(&app, send("tab-1")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, send("tab-1")).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // A different session starts with a clean ledger
    let resp = test::call_service(&app, send("tab-2")).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_search_marks_requested_players() {
    let (state, _) = create_state(Some(valorant_viewer()));
    let app = init_app!(state);

    let search = || {
        test::TestRequest::post()
            .uri("/api/v1/players/search")
            .set_json(json!({ "sessionId": "tab-1", "gameFilter": "Valorant" }))
            .to_request()
    };

    let body: Value = test::call_and_read_body_json(&app, search()).await;
    assert_eq!(body["players"][0]["gamerTag"], "NeonBlade");
    assert_eq!(body["players"][0]["requestSent"], false);

    let req = test::TestRequest::post()
        .uri("/api/v1/players/1/request")
        .set_json(json!({ "sessionId": "tab-1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::call_and_read_body_json(&app, search()).await;
    assert_eq!(body["players"][0]["requestSent"], true);
    assert_eq!(body["players"][1]["gamerTag"], "VoidWalker");
    assert_eq!(body["players"][1]["requestSent"], false);
}

#[actix_web::test]
async fn test_match_request_to_unknown_player() {
    let (state, _) = create_state(Some(valorant_viewer()));
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/players/404/request")
        .set_json(json!({ "sessionId": "tab-1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_profile_setup_saves_viewer() {
    let existing = PlayerProfile {
        id: "me".to_string(),
        gamer_tag: "Rookie".to_string(),
        ..Default::default()
    };
    let (state, profiles) = create_state(Some(existing));
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/profile/setup")
        .set_json(json!({
            "game": "Overwatch",
            "rank": "Master",
            "role": "Tank",
            "region": "EU",
            "bio": "Main tank, shotcaller",
            "lookingForTeammate": true
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let saved = profiles.load().unwrap().unwrap();
    assert_eq!(saved.id, "me");
    assert_eq!(saved.gamer_tag, "Rookie");
    assert_eq!(saved.game, "Overwatch");
    assert!(saved.profile_setup_completed);

    let req = test::TestRequest::get().uri("/api/v1/profile").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["rank"], "Master");
}

#[actix_web::test]
async fn test_profile_setup_requires_gamer_tag_for_new_profile() {
    let (state, profiles) = create_state(None);
    let app = init_app!(state);

    let setup = |body: Value| {
        test::TestRequest::post()
            .uri("/api/v1/profile/setup")
            .set_json(body)
            .to_request()
    };
    let form = json!({
        "game": "Valorant",
        "rank": "Gold",
        "role": "Sentinel",
        "region": "NA"
    });

    let resp = test::call_service(&app, setup(form.clone())).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Gamer tag is required");
    assert!(profiles.load().unwrap().is_none());

    let mut tagged = form;
    tagged["gamerTag"] = json!("Sentry");
    let resp = test::call_service(&app, setup(tagged)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let saved = profiles.load().unwrap().unwrap();
    assert_eq!(saved.gamer_tag, "Sentry");
    assert!(!saved.id.is_empty());
}

#[actix_web::test]
async fn test_profile_edit_and_delete() {
    let stored = PlayerProfile {
        profile_setup_completed: true,
        ..valorant_viewer()
    };
    let (state, profiles) = create_state(Some(stored));
    let app = init_app!(state);

    let edit = |body: Value| {
        test::TestRequest::put()
            .uri("/api/v1/profile")
            .set_json(body)
            .to_request()
    };

    // Too short a tag never reaches the store
    let resp = test::call_service(&app, edit(json!({ "gamerTag": "ab", "game": "Valorant" }))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(profiles.load().unwrap().unwrap().gamer_tag, "Viewer");

    let resp = test::call_service(
        &app,
        edit(json!({
            "gamerTag": "TankMain",
            "game": "Overwatch",
            "rank": "Diamond",
            "role": "Duelist",
            "region": "EU",
            "bio": "Switched games",
            "lookingForTeammate": true
        })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["gamerTag"], "TankMain");
    assert_eq!(body["rank"], "Diamond");
    // Duelist is not an Overwatch role, so the old pick is dropped
    assert_eq!(body["role"], "");

    let saved = profiles.load().unwrap().unwrap();
    assert_eq!(saved.id, "me");
    assert_eq!(saved.game, "Overwatch");

    let req = test::TestRequest::delete().uri("/api/v1/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(profiles.load().unwrap().is_none());

    let req = test::TestRequest::get().uri("/api/v1/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(&app, edit(json!({ "gamerTag": "TankMain" }))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_profile_setup_rejects_missing_step() {
    let (state, profiles) = create_state(None);
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/profile/setup")
        .set_json(json!({ "game": "Valorant", "rank": "Gold" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Please select your role to continue");
    assert!(profiles.load().unwrap().is_none());
}

#[actix_web::test]
async fn test_profile_setup_rejects_long_bio() {
    let (state, _) = create_state(None);
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/profile/setup")
        .set_json(json!({
            "game": "Valorant",
            "rank": "Gold",
            "role": "Sentinel",
            "region": "NA",
            "bio": "a".repeat(281)
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_missing_profile_is_not_found() {
    let (state, _) = create_state(None);
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/profile").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_catalog_lists_filters() {
    let (state, _) = create_state(None);
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/catalog").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["gameFilters"][0], "All Games");
    assert_eq!(body["regionFilters"][0], "All Regions");
    assert_eq!(body["ranks"]["Valorant"][7], "Radiant");
}

#[actix_web::test]
async fn test_conversation_flow() {
    let (state, _) = create_state(None);
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/conversations?search=neon")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["unreadCount"], 1);

    let req = test::TestRequest::post()
        .uri("/api/v1/conversations/1/read")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["unreadCount"], 0);
    assert_eq!(body["lastMessage"]["isRead"], true);

    let req = test::TestRequest::post()
        .uri("/api/v1/conversations/1/messages")
        .set_json(json!({ "content": "Sure, 9pm?" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/v1/conversations/1/messages")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let thread = body.as_array().unwrap();
    assert_eq!(thread.len(), 7);
    assert_eq!(thread[6]["content"], "Sure, 9pm?");
    assert_eq!(thread[6]["senderId"], "current-user");
}

#[actix_web::test]
async fn test_unknown_conversation() {
    let (state, _) = create_state(None);
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/conversations/99/messages")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_assistant_simulated_reply() {
    let (state, _) = create_state(None);
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/assistant/reply")
        .set_json(json!({ "prompt": "what rank do I need?" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["simulated"], true);
    assert!(body["reply"].as_str().unwrap().starts_with("Ranks are important"));
}
