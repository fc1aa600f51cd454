use serde::{Deserialize, Serialize};

use crate::models::domain::{MatchTier, PlayerProfile};

/// One entry of the player grid
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerCard {
    #[serde(flatten)]
    pub player: PlayerProfile,
    pub match_tier: MatchTier,
    /// This session already sent the player a match request
    pub request_sent: bool,
}

impl PlayerCard {
    pub fn new(player: PlayerProfile, request_sent: bool) -> Self {
        let match_tier = MatchTier::from_score(player.match_score);
        Self {
            player,
            match_tier,
            request_sent,
        }
    }
}

/// Response for the player search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPlayersResponse {
    pub players: Vec<PlayerCard>,
    pub total_candidates: usize,
    pub no_results: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Returned when a newer search from the same session won
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupersededResponse {
    pub superseded: bool,
}

/// Response for a match request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequestResponse {
    pub success: bool,
    pub player_id: String,
    pub message: String,
}

/// Response for the assistant endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub reply: String,
    pub simulated: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
