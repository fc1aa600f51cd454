use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{AssistantTurn, FilterCriteria};

/// Request to browse players
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchPlayersRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "session_id")]
    pub session_id: String,
    #[serde(flatten)]
    pub criteria: FilterCriteria,
}

/// Request to send a match request to a player
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "session_id")]
    pub session_id: String,
}

/// Profile setup wizard payload
///
/// `gamerTag` is only required when the stored profile has none yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileSetupRequest {
    #[validate(length(min = 3, max = 32))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamer_tag: Option<String>,
    pub game: String,
    pub rank: String,
    pub role: String,
    pub region: String,
    #[validate(length(max = 280))]
    pub bio: String,
    pub looking_for_teammate: bool,
}

/// Settings edit of the stored profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdateRequest {
    #[validate(length(min = 3, max = 32))]
    pub gamer_tag: String,
    pub game: String,
    pub rank: String,
    pub role: String,
    pub region: String,
    #[validate(length(max = 280))]
    pub bio: String,
    pub looking_for_teammate: bool,
}

/// Chat message to append to a conversation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

/// Query string for the conversation list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConversationQuery {
    pub search: String,
}

/// Prompt for the gaming assistant
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssistantRequest {
    #[validate(length(min = 1, max = 4000))]
    pub prompt: String,
    #[serde(default)]
    pub history: Vec<AssistantTurn>,
}
