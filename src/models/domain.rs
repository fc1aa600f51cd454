use serde::{Deserialize, Serialize};

/// Sentinel shown in the game dropdown when no game filter is applied
pub const ALL_GAMES: &str = "All Games";

/// Sentinel shown in the region dropdown when no region filter is applied
pub const ALL_REGIONS: &str = "All Regions";

/// Player profile, used both for roster candidates and for the viewer
///
/// Every field is optional on the wire so a half-finished profile (a new
/// user who skipped setup) still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerProfile {
    pub id: String,
    pub gamer_tag: String,
    pub game: String,
    pub rank: String,
    pub role: String,
    pub region: String,
    pub bio: String,
    pub looking_for_teammate: bool,
    pub last_active: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u8>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub profile_setup_completed: bool,
}

impl PlayerProfile {
    /// Copy of this profile carrying a computed match score
    pub fn with_score(&self, score: u8) -> Self {
        Self {
            match_score: Some(score),
            ..self.clone()
        }
    }
}

/// Game dimension of the browse filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GameFilter {
    #[default]
    All,
    Only(String),
}

impl From<String> for GameFilter {
    fn from(value: String) -> Self {
        if value.is_empty() || value == ALL_GAMES {
            GameFilter::All
        } else {
            GameFilter::Only(value)
        }
    }
}

impl From<GameFilter> for String {
    fn from(value: GameFilter) -> Self {
        match value {
            GameFilter::All => ALL_GAMES.to_string(),
            GameFilter::Only(game) => game,
        }
    }
}

/// Region dimension of the browse filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RegionFilter {
    #[default]
    All,
    Only(String),
}

impl From<String> for RegionFilter {
    fn from(value: String) -> Self {
        if value.is_empty() || value == ALL_REGIONS {
            RegionFilter::All
        } else {
            RegionFilter::Only(value)
        }
    }
}

impl From<RegionFilter> for String {
    fn from(value: RegionFilter) -> Self {
        match value {
            RegionFilter::All => ALL_REGIONS.to_string(),
            RegionFilter::Only(region) => region,
        }
    }
}

/// Browse filters held by the calling UI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub search_query: String,
    pub game_filter: GameFilter,
    pub region_filter: RegionFilter,
    pub looking_for_teammate_only: bool,
}

/// Label shown next to a match score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchTier {
    #[serde(rename = "Perfect Match")]
    Perfect,
    #[serde(rename = "Great Match")]
    Great,
    #[serde(rename = "Good Match")]
    Good,
    #[serde(rename = "Fair Match")]
    Fair,
    #[serde(rename = "Poor Match")]
    Poor,
    #[serde(rename = "N/A")]
    Unscored,
}

impl MatchTier {
    pub fn from_score(score: Option<u8>) -> Self {
        match score {
            None => MatchTier::Unscored,
            Some(s) if s >= 90 => MatchTier::Perfect,
            Some(s) if s >= 75 => MatchTier::Great,
            Some(s) if s >= 50 => MatchTier::Good,
            Some(s) if s >= 25 => MatchTier::Fair,
            Some(_) => MatchTier::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchTier::Perfect => "Perfect Match",
            MatchTier::Great => "Great Match",
            MatchTier::Good => "Good Match",
            MatchTier::Fair => "Fair Match",
            MatchTier::Poor => "Poor Match",
            MatchTier::Unscored => "N/A",
        }
    }
}

/// Scoring constants
///
/// score = base
///     - tier_step_penalty * |tier(candidate) - tier(viewer)|
///     + region_bonus (same region)
///     - role_penalty (same role)
///
/// clamped to 0, and to 100 when `cap_at_100` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringRules {
    pub base: i32,
    pub tier_step_penalty: i32,
    pub region_bonus: i32,
    pub role_penalty: i32,
    pub cap_at_100: bool,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            base: 100,
            tier_step_penalty: 5,
            region_bonus: 10,
            role_penalty: 15,
            cap_at_100: true,
        }
    }
}

/// Sender id used for messages written by the local user
pub const CURRENT_USER: &str = "current-user";

/// Chat message inside a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub timestamp: String,
    pub sender_id: String,
}

/// The other side of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationUser {
    pub id: String,
    pub gamer_tag: String,
    pub last_active: String,
}

/// Preview of the most recent message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastMessage {
    pub content: String,
    pub timestamp: String,
    pub is_read: bool,
    pub sender_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub user: ConversationUser,
    pub last_message: LastMessage,
    pub unread_count: u32,
}

/// Speaker of an assistant history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantTurn {
    pub role: MessageRole,
    pub content: String,
}
