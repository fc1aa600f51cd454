// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AssistantTurn, ChatMessage, Conversation, ConversationUser, FilterCriteria, GameFilter,
    LastMessage, MatchTier, MessageRole, PlayerProfile, RegionFilter, ScoringRules, ALL_GAMES,
    ALL_REGIONS, CURRENT_USER,
};
pub use requests::{
    AssistantRequest, ConversationQuery, ProfileSetupRequest, ProfileUpdateRequest, SearchPlayersRequest,
    SendMatchRequest, SendMessageRequest,
};
pub use responses::{
    AssistantResponse, ErrorResponse, HealthResponse, MatchRequestResponse, PlayerCard,
    SearchPlayersResponse, SupersededResponse,
};
