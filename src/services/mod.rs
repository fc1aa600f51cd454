// Service exports
pub mod assistant;
pub mod conversations;
pub mod profile_store;
pub mod roster;
pub mod sessions;

pub use assistant::{AssistantClient, AssistantConfig, AssistantError, AssistantReply};
pub use conversations::{ConversationError, ConversationStore};
pub use profile_store::{JsonFileProfileStore, MemoryProfileStore, ProfileStore, ProfileStoreError};
pub use roster::{RosterError, RosterSource, StaticRoster};
pub use sessions::{MatchRequestLedger, SearchCoordinator, SearchOutcome, Session, SessionError, SessionRegistry};
