//! Arena Nexus - teammate matchmaking service for Cyber Arena Nexus
//!
//! This library provides the player filter and match-scoring pipeline used by
//! the player browser, plus the mocked collaborators around it (viewer profile
//! store, roster, browse sessions, chat and the gaming assistant).

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{calculate_match_score, MatchResult, Matcher};
pub use models::{FilterCriteria, GameFilter, MatchTier, PlayerProfile, RegionFilter, ScoringRules};
