// Core algorithm exports
pub mod catalog;
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod setup;

pub use catalog::{ranks_for, roles_for, tier_index, GAMES, RANK_LADDER, REGIONS};
pub use filters::{matches_criteria, matches_game, matches_region, matches_search, matches_teammate_toggle};
pub use matcher::{MatchResult, Matcher};
pub use scoring::calculate_match_score;
pub use setup::{apply_edit, check_gamer_tag, ProfileSetup, SetupError, SetupStep};
