use crate::models::PlayerProfile;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a roster
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid roster file: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Supplier of candidate players
pub trait RosterSource: Send + Sync {
    fn players(&self) -> Result<Vec<PlayerProfile>, RosterError>;

    fn contains(&self, player_id: &str) -> Result<bool, RosterError> {
        Ok(self.players()?.iter().any(|p| p.id == player_id))
    }
}

/// Fixed in-memory roster
#[derive(Debug, Clone)]
pub struct StaticRoster {
    players: Vec<PlayerProfile>,
}

impl StaticRoster {
    pub fn new(players: Vec<PlayerProfile>) -> Self {
        Self { players }
    }

    /// Roster read from a JSON array of profiles
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, RosterError> {
        let raw = std::fs::read_to_string(path)?;
        let players: Vec<PlayerProfile> = serde_json::from_str(&raw)?;
        Ok(Self::new(players))
    }

    /// The built-in demo roster
    pub fn builtin() -> Self {
        Self::new(vec![
            mock_player(
                "1",
                "NeonBlade",
                "Valorant",
                "Diamond",
                "Duelist",
                "NA",
                "Competitive Valorant player looking for a team to grind ranked with. I main Jett and Reyna.",
                "2 mins ago",
            ),
            mock_player(
                "2",
                "PixelWarrior",
                "Apex Legends",
                "Master",
                "Assault",
                "EU",
                "Day 1 Apex player with multiple 20 bombs. Looking for consistent squad to push Predator.",
                "5 mins ago",
            ),
            mock_player(
                "3",
                "StormRider",
                "League of Legends",
                "Platinum",
                "Mid",
                "NA",
                "Mid main since season 3. Looking for clash team and duo partner.",
                "20 mins ago",
            ),
            mock_player(
                "4",
                "ShadowBeast",
                "CS:GO",
                "Legendary Eagle",
                "AWPer",
                "EU",
                "AWPer with 10+ years of experience. Looking for serious team to compete in tournaments.",
                "1 hour ago",
            ),
            mock_player(
                "5",
                "VoidWalker",
                "Valorant",
                "Immortal",
                "Controller",
                "ASIA",
                "Viper/Brimstone main with great utility usage. Looking for a team to climb ranked.",
                "3 hours ago",
            ),
            mock_player(
                "6",
                "FrostGiant",
                "Dota 2",
                "Ancient",
                "Hard Support",
                "NA",
                "Position 5 player who loves warding and saving carries. Looking for a stack to grind MMR.",
                "5 hours ago",
            ),
        ])
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl Default for StaticRoster {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RosterSource for StaticRoster {
    fn players(&self) -> Result<Vec<PlayerProfile>, RosterError> {
        Ok(self.players.clone())
    }
}

#[allow(clippy::too_many_arguments)]
fn mock_player(
    id: &str,
    gamer_tag: &str,
    game: &str,
    rank: &str,
    role: &str,
    region: &str,
    bio: &str,
    last_active: &str,
) -> PlayerProfile {
    PlayerProfile {
        id: id.to_string(),
        gamer_tag: gamer_tag.to_string(),
        game: game.to_string(),
        rank: rank.to_string(),
        role: role.to_string(),
        region: region.to_string(),
        bio: bio.to_string(),
        looking_for_teammate: true,
        last_active: last_active.to_string(),
        match_score: None,
        profile_setup_completed: true,
    }
}
