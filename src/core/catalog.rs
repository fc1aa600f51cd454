use crate::models::{ALL_GAMES, ALL_REGIONS};

/// Games a profile can be set up for
pub const GAMES: &[&str] = &[
    "League of Legends",
    "Valorant",
    "CS:GO",
    "Dota 2",
    "Overwatch",
    "Apex Legends",
    "Fortnite",
];

/// Region codes a profile can be set up for
pub const REGIONS: &[&str] = &["NA", "EU", "ASIA", "OCE", "LATAM", "BR"];

/// Shared, game-agnostic rank ladder used for proximity scoring (ascending)
pub const RANK_LADDER: &[&str] = &[
    "Iron",
    "Bronze",
    "Silver",
    "Gold",
    "Platinum",
    "Diamond",
    "Master",
    "Grandmaster",
    "Challenger",
    "Immortal",
    "Radiant",
];

/// Per-game rank lists (ordered) and role lists (unordered)
const GAME_TABLE: &[(&str, &[&str], &[&str])] = &[
    (
        "League of Legends",
        &[
            "Iron", "Bronze", "Silver", "Gold", "Platinum", "Diamond", "Master", "Grandmaster",
            "Challenger",
        ],
        &["Top", "Jungle", "Mid", "ADC", "Support"],
    ),
    (
        "Valorant",
        &["Iron", "Bronze", "Silver", "Gold", "Platinum", "Diamond", "Immortal", "Radiant"],
        &["Duelist", "Initiator", "Controller", "Sentinel"],
    ),
    (
        "CS:GO",
        &[
            "Silver I",
            "Silver II",
            "Gold Nova",
            "Master Guardian",
            "Legendary Eagle",
            "Supreme",
            "Global Elite",
        ],
        &["Entry Fragger", "AWPer", "Support", "In-game Leader", "Lurker"],
    ),
    (
        "Dota 2",
        &["Herald", "Guardian", "Crusader", "Archon", "Legend", "Ancient", "Divine", "Immortal"],
        &["Carry", "Midlane", "Offlane", "Soft Support", "Hard Support"],
    ),
    (
        "Overwatch",
        &["Bronze", "Silver", "Gold", "Platinum", "Diamond", "Master", "Grandmaster"],
        &["Tank", "Damage", "Support"],
    ),
    (
        "Apex Legends",
        &["Bronze", "Silver", "Gold", "Platinum", "Diamond", "Master", "Predator"],
        &["Assault", "Skirmisher", "Recon", "Controller", "Support"],
    ),
    (
        "Fortnite",
        &["Open League", "Contender League", "Champion League"],
        &["Builder", "Fragger", "IGL", "Support"],
    ),
];

/// Position of a rank on the shared ladder, `None` for game-specific names
#[inline]
pub fn tier_index(rank: &str) -> Option<usize> {
    RANK_LADDER.iter().position(|tier| *tier == rank)
}

/// Ranks for a game; unknown games have none
pub fn ranks_for(game: &str) -> &'static [&'static str] {
    GAME_TABLE
        .iter()
        .find(|(name, _, _)| *name == game)
        .map(|(_, ranks, _)| *ranks)
        .unwrap_or(&[])
}

/// Roles for a game; unknown games have none
pub fn roles_for(game: &str) -> &'static [&'static str] {
    GAME_TABLE
        .iter()
        .find(|(name, _, _)| *name == game)
        .map(|(_, _, roles)| *roles)
        .unwrap_or(&[])
}

pub fn is_known_game(game: &str) -> bool {
    GAMES.contains(&game)
}

pub fn is_known_region(region: &str) -> bool {
    REGIONS.contains(&region)
}

/// Options for the game dropdown, sentinel first
pub fn game_filter_options() -> Vec<&'static str> {
    std::iter::once(ALL_GAMES).chain(GAMES.iter().copied()).collect()
}

/// Options for the region dropdown, sentinel first
pub fn region_filter_options() -> Vec<&'static str> {
    std::iter::once(ALL_REGIONS).chain(REGIONS.iter().copied()).collect()
}
