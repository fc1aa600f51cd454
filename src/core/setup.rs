use thiserror::Error;

use crate::core::catalog::{is_known_game, is_known_region, ranks_for, roles_for};
use crate::models::{PlayerProfile, ProfileSetupRequest, ProfileUpdateRequest};

/// Maximum bio length accepted at the edit boundary
pub const MAX_BIO_CHARS: usize = 280;

pub const MIN_GAMER_TAG_CHARS: usize = 3;

/// Errors raised while walking the profile setup wizard
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("Please select a game to continue")]
    MissingGame,

    #[error("Please select your rank to continue")]
    MissingRank,

    #[error("Please select your role to continue")]
    MissingRole,

    #[error("Please select your region to continue")]
    MissingRegion,

    #[error("Unknown game: {0}")]
    UnknownGame(String),

    #[error("{rank} is not a rank in {game}")]
    UnknownRank { game: String, rank: String },

    #[error("{role} is not a role in {game}")]
    UnknownRole { game: String, role: String },

    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Bio must be at most 280 characters")]
    BioTooLong,

    #[error("Profile setup is not finished")]
    Incomplete,

    #[error("Gamer tag is required")]
    MissingGamerTag,

    #[error("Gamer tag must be at least 3 characters")]
    GamerTagTooShort,
}

/// Trimmed gamer tag, rejecting blank or too-short ones
pub fn check_gamer_tag(tag: &str) -> Result<String, SetupError> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(SetupError::MissingGamerTag);
    }
    if tag.chars().count() < MIN_GAMER_TAG_CHARS {
        return Err(SetupError::GamerTagTooShort);
    }
    Ok(tag.to_string())
}

/// Apply a settings edit to the stored profile
///
/// Rank, role and region may be left blank. Switching games drops a stored
/// rank or role that the new game does not have; any other rank or role has
/// to belong to the chosen game.
pub fn apply_edit(base: &PlayerProfile, req: &ProfileUpdateRequest) -> Result<PlayerProfile, SetupError> {
    let gamer_tag = check_gamer_tag(&req.gamer_tag)?;

    let mut edit = ProfileSetup::new();
    if is_known_game(&base.game) {
        edit.game = base.game.clone();
    }

    if !req.game.is_empty() {
        edit.select_game(&req.game)?;
    } else {
        edit.game.clear();
    }
    let game_changed = edit.game != base.game;

    if !req.rank.is_empty() {
        let dropped =
            game_changed && req.rank == base.rank && !ranks_for(&edit.game).contains(&req.rank.as_str());
        if !dropped {
            edit.select_rank(&req.rank)?;
        }
    }
    if !req.role.is_empty() {
        let dropped =
            game_changed && req.role == base.role && !roles_for(&edit.game).contains(&req.role.as_str());
        if !dropped {
            edit.select_role(&req.role)?;
        }
    }
    if !req.region.is_empty() {
        edit.select_region(&req.region)?;
    }
    edit.set_details(&req.bio, req.looking_for_teammate)?;

    Ok(PlayerProfile {
        gamer_tag,
        game: edit.game,
        rank: edit.rank,
        role: edit.role,
        region: edit.region,
        bio: edit.bio,
        looking_for_teammate: edit.looking_for_teammate,
        match_score: None,
        ..base.clone()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SetupStep {
    Game,
    Rank,
    Role,
    Region,
    Details,
}

/// Five-step profile setup wizard
#[derive(Debug, Clone)]
pub struct ProfileSetup {
    step: SetupStep,
    game: String,
    rank: String,
    role: String,
    region: String,
    bio: String,
    looking_for_teammate: bool,
    completed: bool,
}

impl Default for ProfileSetup {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileSetup {
    pub fn new() -> Self {
        Self {
            step: SetupStep::Game,
            game: String::new(),
            rank: String::new(),
            role: String::new(),
            region: String::new(),
            bio: String::new(),
            looking_for_teammate: false,
            completed: false,
        }
    }

    pub fn step(&self) -> SetupStep {
        self.step
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Choosing another game invalidates the rank and role picks
    pub fn select_game(&mut self, game: &str) -> Result<(), SetupError> {
        if !is_known_game(game) {
            return Err(SetupError::UnknownGame(game.to_string()));
        }
        if self.game != game {
            self.rank.clear();
            self.role.clear();
        }
        self.game = game.to_string();
        Ok(())
    }

    pub fn select_rank(&mut self, rank: &str) -> Result<(), SetupError> {
        if !ranks_for(&self.game).contains(&rank) {
            return Err(SetupError::UnknownRank {
                game: self.game.clone(),
                rank: rank.to_string(),
            });
        }
        self.rank = rank.to_string();
        Ok(())
    }

    pub fn select_role(&mut self, role: &str) -> Result<(), SetupError> {
        if !roles_for(&self.game).contains(&role) {
            return Err(SetupError::UnknownRole {
                game: self.game.clone(),
                role: role.to_string(),
            });
        }
        self.role = role.to_string();
        Ok(())
    }

    pub fn select_region(&mut self, region: &str) -> Result<(), SetupError> {
        if !is_known_region(region) {
            return Err(SetupError::UnknownRegion(region.to_string()));
        }
        self.region = region.to_string();
        Ok(())
    }

    pub fn set_details(&mut self, bio: &str, looking_for_teammate: bool) -> Result<(), SetupError> {
        if bio.chars().count() > MAX_BIO_CHARS {
            return Err(SetupError::BioTooLong);
        }
        self.bio = bio.to_string();
        self.looking_for_teammate = looking_for_teammate;
        Ok(())
    }

    /// Advance one step, or finish when on the last one
    pub fn next(&mut self) -> Result<SetupStep, SetupError> {
        self.step = match self.step {
            SetupStep::Game if self.game.is_empty() => return Err(SetupError::MissingGame),
            SetupStep::Game => SetupStep::Rank,
            SetupStep::Rank if self.rank.is_empty() => return Err(SetupError::MissingRank),
            SetupStep::Rank => SetupStep::Role,
            SetupStep::Role if self.role.is_empty() => return Err(SetupError::MissingRole),
            SetupStep::Role => SetupStep::Region,
            SetupStep::Region if self.region.is_empty() => return Err(SetupError::MissingRegion),
            SetupStep::Region => SetupStep::Details,
            SetupStep::Details => {
                self.completed = true;
                SetupStep::Details
            }
        };
        Ok(self.step)
    }

    pub fn back(&mut self) -> SetupStep {
        self.step = match self.step {
            SetupStep::Game | SetupStep::Rank => SetupStep::Game,
            SetupStep::Role => SetupStep::Rank,
            SetupStep::Region => SetupStep::Role,
            SetupStep::Details => SetupStep::Region,
        };
        self.step
    }

    /// Merge the wizard answers into an existing profile, keeping its identity
    pub fn apply_to(&self, base: &PlayerProfile) -> Result<PlayerProfile, SetupError> {
        if !self.completed {
            return Err(SetupError::Incomplete);
        }

        Ok(PlayerProfile {
            game: self.game.clone(),
            rank: self.rank.clone(),
            role: self.role.clone(),
            region: self.region.clone(),
            bio: self.bio.clone(),
            looking_for_teammate: self.looking_for_teammate,
            profile_setup_completed: true,
            match_score: None,
            ..base.clone()
        })
    }

    /// Replay a whole form submission through the wizard
    pub fn from_request(req: &ProfileSetupRequest) -> Result<Self, SetupError> {
        let mut wizard = Self::new();

        if !req.game.is_empty() {
            wizard.select_game(&req.game)?;
        }
        wizard.next()?;
        if !req.rank.is_empty() {
            wizard.select_rank(&req.rank)?;
        }
        wizard.next()?;
        if !req.role.is_empty() {
            wizard.select_role(&req.role)?;
        }
        wizard.next()?;
        if !req.region.is_empty() {
            wizard.select_region(&req.region)?;
        }
        wizard.next()?;
        wizard.set_details(&req.bio, req.looking_for_teammate)?;
        wizard.next()?;

        Ok(wizard)
    }
}
