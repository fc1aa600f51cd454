use crate::core::{filters::matches_criteria, scoring::calculate_match_score};
use crate::models::{FilterCriteria, PlayerProfile, ScoringRules};

/// Result of the matching process
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    pub players: Vec<PlayerProfile>,
    pub total_candidates: usize,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Main matching orchestrator - implements the filter and score pipeline
///
/// # Pipeline Stages
/// 1. Text search on tag, game, rank and role
/// 2. Game filter
/// 3. Region filter
/// 4. Looking-for-teammate toggle
/// 5. Scoring of the survivors
/// 6. Stable sort by score, descending
///
/// The roster and viewer are only read; results are annotated copies.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    rules: ScoringRules,
}

impl Matcher {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Filter the roster and rank the survivors against the viewer
    ///
    /// # Arguments
    /// * `roster` - Candidate players, in any order
    /// * `viewer` - The browsing user's profile, possibly incomplete
    /// * `criteria` - Current browse filters
    ///
    /// # Returns
    /// MatchResult with the scored survivors, best first
    pub fn filter_and_score(
        &self,
        roster: &[PlayerProfile],
        viewer: &PlayerProfile,
        criteria: &FilterCriteria,
    ) -> MatchResult {
        let total_candidates = roster.len();

        let mut players: Vec<PlayerProfile> = roster
            .iter()
            // Stages 1-4
            .filter(|candidate| matches_criteria(candidate, criteria))
            // Stage 5
            .map(|candidate| {
                let score = calculate_match_score(candidate, viewer, &self.rules);
                candidate.with_score(score)
            })
            .collect();

        tracing::debug!(
            "Filtered {} candidates down to {} for viewer {:?}",
            total_candidates,
            players.len(),
            viewer.id
        );

        // Stage 6: sort_by is stable, so ties keep roster order
        players.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        MatchResult {
            players,
            total_candidates,
        }
    }
}
