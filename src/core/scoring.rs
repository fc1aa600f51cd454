use crate::core::catalog::tier_index;
use crate::models::{PlayerProfile, ScoringRules};

/// Calculate a compatibility score (0-100) for a candidate against the viewer
///
/// Scoring formula:
/// score = (
///     base                                   # 100
///     - tier_step_penalty * tier distance    # only when both ranks are on the ladder
///     + region_bonus                         # same non-empty region
///     - role_penalty                         # same non-empty role
/// )
///
/// Self-matches and players of a different (or unset) game score 0.
pub fn calculate_match_score(
    candidate: &PlayerProfile,
    viewer: &PlayerProfile,
    rules: &ScoringRules,
) -> u8 {
    if candidate.id == viewer.id {
        return 0;
    }

    if candidate.game.is_empty() || candidate.game != viewer.game {
        return 0;
    }

    let mut score = rules.base;

    if let Some(distance) = tier_distance(&candidate.rank, &viewer.rank) {
        score -= rules.tier_step_penalty * distance as i32;
    }

    if same_non_empty(&candidate.region, &viewer.region) {
        score += rules.region_bonus;
    }

    // Complementary roles make the better team
    if same_non_empty(&candidate.role, &viewer.role) {
        score -= rules.role_penalty;
    }

    let ceiling = if rules.cap_at_100 { 100 } else { u8::MAX as i32 };
    score.clamp(0, ceiling) as u8
}

/// Distance between two ranks on the shared ladder
#[inline]
fn tier_distance(a: &str, b: &str) -> Option<usize> {
    let a = tier_index(a)?;
    let b = tier_index(b)?;
    Some(a.abs_diff(b))
}

#[inline]
fn same_non_empty(a: &str, b: &str) -> bool {
    !a.is_empty() && a == b
}
