use crate::models::{FilterCriteria, GameFilter, PlayerProfile, RegionFilter};

/// Stage 1: case-insensitive substring match on tag, game, rank or role
///
/// An empty query keeps everyone.
#[inline]
pub fn matches_search(profile: &PlayerProfile, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();

    [
        &profile.gamer_tag,
        &profile.game,
        &profile.rank,
        &profile.role,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Stage 2: exact, case-sensitive game match
#[inline]
pub fn matches_game(profile: &PlayerProfile, filter: &GameFilter) -> bool {
    match filter {
        GameFilter::All => true,
        GameFilter::Only(game) => profile.game == *game,
    }
}

/// Stage 3: exact, case-sensitive region match
#[inline]
pub fn matches_region(profile: &PlayerProfile, filter: &RegionFilter) -> bool {
    match filter {
        RegionFilter::All => true,
        RegionFilter::Only(region) => profile.region == *region,
    }
}

/// Stage 4: "looking for teammate" toggle
#[inline]
pub fn matches_teammate_toggle(profile: &PlayerProfile, only_looking: bool) -> bool {
    !only_looking || profile.looking_for_teammate
}

/// All four filter stages in order
#[inline]
pub fn matches_criteria(profile: &PlayerProfile, criteria: &FilterCriteria) -> bool {
    matches_search(profile, &criteria.search_query)
        && matches_game(profile, &criteria.game_filter)
        && matches_region(profile, &criteria.region_filter)
        && matches_teammate_toggle(profile, criteria.looking_for_teammate_only)
}
