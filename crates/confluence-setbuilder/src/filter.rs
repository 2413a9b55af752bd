use std::collections::HashSet;

use confluence_core::{AlgorithmProfile, InversionSet, ObservedReaches, Reach, ReferenceDb};

/// Phase E (part 1): when `profile.min_reaches == 1`, every observed river
/// reach not already covered by a surviving set gets its own singleton.
/// Profiles requiring more than one reach per set have no use for singleton
/// completion, since a bare singleton could never clear the size filter.
pub fn complete_singletons(
    mut sets: Vec<InversionSet>,
    db: &ReferenceDb,
    observed: &ObservedReaches,
    profile: &AlgorithmProfile,
) -> Vec<InversionSet> {
    if profile.min_reaches != 1 {
        return sets;
    }

    let covered: HashSet<i64> = sets.iter().flat_map(|s| s.members.iter().copied()).collect();

    for reach_id in observed.sorted() {
        if covered.contains(&reach_id) {
            continue;
        }
        let Ok(reach) = db.lookup(reach_id) else {
            continue;
        };
        if !reach.is_river() {
            continue;
        }
        sets.push(InversionSet::singleton(reach.clone()));
    }

    sets
}

/// Phase E (part 2): drop any set containing a non-river member.
pub fn drop_non_river_sets(sets: Vec<InversionSet>) -> Vec<InversionSet> {
    sets.into_iter()
        .filter(|s| s.reaches.iter().all(Reach::is_river))
        .collect()
}

/// Phase E (part 3): drop sets below the profile's minimum size, then drop
/// any surviving singleton whose sole member is also covered by a larger
/// surviving set (a singleton only earns its place when it is the sole
/// coverage for that reach).
pub fn drop_undersized_sets(sets: Vec<InversionSet>, profile: &AlgorithmProfile) -> Vec<InversionSet> {
    let sized: Vec<InversionSet> = sets.into_iter().filter(|s| s.len() >= profile.min_reaches).collect();

    let covered_by_non_singleton: HashSet<i64> = sized
        .iter()
        .filter(|s| s.len() > 1)
        .flat_map(|s| s.members.iter().copied())
        .collect();

    sized
        .into_iter()
        .filter(|s| s.len() > 1 || !covered_by_non_singleton.contains(&s.seed))
        .collect()
}
