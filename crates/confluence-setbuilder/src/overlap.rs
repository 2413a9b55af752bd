use std::collections::HashSet;

use confluence_core::{AlgorithmProfile, InversionSet};

/// Overlap between two member lists, as a fraction of their average size:
/// `|A∩B| / ((|A|+|B|)/2)`.
fn overlap_fraction(a: &InversionSet, b: &InversionSet) -> f64 {
    let a_members: HashSet<_> = a.members.iter().collect();
    let b_members: HashSet<_> = b.members.iter().collect();
    let shared = a_members.intersection(&b_members).count();
    let average = (a.members.len() + b.members.len()) as f64 / 2.0;
    if average == 0.0 {
        return 0.0;
    }
    shared as f64 / average
}

/// Phase D: iteratively drop the larger-seed-id set out of any pair whose
/// overlap exceeds `profile.allowed_reach_overlap`, until a full pass removes
/// nothing. A no-op when the profile has overlap pruning disabled.
///
/// Capped at 10,000 passes as a backstop against a pathological input that
/// never converges; in practice a pass only ever shrinks the working set.
pub fn prune_overlap(mut sets: Vec<InversionSet>, profile: &AlgorithmProfile) -> Vec<InversionSet> {
    if !profile.overlap_pruning_enabled() {
        return sets;
    }

    sets.sort_by_key(|s| s.seed);

    for _ in 0..10_000 {
        let mut drop_seed = None;
        'pairs: for i in 0..sets.len() {
            for j in (i + 1)..sets.len() {
                let (a, b) = (&sets[i], &sets[j]);
                debug_assert!(a.seed < b.seed);
                if overlap_fraction(a, b) > profile.allowed_reach_overlap {
                    drop_seed = Some(b.seed);
                    break 'pairs;
                }
            }
        }

        match drop_seed {
            Some(seed) => sets.retain(|s| s.seed != seed),
            None => break,
        }
    }

    sets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(seed: i64, members: Vec<i64>) -> InversionSet {
        InversionSet {
            seed,
            upstream_terminus: *members.first().unwrap(),
            downstream_terminus: *members.last().unwrap(),
            members,
            reaches: vec![],
        }
    }

    #[test]
    fn disabled_profile_leaves_sets_untouched() {
        let sets = vec![set(1, vec![1, 2, 3]), set(2, vec![2, 3, 4])];
        let profile = AlgorithmProfile::metro_man();
        assert_eq!(prune_overlap(sets.clone(), &profile).len(), 2);
    }

    #[test]
    fn high_overlap_drops_the_larger_seed_id() {
        let sets = vec![set(1, vec![1, 2, 3]), set(5, vec![2, 3, 4])];
        let mut profile = AlgorithmProfile::hivdi();
        profile.allowed_reach_overlap = 0.5;
        let result = prune_overlap(sets, &profile);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].seed, 1);
    }

    #[test]
    fn low_overlap_keeps_both_sets() {
        let sets = vec![set(1, vec![1, 2, 3, 4, 5]), set(2, vec![5, 6, 7, 8, 9])];
        let profile = AlgorithmProfile::sic();
        let result = prune_overlap(sets, &profile);
        assert_eq!(result.len(), 2);
    }

    /// Two shared members out of a 2-member and a 6-member set overlap 100%
    /// by the smaller-set denominator but only 50% by the spec's averaged
    /// one; at a 0.6 threshold the averaged formula must keep both sets.
    #[test]
    fn differently_sized_sets_use_the_average_not_the_smaller_size() {
        let sets = vec![set(1, vec![1, 2]), set(2, vec![1, 2, 3, 4, 5, 6])];
        let mut profile = AlgorithmProfile::hivdi();
        profile.allowed_reach_overlap = 0.6;
        let result = prune_overlap(sets, &profile);
        assert_eq!(result.len(), 2);
    }
}
