//! Five-phase construction of inversion sets from a reference database and
//! an observed-reach population, per one `AlgorithmProfile` at a time.
//!
//! A: per-seed linear expansion (upstream and downstream).
//! B: the admissibility predicate gating each hop.
//! C: canonical upstream-first ordering, then dedup by member multiset.
//! D: iterative pairwise overlap pruning.
//! E: singleton completion, non-river filtering, small-set filtering.

pub mod admissibility;
pub mod canonical;
pub mod expansion;
pub mod filter;
pub mod overlap;

use std::sync::atomic::{AtomicBool, Ordering};

use confluence_core::{AlgorithmProfile, InversionSet, ObservedReaches, ReferenceDb};

/// Runs phases A through E for one profile over the full observed population.
///
/// Seeds are every observed reach, visited in ascending id order for
/// determinism; reaches already swallowed by an earlier seed's expansion are
/// not re-seeded independently; the dedup in phase C then removes any
/// remaining near-duplicate sets across seeds.
pub fn build_for(db: &ReferenceDb, observed: &ObservedReaches, profile: &AlgorithmProfile) -> Vec<InversionSet> {
    build_for_cancellable(db, observed, profile, &AtomicBool::new(false))
}

/// Same as [`build_for`], but checked for cancellation between each phase.
/// Expansion, being per-seed, is also checked between seeds rather than only
/// at the phase boundary, since it is the only phase whose cost scales with
/// the observed population rather than the (much smaller) working-set count.
pub fn build_for_cancellable(
    db: &ReferenceDb,
    observed: &ObservedReaches,
    profile: &AlgorithmProfile,
    cancelled: &AtomicBool,
) -> Vec<InversionSet> {
    let span = tracing::info_span!("build_for", profile = %profile.name);
    let _guard = span.enter();

    let mut working_sets = Vec::new();
    for seed_id in observed.sorted() {
        if cancelled.load(Ordering::Relaxed) {
            tracing::warn!("set building cancelled during phase A expansion");
            return Vec::new();
        }
        if let Some(ws) = expansion::expand_from_seed(db, seed_id, profile, observed, true) {
            working_sets.push(ws);
        }
    }

    if cancelled.load(Ordering::Relaxed) {
        tracing::warn!("set building cancelled before phase C");
        return Vec::new();
    }
    let canonical_sets: Vec<InversionSet> = working_sets.iter().map(canonical::canonicalize).collect();
    let deduped = canonical::deduplicate(canonical_sets);

    if cancelled.load(Ordering::Relaxed) {
        tracing::warn!("set building cancelled before phase D");
        return Vec::new();
    }
    let pruned = overlap::prune_overlap(deduped, profile);

    if cancelled.load(Ordering::Relaxed) {
        tracing::warn!("set building cancelled before phase E");
        return Vec::new();
    }
    let completed = filter::complete_singletons(pruned, db, observed, profile);
    let river_only = filter::drop_non_river_sets(completed);
    let sized = filter::drop_undersized_sets(river_only, profile);

    tracing::info!(sets = sized.len(), "inversion sets built");
    sized
}

#[cfg(test)]
mod tests {
    use super::*;
    use confluence_core::Reach;

    fn reach(id: i64, facc: f64, up: Vec<i64>, down: Vec<i64>) -> Reach {
        Reach {
            reach_id: id,
            facc,
            n_up: up.len() as u8,
            n_down: down.len() as u8,
            up_ids: up,
            down_ids: down,
            swot_obs: 1,
            swot_orbits: vec![1],
        }
    }

    /// Scenario 1 from the design notes: a clean linear chain of five river
    /// reaches, all observed, all sharing one orbit. MetroMan's expansion cap
    /// of two hops each direction means only the chain's middle seed reaches
    /// every member; MetroMan disables overlap pruning, so the shorter sets
    /// produced by the other qualifying seeds survive alongside it.
    #[test]
    fn linear_chain_yields_full_length_set_from_the_middle_seed() {
        let reaches = vec![
            reach(74_100_000_011, 100.0, vec![], vec![74_100_000_021]),
            reach(74_100_000_021, 105.0, vec![74_100_000_011], vec![74_100_000_031]),
            reach(74_100_000_031, 110.0, vec![74_100_000_021], vec![74_100_000_041]),
            reach(74_100_000_041, 115.0, vec![74_100_000_031], vec![74_100_000_051]),
            reach(74_100_000_051, 120.0, vec![74_100_000_041], vec![]),
        ];
        let ids: Vec<i64> = reaches.iter().map(|r| r.reach_id).collect();
        let db = ReferenceDb::new(reaches, vec![]);
        let observed = ObservedReaches::new(ids);
        let profile = AlgorithmProfile::metro_man();

        let sets = build_for(&db, &observed, &profile);
        assert!(sets.iter().any(|s| s.len() == 5 && s.seed == 74_100_000_031));
        assert!(sets.iter().all(|s| s.len() >= profile.min_reaches));
    }

    /// Scenario 6: a mutual two-reach cycle never infinite-loops and, being
    /// smaller than MetroMan's minimum of 3, is filtered out entirely.
    #[test]
    fn pathological_cycle_produces_no_sets_under_metro_man() {
        let reaches = vec![
            reach(74_100_000_011, 100.0, vec![74_100_000_021], vec![74_100_000_021]),
            reach(74_100_000_021, 100.0, vec![74_100_000_011], vec![74_100_000_011]),
        ];
        let ids: Vec<i64> = reaches.iter().map(|r| r.reach_id).collect();
        let db = ReferenceDb::new(reaches, vec![]);
        let observed = ObservedReaches::new(ids);
        let profile = AlgorithmProfile::metro_man();

        let sets = build_for(&db, &observed, &profile);
        assert!(sets.is_empty());
    }
}
