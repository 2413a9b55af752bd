use std::collections::{HashMap, HashSet};

use confluence_core::{AlgorithmProfile, Direction, ObservedReaches, Reach, ReachId, ReferenceDb};

use crate::admissibility::admissible;

/// Unordered accumulator for one seed's expansion (phases A/B). Canonical
/// upstream-first ordering is only computed afterward, in phase C.
#[derive(Debug, Clone)]
pub struct WorkingSet {
    pub seed: ReachId,
    pub upstream_terminus: ReachId,
    pub downstream_terminus: ReachId,
    pub members: HashSet<ReachId>,
    pub reaches: HashMap<ReachId, Reach>,
}

impl WorkingSet {
    fn singleton(seed: Reach) -> Self {
        let id = seed.reach_id;
        let mut reaches = HashMap::new();
        reaches.insert(id, seed);
        Self {
            seed: id,
            upstream_terminus: id,
            downstream_terminus: id,
            members: HashSet::from([id]),
            reaches,
        }
    }
}

/// Phase A: expand a single seed upstream then downstream, subject to the
/// phase-B admissibility predicate. Returns `None` if `seed_id` does not
/// resolve in the reference DB, or does not qualify as a seed (by default,
/// only reaches with exactly one upstream neighbor seed an expansion — see
/// the seed-selection asymmetry in the design notes).
pub fn expand_from_seed(
    db: &ReferenceDb,
    seed_id: ReachId,
    profile: &AlgorithmProfile,
    observed: &ObservedReaches,
    seed_requires_single_upstream: bool,
) -> Option<WorkingSet> {
    let seed = match db.lookup(seed_id) {
        Ok(r) => r.clone(),
        Err(_) => {
            tracing::warn!(reach_id = seed_id, "seed not present in reference DB, skipping");
            return None;
        }
    };

    if seed_requires_single_upstream && seed.n_up != 1 {
        return None;
    }

    let mut set = WorkingSet::singleton(seed.clone());

    walk(
        db,
        &seed,
        &mut set,
        Direction::Up,
        profile,
        observed,
    );
    walk(
        db,
        &seed,
        &mut set,
        Direction::Down,
        profile,
        observed,
    );

    Some(set)
}

/// Repeatedly hop from the current terminus in `direction`, appending
/// admissible candidates. Never revisits a reach (guards against cycles) and
/// stops after `profile.max_each_direction` accepted hops.
fn walk(
    db: &ReferenceDb,
    seed: &Reach,
    set: &mut WorkingSet,
    direction: Direction,
    profile: &AlgorithmProfile,
    observed: &ObservedReaches,
) {
    let mut steps: u32 = 0;
    loop {
        let current_id = match direction {
            Direction::Up => set.upstream_terminus,
            Direction::Down => set.downstream_terminus,
        };
        let Some(current) = set.reaches.get(&current_id) else {
            break;
        };
        let next_id = match direction {
            Direction::Up => current.up_ids.first(),
            Direction::Down => current.down_ids.first(),
        };
        let Some(&candidate_id) = next_id else {
            break;
        };

        if set.members.contains(&candidate_id) {
            // Cyclic topology: the candidate is already in this set.
            break;
        }

        let candidate = match db.lookup(candidate_id) {
            Ok(r) => r.clone(),
            Err(_) => {
                tracing::warn!(
                    reach_id = candidate_id,
                    "reach referenced in topology but absent from reference DB"
                );
                break;
            }
        };

        if !admissible(seed, &candidate, profile, observed) {
            break;
        }

        steps += 1;
        if !profile.within_expansion_cap(steps) {
            break;
        }

        set.members.insert(candidate_id);
        match direction {
            Direction::Up => set.upstream_terminus = candidate_id,
            Direction::Down => set.downstream_terminus = candidate_id,
        }
        set.reaches.insert(candidate_id, candidate);
    }
}
