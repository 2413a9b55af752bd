use std::collections::HashMap;

use confluence_core::{InversionSet, Reach, ReachId};

use crate::expansion::WorkingSet;

/// Phase C (part 1): turn an unordered working set into a canonical,
/// upstream-first `InversionSet`.
///
/// Walks from the upstream terminus toward the downstream terminus via
/// `down_ids[0]`, bounded to `|members|` iterations. If a hop leaves the
/// working set or the data is otherwise inconsistent, the walk truncates at
/// the last consistent member rather than producing a disconnected set.
pub fn canonicalize(ws: &WorkingSet) -> InversionSet {
    if ws.members.len() == 1 {
        let reach = ws.reaches.get(&ws.seed).expect("singleton seed is cached").clone();
        return InversionSet::singleton(reach);
    }

    let mut ordered: Vec<ReachId> = vec![ws.upstream_terminus];
    let bound = ws.members.len();

    while ordered.last() != Some(&ws.downstream_terminus) && ordered.len() < bound {
        let curr = *ordered.last().unwrap();
        let Some(current_reach) = ws.reaches.get(&curr) else {
            break;
        };
        let Some(&next) = current_reach.down_ids.first() else {
            break;
        };
        if !ws.members.contains(&next) || ordered.contains(&next) {
            break;
        }
        ordered.push(next);
    }

    let reaches: Vec<Reach> = ordered
        .iter()
        .map(|id| ws.reaches.get(id).expect("member reach is cached").clone())
        .collect();
    let downstream_terminus = *ordered.last().unwrap_or(&ws.upstream_terminus);

    InversionSet {
        seed: ws.seed,
        upstream_terminus: ws.upstream_terminus,
        downstream_terminus,
        members: ordered,
        reaches,
    }
}

/// Phase C (part 2): two sets are identical iff same member count and same
/// sorted member multiset. Keep the one whose seed has the smallest reach id.
pub fn deduplicate(sets: Vec<InversionSet>) -> Vec<InversionSet> {
    let mut best: HashMap<Vec<ReachId>, InversionSet> = HashMap::new();

    for set in sets {
        let mut key = set.members.clone();
        key.sort_unstable();

        match best.get(&key) {
            Some(existing) if existing.seed <= set.seed => {}
            _ => {
                best.insert(key, set);
            }
        }
    }

    let mut result: Vec<InversionSet> = best.into_values().collect();
    result.sort_by_key(|s| s.seed);
    result
}
