use confluence_core::{NodeId, ReachId};
use serde::{Deserialize, Serialize};

/// One entry of `reach_node_<c>.json`: `[reach_id, [node_id, ...]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReachNodeEntry(pub (ReachId, Vec<NodeId>));

fn node_prefix_of(reach_id: ReachId) -> String {
    let digits = reach_id.unsigned_abs().to_string();
    if digits.len() < 10 {
        digits
    } else {
        digits[..10].to_string()
    }
}

/// Maps every reach id to the node ids sharing its first 10 digits, in the
/// order `reach_ids` is given; `node_ids` need not be pre-sorted per reach.
pub fn reach_node_records(reach_ids: &[ReachId], node_ids: &[NodeId]) -> Vec<ReachNodeEntry> {
    reach_ids
        .iter()
        .map(|&reach_id| {
            let prefix = node_prefix_of(reach_id);
            let mut nodes: Vec<NodeId> = node_ids
                .iter()
                .copied()
                .filter(|&node_id| node_prefix_of(node_id) == prefix)
                .collect();
            nodes.sort_unstable();
            ReachNodeEntry((reach_id, nodes))
        })
        .collect()
}
