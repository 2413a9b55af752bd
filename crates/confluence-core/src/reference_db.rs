use std::collections::HashMap;

use crate::error::{CoreError, Result};
use crate::types::{NodeId, Reach, ReachId};

/// A node row: its identifier and the parent reach id it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub node_id: NodeId,
    pub reach_id: ReachId,
}

/// The bulk, read-mostly container for one continent's reaches and nodes.
///
/// Reaches are stored densely in `reaches` with a hash index from reach id to
/// array position (the "arena of reach records" from the design notes) —
/// this keeps the graph read-only-shareable without pointer-chasing between
/// reach records, since neighbors are stored as ids, not references.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDb {
    reaches: Vec<Reach>,
    index: HashMap<ReachId, usize>,
    nodes: Vec<NodeRecord>,
}

impl ReferenceDb {
    pub fn new(reaches: Vec<Reach>, nodes: Vec<NodeRecord>) -> Self {
        let index = reaches
            .iter()
            .enumerate()
            .map(|(i, r)| (r.reach_id, i))
            .collect();
        Self {
            reaches,
            index,
            nodes,
        }
    }

    pub fn lookup(&self, reach_id: ReachId) -> Result<&Reach> {
        self.index
            .get(&reach_id)
            .map(|&i| &self.reaches[i])
            .ok_or(CoreError::NotFound(reach_id))
    }

    pub fn contains(&self, reach_id: ReachId) -> bool {
        self.index.contains_key(&reach_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reach> {
        self.reaches.iter()
    }

    pub fn len(&self) -> usize {
        self.reaches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reaches.is_empty()
    }

    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    /// Node identifiers sharing `reach.node_prefix()` with `reach_id`.
    pub fn nodes_for_reach(&self, reach_id: ReachId) -> Vec<NodeId> {
        let Ok(reach) = self.lookup(reach_id) else {
            return Vec::new();
        };
        let prefix = reach.node_prefix();
        self.nodes
            .iter()
            .filter(|n| n.node_id.unsigned_abs().to_string().starts_with(&prefix))
            .map(|n| n.node_id)
            .collect()
    }

    /// Overwrite a scalar or vector-valued field on one reach in place.
    ///
    /// Reaches referenced by the patch but absent from the DB are silently
    /// skipped, per the loader's contract. `metadata` entries are ignored by
    /// the caller before this is invoked.
    pub fn apply_field_patch(&mut self, reach_id: ReachId, field: &str, value: PatchValue) {
        let Some(&idx) = self.index.get(&reach_id) else {
            return;
        };
        let reach = &mut self.reaches[idx];
        match (field, value) {
            ("facc", PatchValue::Scalar(v)) => reach.facc = v,
            ("n_up", PatchValue::Scalar(v)) => reach.n_up = v as u8,
            ("n_down", PatchValue::Scalar(v)) => reach.n_down = v as u8,
            ("up_ids", PatchValue::Vector(v)) => {
                reach.up_ids = v.into_iter().map(|x| x as ReachId).collect()
            }
            ("down_ids", PatchValue::Vector(v)) => {
                reach.down_ids = v.into_iter().map(|x| x as ReachId).collect()
            }
            ("swot_obs", PatchValue::Scalar(v)) => reach.swot_obs = v as u32,
            ("swot_orbits", PatchValue::Vector(v)) => {
                reach.swot_orbits = v.into_iter().map(|x| x as i64).collect()
            }
            _ => {
                tracing::warn!(reach_id, field, "ignoring unrecognized patch field/shape");
            }
        }
    }
}

/// A field overwrite value from a SWORD patch file: either a scalar or a
/// vector whose width equals the reach's declared degree/observation count.
#[derive(Debug, Clone)]
pub enum PatchValue {
    Scalar(f64),
    Vector(Vec<f64>),
}
