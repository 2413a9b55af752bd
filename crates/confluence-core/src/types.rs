use serde::{Deserialize, Serialize};

/// SWORD reach identifiers are 64-bit integers whose digits encode basin,
/// ordinal, and type. See [`Reach::reach_type_digit`] and [`Reach::basin_id`].
pub type ReachId = i64;

/// SWORD node identifiers share the parent reach's first 10 digits.
pub type NodeId = i64;

/// A single hydrography-graph node: one river (or lake/dam/ghost) reach and
/// its SWOT observation attributes, as read from the reference database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reach {
    pub reach_id: ReachId,
    pub facc: f64,
    pub n_up: u8,
    pub n_down: u8,
    pub up_ids: Vec<ReachId>,
    pub down_ids: Vec<ReachId>,
    pub swot_obs: u32,
    pub swot_orbits: Vec<i64>,
}

impl Reach {
    /// Terminal digit of the reach identifier: `1` means river.
    pub fn reach_type_digit(&self) -> u8 {
        (self.reach_id.unsigned_abs() % 10) as u8
    }

    pub fn is_river(&self) -> bool {
        self.reach_type_digit() == 1
    }

    /// First 6 digits of the reach identifier.
    pub fn basin_id(&self) -> i64 {
        let digits = self.reach_id.unsigned_abs().to_string();
        if digits.len() < 6 {
            self.reach_id
        } else {
            digits[..6].parse().unwrap_or(self.reach_id)
        }
    }

    /// First 10 digits of the reach identifier, shared with child node ids.
    pub fn node_prefix(&self) -> String {
        let digits = self.reach_id.unsigned_abs().to_string();
        if digits.len() < 10 {
            digits
        } else {
            digits[..10].to_string()
        }
    }

    /// Whether this reach is a river junction in either direction. Checked
    /// unconditionally on both `n_up` and `n_down` regardless of which way a
    /// walk is currently headed — the junction policy bars branching
    /// topology at a reach, not just branching in the walk's own direction.
    pub fn has_river_junction(&self) -> bool {
        self.n_up > 1 || self.n_down > 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Named parameter bundle controlling one inversion-set-builder run.
///
/// `max_each_direction == None` means unbounded expansion (HiVDI, SIC).
/// `allowed_reach_overlap <= 0.0` disables phase-D overlap pruning entirely;
/// a negative value is the original implementation's "dedup only" sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmProfile {
    pub name: String,
    pub require_identical_orbits: bool,
    pub drainage_area_pct_cutoff: f64,
    pub allow_river_junction: bool,
    pub max_each_direction: Option<u32>,
    pub min_reaches: usize,
    pub allowed_reach_overlap: f64,
}

impl AlgorithmProfile {
    /// Strict orbit-identical, tight drainage cutoff, short chains, no overlap pruning.
    pub fn metro_man() -> Self {
        Self {
            name: "metro".to_string(),
            require_identical_orbits: true,
            drainage_area_pct_cutoff: 10.0,
            allow_river_junction: false,
            max_each_direction: Some(2),
            min_reaches: 3,
            allowed_reach_overlap: -1.0,
        }
    }

    /// Looser drainage cutoff, unbounded expansion, moderate overlap tolerance.
    pub fn hivdi() -> Self {
        Self {
            name: "hivdi".to_string(),
            require_identical_orbits: false,
            drainage_area_pct_cutoff: 30.0,
            allow_river_junction: false,
            max_each_direction: None,
            min_reaches: 1,
            allowed_reach_overlap: 0.5,
        }
    }

    /// Same as HiVDI but with a higher overlap tolerance.
    pub fn sic() -> Self {
        Self {
            name: "sic".to_string(),
            require_identical_orbits: false,
            drainage_area_pct_cutoff: 30.0,
            allow_river_junction: false,
            max_each_direction: None,
            min_reaches: 1,
            allowed_reach_overlap: 0.67,
        }
    }

    pub fn standard_profiles() -> Vec<Self> {
        vec![Self::metro_man(), Self::hivdi(), Self::sic()]
    }

    pub fn overlap_pruning_enabled(&self) -> bool {
        self.allowed_reach_overlap > 0.0
    }

    /// `true` if `steps` upstream/downstream hops have not yet hit the cap.
    pub fn within_expansion_cap(&self, steps: u32) -> bool {
        match self.max_each_direction {
            Some(max) => steps <= max,
            None => true,
        }
    }
}

/// An ordered, upstream-first group of contiguous reaches eligible for joint
/// inversion, plus the bookkeeping needed to keep expanding or dedup it.
#[derive(Debug, Clone, PartialEq)]
pub struct InversionSet {
    pub seed: ReachId,
    pub upstream_terminus: ReachId,
    pub downstream_terminus: ReachId,
    /// Member reach ids in canonical upstream-first order.
    pub members: Vec<ReachId>,
    /// Cached reach records for every member, same order as `members`.
    pub reaches: Vec<Reach>,
}

impl InversionSet {
    pub fn singleton(seed: Reach) -> Self {
        let id = seed.reach_id;
        Self {
            seed: id,
            upstream_terminus: id,
            downstream_terminus: id,
            members: vec![id],
            reaches: vec![seed],
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, reach_id: ReachId) -> bool {
        self.members.contains(&reach_id)
    }
}
