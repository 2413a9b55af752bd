use confluence_core::ReachId;
use serde::{Deserialize, Serialize};

/// One entry of `reaches_<c>.json`, and the per-member shape used inside
/// `<algo>sets_<c>.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReachRecord {
    pub reach_id: ReachId,
    pub sword: String,
    pub swot: String,
    pub sos: String,
}

impl ReachRecord {
    pub fn new(reach_id: ReachId, sword_filename: &str, sos_filename: &str) -> Self {
        Self {
            reach_id,
            sword: sword_filename.to_string(),
            swot: swot_filename(reach_id),
            sos: sos_filename.to_string(),
        }
    }
}

/// One entry of `basin_<c>.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasinRecord {
    pub basin_id: ReachId,
    pub reach_id: Vec<ReachId>,
    pub sword: String,
    pub sos: String,
    pub swot: Vec<String>,
}

/// SWOT observation file name for a single reach: `<reach_id>_SWOT.nc`.
pub fn swot_filename(reach_id: ReachId) -> String {
    format!("{reach_id}_SWOT.nc")
}
