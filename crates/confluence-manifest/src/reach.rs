use confluence_core::ReachId;

use crate::records::ReachRecord;

/// Emits one `ReachRecord` per reach id, in the order given.
pub fn reach_records(reach_ids: &[ReachId], sword_filename: &str, sos_filename: &str) -> Vec<ReachRecord> {
    reach_ids.iter().map(|&reach_id| ReachRecord::new(reach_id, sword_filename, sos_filename)).collect()
}
