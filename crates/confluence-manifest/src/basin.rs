use std::collections::BTreeMap;

use confluence_core::ReachId;

use crate::records::{swot_filename, BasinRecord};

/// First 6 digits of a reach identifier, matching `confluence_core::Reach::basin_id`.
/// Basin grouping only needs the identifier, not the full reference-DB record,
/// so this is kept free-standing rather than requiring a `Reach` here.
fn basin_id_of(reach_id: ReachId) -> ReachId {
    let digits = reach_id.unsigned_abs().to_string();
    if digits.len() < 6 {
        reach_id
    } else {
        digits[..6].parse().unwrap_or(reach_id)
    }
}

/// Groups `reach_ids` by basin and emits one record per basin, each carrying
/// its member reach ids and their SWOT file names.
pub fn basin_records(reach_ids: &[ReachId], sword_filename: &str, sos_filename: &str) -> Vec<BasinRecord> {
    let mut by_basin: BTreeMap<ReachId, Vec<ReachId>> = BTreeMap::new();
    for &reach_id in reach_ids {
        by_basin.entry(basin_id_of(reach_id)).or_default().push(reach_id);
    }

    by_basin
        .into_iter()
        .map(|(basin_id, mut reach_id)| {
            reach_id.sort_unstable();
            let swot = reach_id.iter().map(|&r| swot_filename(r)).collect();
            BasinRecord {
                basin_id,
                reach_id,
                sword: sword_filename.to_string(),
                sos: sos_filename.to_string(),
                swot,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_reaches_sharing_the_first_six_digits() {
        let records = basin_records(&[74_266_100_031, 74_266_100_041, 74_200_000_011], "na_sword_v16.nc", "na_sword_v16_SOS.nc");
        assert_eq!(records.len(), 2);
        let first = &records[0];
        assert_eq!(first.basin_id, 742_000);
        assert_eq!(first.reach_id, vec![74_200_000_011]);
        assert_eq!(first.swot, vec!["74200000011_SWOT.nc".to_string()]);

        let second = &records[1];
        assert_eq!(second.basin_id, 742_661);
        assert_eq!(second.reach_id, vec![74_266_100_031, 74_266_100_041]);
        assert_eq!(second.sword, "na_sword_v16.nc");
    }
}
