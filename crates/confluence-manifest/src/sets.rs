use confluence_core::InversionSet;

use crate::records::ReachRecord;

/// Builds `<algo>sets_<c>.json`: one inner array per inversion set, members
/// in the set's own canonical (upstream-first) order.
pub fn set_records(sets: &[InversionSet], sword_filename: &str, sos_filename: &str) -> Vec<Vec<ReachRecord>> {
    sets.iter()
        .map(|set| set.members.iter().map(|&reach_id| ReachRecord::new(reach_id, sword_filename, sos_filename)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use confluence_core::Reach;

    fn reach(id: i64) -> Reach {
        Reach { reach_id: id, facc: 1.0, n_up: 1, n_down: 1, up_ids: vec![], down_ids: vec![], swot_obs: 0, swot_orbits: vec![] }
    }

    #[test]
    fn preserves_each_sets_own_member_order() {
        let set = InversionSet {
            seed: 2,
            upstream_terminus: 1,
            downstream_terminus: 3,
            members: vec![1, 2, 3],
            reaches: vec![reach(1), reach(2), reach(3)],
        };
        let written = set_records(&[set], "na_sword_v16.nc", "na_sword_v16_SOS.nc");
        assert_eq!(written.len(), 1);
        let ids: Vec<i64> = written[0].iter().map(|r| r.reach_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
