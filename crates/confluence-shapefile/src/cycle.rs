use std::collections::HashMap;

/// Assigns a stable numeric identifier to each distinct (cycle, pass) pair
/// observed in the filtered granule list, in first-appearance order.
///
/// Cycle and pass are the 6th and 7th underscore-delimited fields (0-indexed
/// 5 and 6) of the shapefile stem, per the reference implementation.
#[derive(Debug, Default)]
pub struct CycleIndexer {
    ids: HashMap<(String, String), u32>,
    passes: HashMap<u32, (String, String)>,
    next_id: u32,
}

impl CycleIndexer {
    pub fn new() -> Self {
        Self { ids: HashMap::new(), passes: HashMap::new(), next_id: 1 }
    }

    /// Indexes every shapefile stem in `shapefile_names`, in order. Stems
    /// with fewer than 7 underscore-delimited fields are skipped.
    pub fn index_all(&mut self, shapefile_names: &[String]) {
        for name in shapefile_names {
            let mut fields = name.split('_');
            let cycle = fields.nth(5);
            let pass = fields.next();
            if let (Some(cycle), Some(pass)) = (cycle, pass) {
                self.index_one(cycle, pass);
            }
        }
    }

    fn index_one(&mut self, cycle: &str, pass: &str) {
        let key = (cycle.to_string(), pass.to_string());
        if self.ids.contains_key(&key) {
            return;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.passes.insert(id, key.clone());
        self.ids.insert(key, id);
    }

    pub fn cycle_pass_to_id(&self) -> &HashMap<(String, String), u32> {
        &self.ids
    }

    pub fn id_to_cycle_pass(&self) -> &HashMap<u32, (String, String)> {
        &self.passes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_dense_ids_in_first_appearance_order() {
        let names = vec![
            "SWOT_L2_HR_RiverSP_Reach_007_013_NA_01".to_string(),
            "SWOT_L2_HR_RiverSP_Node_007_013_NA_01".to_string(), // same (cycle, pass)
            "SWOT_L2_HR_RiverSP_Reach_007_014_NA_01".to_string(),
        ];
        let mut indexer = CycleIndexer::new();
        indexer.index_all(&names);

        assert_eq!(indexer.cycle_pass_to_id().len(), 2);
        assert_eq!(indexer.cycle_pass_to_id()[&("007".to_string(), "013".to_string())], 1);
        assert_eq!(indexer.cycle_pass_to_id()[&("007".to_string(), "014".to_string())], 2);
        assert_eq!(indexer.id_to_cycle_pass()[&1], ("007".to_string(), "013".to_string()));
    }
}
