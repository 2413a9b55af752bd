use std::collections::HashMap;

use confluence_core::ReachId;
use serde_json::{Map, Value};

/// Builds `s3_list_<c>.json`: the naturally-sorted granule URIs, unchanged.
pub fn s3_list_json(uris: &[String]) -> Value {
    Value::from(uris.to_vec())
}

/// Builds `s3_reach_<c>.json`: each reach id mapped to the granule URIs (or
/// stems) it was observed in, in the order `GranuleLister` produced them.
pub fn s3_reach_json(reach_to_granules: &HashMap<ReachId, Vec<String>>) -> Value {
    let mut map = Map::new();
    for (reach_id, granules) in reach_to_granules {
        map.insert(reach_id.to_string(), Value::from(granules.clone()));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s3_list_json_is_a_plain_array_of_uris() {
        let uris = vec!["a.zip".to_string(), "b.zip".to_string()];
        assert_eq!(s3_list_json(&uris), serde_json::json!(["a.zip", "b.zip"]));
    }

    #[test]
    fn s3_reach_json_maps_reach_id_strings_to_granule_lists() {
        let mut map = HashMap::new();
        map.insert(1_i64, vec!["a.zip".to_string()]);
        let value = s3_reach_json(&map);
        assert_eq!(value["1"], serde_json::json!(["a.zip"]));
    }
}
