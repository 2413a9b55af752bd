use std::collections::HashMap;

use serde_json::{Map, Value};

/// Builds `cycle_passes_<c>.json`: `"<cycle>_<pass>"` keys mapping to the
/// dense identifier `CycleIndexer` assigned them.
pub fn cycle_passes_json(ids: &HashMap<(String, String), u32>) -> Value {
    let mut map = Map::new();
    for ((cycle, pass), id) in ids {
        map.insert(format!("{cycle}_{pass}"), Value::from(*id));
    }
    Value::Object(map)
}

/// Builds `passes_<c>.json`: numeric identifier keys mapping back to `[cycle, pass]`.
pub fn passes_json(passes: &HashMap<u32, (String, String)>) -> Value {
    let mut map = Map::new();
    for (id, (cycle, pass)) in passes {
        map.insert(id.to_string(), Value::from(vec![cycle.clone(), pass.clone()]));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_passes_json_joins_cycle_and_pass_with_an_underscore() {
        let mut ids = HashMap::new();
        ids.insert(("012".to_string(), "034".to_string()), 1);
        let value = cycle_passes_json(&ids);
        assert_eq!(value["012_034"], 1);
    }

    #[test]
    fn passes_json_maps_string_ids_back_to_cycle_pass_pairs() {
        let mut passes = HashMap::new();
        passes.insert(1, ("012".to_string(), "034".to_string()));
        let value = passes_json(&passes);
        assert_eq!(value["1"], serde_json::json!(["012", "034"]));
    }
}
