use std::collections::HashMap;

use confluence_core::InversionSet;
use confluence_manifest::*;

/// Drives every `*_records`/`*_json` builder through `ManifestWriter` into a
/// single output directory, the way `confluence-cli`'s pipeline does for one
/// continent, and checks each expected file lands with the right name and
/// parses back as the shape that builder produced.
#[test]
fn one_continent_run_writes_every_manifest_kind() {
    let dir = tempfile::tempdir().unwrap();
    let writer = ManifestWriter::new(dir.path());
    let continent = "na";
    let reach_ids = vec![74_266_100_031_i64, 74_266_100_041];
    let sword_filename = "na_sword_v16.nc";
    let sos_filename = "na_sword_v16_SOS.nc";

    writer.write("basin", continent, &basin_records(&reach_ids, sword_filename, sos_filename)).unwrap();
    writer.write("reaches", continent, &reach_records(&reach_ids, sword_filename, sos_filename)).unwrap();
    writer.write("reach_node", continent, &reach_node_records(&reach_ids, &[7_426_610_003_01])).unwrap();

    let mut cycle_pass_ids = HashMap::new();
    cycle_pass_ids.insert(("012".to_string(), "034".to_string()), 1u32);
    writer.write("cycle_passes", continent, &cycle_passes_json(&cycle_pass_ids)).unwrap();

    let mut passes = HashMap::new();
    passes.insert(1u32, ("012".to_string(), "034".to_string()));
    writer.write("passes", continent, &passes_json(&passes)).unwrap();

    let granule_uris = vec!["a.zip".to_string(), "b.zip".to_string()];
    writer.write("s3_list", continent, &s3_list_json(&granule_uris)).unwrap();

    let mut reach_to_granules = HashMap::new();
    reach_to_granules.insert(reach_ids[0], granule_uris.clone());
    writer.write("s3_reach", continent, &s3_reach_json(&reach_to_granules)).unwrap();

    let set = InversionSet {
        seed: reach_ids[0],
        upstream_terminus: reach_ids[0],
        downstream_terminus: reach_ids[1],
        members: reach_ids.clone(),
        reaches: vec![],
    };
    writer.write("hivdisets", continent, &set_records(&[set], sword_filename, sos_filename)).unwrap();

    let expected_files = [
        "basin_na.json",
        "reaches_na.json",
        "reach_node_na.json",
        "cycle_passes_na.json",
        "passes_na.json",
        "s3_list_na.json",
        "s3_reach_na.json",
        "hivdisets_na.json",
    ];
    for name in expected_files {
        let contents = std::fs::read_to_string(dir.path().join(name)).unwrap_or_else(|e| panic!("reading {name}: {e}"));
        let _: serde_json::Value = serde_json::from_str(&contents).unwrap_or_else(|e| panic!("parsing {name}: {e}"));
    }

    let reaches_json = std::fs::read_to_string(dir.path().join("reaches_na.json")).unwrap();
    assert!(reaches_json.contains("74266100031_SWOT.nc"));

    let sets_json = std::fs::read_to_string(dir.path().join("hivdisets_na.json")).unwrap();
    let sets_value: serde_json::Value = serde_json::from_str(&sets_json).unwrap();
    assert_eq!(sets_value.as_array().unwrap().len(), 1);
    assert_eq!(sets_value[0].as_array().unwrap().len(), 2);
}
