use confluence_core::reference_db::PatchValue;
use confluence_core::{ReachId, ReferenceDb};
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

/// One field overwrite from a SWORD patch file. `metadata` entries are kept
/// in the schema (so a strict deserializer doesn't reject the file) but are
/// never applied.
#[derive(Debug, Deserialize)]
pub struct PatchEntry {
    pub reach_id: ReachId,
    pub field: String,
    pub value: Value,
}

/// Parses a patch file and applies every entry to `db` in place, skipping
/// `metadata` fields and reaches the patch references but the database
/// doesn't contain.
pub fn apply_patch_file(db: &mut ReferenceDb, contents: &str) -> Result<()> {
    let entries: Vec<PatchEntry> = serde_json::from_str(contents)?;
    for entry in entries {
        if entry.field == "metadata" {
            continue;
        }
        let Some(value) = to_patch_value(&entry.value) else {
            tracing::warn!(reach_id = entry.reach_id, field = %entry.field, "unrecognized patch value shape, skipping");
            continue;
        };
        db.apply_field_patch(entry.reach_id, &entry.field, value);
    }
    Ok(())
}

fn to_patch_value(value: &Value) -> Option<PatchValue> {
    match value {
        Value::Number(n) => n.as_f64().map(PatchValue::Scalar),
        Value::Array(items) => {
            let values: Option<Vec<f64>> = items.iter().map(|v| v.as_f64()).collect();
            values.map(PatchValue::Vector)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confluence_core::Reach;

    fn reach(id: ReachId) -> Reach {
        Reach { reach_id: id, facc: 10.0, n_up: 1, n_down: 1, up_ids: vec![], down_ids: vec![], swot_obs: 0, swot_orbits: vec![] }
    }

    #[test]
    fn applies_scalar_and_skips_metadata_and_missing_reaches() {
        let mut db = ReferenceDb::new(vec![reach(1)], vec![]);
        let patch = r#"[
            {"reach_id": 1, "field": "facc", "value": 42.0},
            {"reach_id": 1, "field": "metadata", "value": "ignored"},
            {"reach_id": 999, "field": "facc", "value": 1.0}
        ]"#;
        apply_patch_file(&mut db, patch).unwrap();
        assert_eq!(db.lookup(1).unwrap().facc, 42.0);
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn applies_vector_valued_fields() {
        let mut db = ReferenceDb::new(vec![reach(1)], vec![]);
        let patch = r#"[{"reach_id": 1, "field": "up_ids", "value": [5, 6]}]"#;
        apply_patch_file(&mut db, patch).unwrap();
        assert_eq!(db.lookup(1).unwrap().up_ids, vec![5, 6]);
    }
}
