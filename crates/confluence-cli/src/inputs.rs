use std::path::Path;

use anyhow::{bail, Context, Result};
use confluence_core::{Continent, ReachId};
use serde_json::Value;

/// Resolves which continent this run is for, from the continent manifest
/// file and an index (or `AWS_BATCH_JOB_ARRAY_INDEX` when the index is the
/// `-235` sentinel), matching the original `get_continent` helper: the
/// manifest is a JSON array of single-key objects, each key a continent code.
pub fn resolve_continent(directory: &Path, jsonfile: &str, index: i64) -> Result<Continent> {
    let resolved_index = if index != -235 {
        index
    } else {
        std::env::var("AWS_BATCH_JOB_ARRAY_INDEX")
            .context("index is -235 but AWS_BATCH_JOB_ARRAY_INDEX is not set")?
            .parse()
            .context("AWS_BATCH_JOB_ARRAY_INDEX is not a valid integer")?
    };

    let path = directory.join(jsonfile);
    let contents = std::fs::read_to_string(&path).with_context(|| format!("reading continent manifest {}", path.display()))?;
    let manifest: Vec<serde_json::Map<String, Value>> =
        serde_json::from_str(&contents).with_context(|| format!("parsing continent manifest {}", path.display()))?;

    let entry = manifest
        .get(usize::try_from(resolved_index).context("continent manifest index is negative")?)
        .with_context(|| format!("continent manifest index {resolved_index} out of range"))?;
    let code = entry.keys().next().with_context(|| format!("continent manifest entry {resolved_index} is empty"))?;

    Continent::from_code(code).map_err(Into::into)
}

/// Reads a JSON array of reach identifiers from `--subsetfile`.
pub fn read_reach_subset(path: &Path) -> Result<Vec<ReachId>> {
    let contents = std::fs::read_to_string(path).with_context(|| format!("reading subset file {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing subset file {}", path.display()))
}

/// Reads a JSON array of pass numbers from `--passlist`.
pub fn read_pass_list(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path).with_context(|| format!("reading pass list {}", path.display()))?;
    let passes: Vec<Value> = serde_json::from_str(&contents).with_context(|| format!("parsing pass list {}", path.display()))?;
    passes
        .into_iter()
        .map(|v| match v {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => bail!("pass list entries must be strings or numbers, got {other}"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn resolve_continent_reads_the_indexed_entry() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("continent.json"), r#"[{"af": true}, {"na": true}]"#).unwrap();
        let continent = resolve_continent(dir.path(), "continent.json", 1).unwrap();
        assert_eq!(continent, Continent::Na);
    }

    #[test]
    fn read_reach_subset_parses_a_plain_integer_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();
        assert_eq!(read_reach_subset(file.path()).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn read_pass_list_accepts_both_string_and_numeric_entries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["013", 14]"#).unwrap();
        assert_eq!(read_pass_list(file.path()).unwrap(), vec!["013".to_string(), "14".to_string()]);
    }
}
