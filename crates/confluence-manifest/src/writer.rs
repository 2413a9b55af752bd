use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

/// Writes the per-continent manifest files into a fixed output directory.
/// Every `write_*` method is `indent=2`-equivalent pretty JSON, matching the
/// reference implementation's `write_json` helper.
pub struct ManifestWriter {
    directory: PathBuf,
}

impl ManifestWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into() }
    }

    /// Writes `value` to `<kind>_<continent>.json` under the output directory.
    pub fn write(&self, kind: &str, continent: &str, value: &impl Serialize) -> Result<()> {
        let path = self.path_for(kind, continent);
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, json)?;
        tracing::info!(file = %path.display(), "wrote manifest file");
        Ok(())
    }

    pub fn path_for(&self, kind: &str, continent: &str) -> PathBuf {
        self.directory.join(format!("{kind}_{}.json", continent.to_lowercase()))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_pretty_json_to_the_expected_filename() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ManifestWriter::new(dir.path());
        writer.write("reaches", "NA", &serde_json::json!([{"reach_id": 1}])).unwrap();

        let written = std::fs::read_to_string(dir.path().join("reaches_na.json")).unwrap();
        assert!(written.contains("\"reach_id\": 1"));
    }
}
