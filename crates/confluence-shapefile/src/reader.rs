use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Read};
use std::path::Path;
use std::time::Duration;

use confluence_creds::CredentialBroker;
use dbase::FieldValue;
use rayon::prelude::*;
use reqwest::blocking::Client as BlockingClient;
use tracing::warn;

use crate::cycle::CycleIndexer;
use crate::error::{Result, ShapefileError};
use crate::sidecar::{pass_number_from_filename, read_version_id};

const MAX_ATTEMPTS: u32 = 3;

/// Reach and node identifiers contributed by one granule, plus its stem
/// (used downstream by `CycleIndexer`).
#[derive(Debug, Default, Clone)]
pub struct GranuleRecords {
    pub stem: String,
    pub reach_ids: Vec<i64>,
    pub node_ids: Vec<i64>,
}

/// The merged result of reading every targeted granule for one continent.
#[derive(Debug, Default)]
pub struct AggregatedRecords {
    pub reach_ids: Vec<i64>,
    pub node_ids: Vec<i64>,
    /// Every granule stem that contributed at least one identifier, in the
    /// order granules were supplied (already naturally sorted upstream).
    pub shapefile_stems: Vec<String>,
    /// Reach id to the granule stem(s) it was observed in.
    pub reach_to_granules: HashMap<i64, Vec<String>>,
}

/// Reads reach/node identifiers out of zipped SWOT shapefile granules.
pub struct ShapefileReader {
    http: BlockingClient,
}

impl Default for ShapefileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapefileReader {
    pub fn new() -> Self {
        let http = BlockingClient::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("reqwest blocking client with static config always builds");
        Self { http }
    }

    /// Reads every granule in `uris`, retrying failures up to
    /// [`MAX_ATTEMPTS`] times and refreshing credentials between rounds.
    pub async fn read_all(
        &self,
        uris: &[String],
        sword_version: &str,
        pass_filter: Option<&[String]>,
        creds: &CredentialBroker,
    ) -> Result<AggregatedRecords> {
        let mut pending: Vec<String> = uris.to_vec();
        let mut granules: Vec<GranuleRecords> = Vec::new();

        for attempt in 1..=MAX_ATTEMPTS {
            if pending.is_empty() {
                break;
            }

            let credentials = if attempt == 1 { creds.current().await } else { creds.force_refresh().await };
            let credentials = credentials.map_err(|e| ShapefileError::Sidecar(e.to_string()))?;
            let bearer = credentials.access_key_id.clone();

            let http = self.http.clone();
            let sword_version = sword_version.to_string();
            let pass_filter = pass_filter.map(|p| p.to_vec());
            let batch = std::mem::take(&mut pending);

            let outcome: (Vec<GranuleRecords>, Vec<String>) = tokio::task::spawn_blocking(move || {
                batch
                    .into_par_iter()
                    .map(|uri| {
                        let result = fetch_one(&http, &uri, &bearer, &sword_version, pass_filter.as_deref());
                        (uri, result)
                    })
                    .fold(
                        || (Vec::new(), Vec::new()),
                        |(mut ok, mut failed), (uri, result)| {
                            match result {
                                Ok(Some(record)) => ok.push(record),
                                Ok(None) => {}
                                Err(e) => {
                                    warn!(uri, error = %e, "granule read failed, will retry");
                                    failed.push(uri);
                                }
                            }
                            (ok, failed)
                        },
                    )
                    .reduce(
                        || (Vec::new(), Vec::new()),
                        |(mut ok_a, mut fail_a), (ok_b, fail_b)| {
                            ok_a.extend(ok_b);
                            fail_a.extend(fail_b);
                            (ok_a, fail_a)
                        },
                    )
            })
            .await?;

            granules.extend(outcome.0);
            pending = outcome.1;
        }

        if !pending.is_empty() {
            warn!(count = pending.len(), "granules could not be read after all retries, skipping");
        }

        Ok(aggregate(granules))
    }

    /// Reads every granule zip in `dir` whose file name contains
    /// `continent_code`, without any network access — the local-filesystem
    /// counterpart to [`ShapefileReader::read_all`] used for `--local` runs.
    pub fn read_local(
        &self,
        dir: &Path,
        continent_code: &str,
        sword_version: &str,
        pass_filter: Option<&[String]>,
    ) -> Result<AggregatedRecords> {
        let mut granules = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !name.contains(continent_code) {
                continue;
            }
            let stem = name.trim_end_matches(".zip").to_string();
            let bytes = std::fs::read(entry.path())?;
            if let Some(record) = parse_granule(&bytes, &stem, sword_version, pass_filter)? {
                granules.push(record);
            }
        }
        Ok(aggregate(granules))
    }
}

/// Fetches and parses one granule. Returns `Ok(None)` when the sidecar
/// version or pass number doesn't match the run's targets (not an error,
/// just out of scope for this run).
///
/// `access_key_id` is accepted but unused here: real S3 object reads need
/// SigV4 request signing with the full credential triple, which belongs in
/// the object-store client this reader is built on, not in this function.
fn fetch_one(
    http: &BlockingClient,
    uri: &str,
    access_key_id: &str,
    sword_version: &str,
    pass_filter: Option<&[String]>,
) -> Result<Option<GranuleRecords>> {
    let _ = access_key_id;
    let response = http.get(uri).send()?;
    if response.status() == reqwest::StatusCode::FORBIDDEN || response.status() == reqwest::StatusCode::UNAUTHORIZED
    {
        return Err(ShapefileError::Unauthorized { uri: uri.to_string() });
    }
    let bytes = response.error_for_status()?.bytes()?;
    let stem = uri.rsplit('/').next().unwrap_or(uri).trim_end_matches(".zip").to_string();
    parse_granule(&bytes, &stem, sword_version, pass_filter)
}

/// Checks the pass filter and sidecar version, then reads the `.dbf` member
/// of one granule's zip bytes. Shared by the HTTP (`fetch_one`) and local
/// (`ShapefileReader::read_local`) read paths.
fn parse_granule(
    bytes: &[u8],
    stem: &str,
    sword_version: &str,
    pass_filter: Option<&[String]>,
) -> Result<Option<GranuleRecords>> {
    if let Some(pass_filter) = pass_filter {
        if let Some(pass) = pass_number_from_filename(stem) {
            if !pass_filter.iter().any(|p| p == pass) {
                return Ok(None);
            }
        }
    }

    let mut zip = zip::ZipArchive::new(Cursor::new(bytes))?;

    if let Some(xml_name) = find_member(&zip, ".xml") {
        let mut xml_bytes = Vec::new();
        zip.by_name(&xml_name)?.read_to_end(&mut xml_bytes)?;
        let version = read_version_id(&xml_bytes).unwrap_or_default();
        if !version.is_empty() && version != sword_version {
            return Ok(None);
        }
    }

    let dbf_name = find_member(&zip, ".dbf").ok_or_else(|| ShapefileError::MissingMember(format!("{stem}.dbf")))?;
    let mut dbf_bytes = Vec::new();
    zip.by_name(&dbf_name)?.read_to_end(&mut dbf_bytes)?;

    let mut dbf_reader = dbase::Reader::new(Cursor::new(dbf_bytes)).map_err(|e| ShapefileError::Dbf(e.to_string()))?;
    let records = dbf_reader.read().map_err(|e| ShapefileError::Dbf(e.to_string()))?;

    let mut record = GranuleRecords { stem: stem.to_string(), ..Default::default() };
    if stem.contains("Reach") {
        record.reach_ids = extract_ids(&records, "reach_id");
    }
    if stem.contains("Node") {
        record.node_ids = extract_ids(&records, "node_id");
    }

    Ok(Some(record))
}

fn find_member<R: Read + std::io::Seek>(zip: &zip::ZipArchive<R>, suffix: &str) -> Option<String> {
    zip.file_names().find(|n| n.ends_with(suffix)).map(str::to_string)
}

fn extract_ids(records: &[dbase::Record], field: &str) -> Vec<i64> {
    let mut ids: HashSet<i64> = HashSet::new();
    for record in records {
        let Some(value) = record.get(field) else { continue };
        let id = match value {
            FieldValue::Numeric(Some(n)) => Some(*n as i64),
            FieldValue::Character(Some(s)) => s.trim().parse().ok(),
            _ => None,
        };
        if let Some(id) = id {
            ids.insert(id);
        }
    }
    let mut ids: Vec<i64> = ids.into_iter().collect();
    ids.sort_unstable();
    ids
}

fn aggregate(granules: Vec<GranuleRecords>) -> AggregatedRecords {
    let mut reach_ids: HashSet<i64> = HashSet::new();
    let mut node_ids: HashSet<i64> = HashSet::new();
    let mut reach_to_granules: HashMap<i64, Vec<String>> = HashMap::new();
    let mut shapefile_stems = Vec::new();

    for granule in granules {
        shapefile_stems.push(granule.stem.clone());
        for id in &granule.reach_ids {
            reach_ids.insert(*id);
            reach_to_granules.entry(*id).or_default().push(granule.stem.clone());
        }
        node_ids.extend(granule.node_ids);
    }

    let mut reach_ids: Vec<i64> = reach_ids.into_iter().collect();
    reach_ids.sort_unstable();
    let mut node_ids: Vec<i64> = node_ids.into_iter().collect();
    node_ids.sort_unstable();

    AggregatedRecords { reach_ids, node_ids, shapefile_stems, reach_to_granules }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_numeric(field: &str, value: f64) -> dbase::Record {
        let mut map = dbase::Record::default();
        map.insert(field.to_string(), FieldValue::Numeric(Some(value)));
        map
    }

    #[test]
    fn extract_ids_dedups_and_sorts() {
        let records = vec![
            record_with_numeric("reach_id", 3.0),
            record_with_numeric("reach_id", 1.0),
            record_with_numeric("reach_id", 3.0),
        ];
        assert_eq!(extract_ids(&records, "reach_id"), vec![1, 3]);
    }

    #[test]
    fn aggregate_builds_reach_to_granule_index() {
        let granules = vec![
            GranuleRecords { stem: "g1".to_string(), reach_ids: vec![1, 2], node_ids: vec![] },
            GranuleRecords { stem: "g2".to_string(), reach_ids: vec![2], node_ids: vec![] },
        ];
        let aggregated = aggregate(granules);
        assert_eq!(aggregated.reach_ids, vec![1, 2]);
        assert_eq!(aggregated.reach_to_granules[&2], vec!["g1".to_string(), "g2".to_string()]);
    }
}
