use std::collections::HashMap;

/// Granules reprocessed more than once leave every processing run's shapefile
/// in the bucket, distinguished only by a trailing two-digit counter just
/// before the `.zip` extension (e.g. `..._01.zip`, `..._02.zip`). Keep only
/// the highest-numbered run per otherwise-identical URL.
pub fn dedupe_reprocessing_runs(urls: Vec<String>) -> Vec<String> {
    let mut groups: HashMap<&str, Vec<&str>> = HashMap::new();
    for url in &urls {
        if url.len() < 6 {
            continue;
        }
        let prefix = &url[..url.len() - 6];
        groups.entry(prefix).or_default().push(url.as_str());
    }

    let mut kept = Vec::new();
    for (_, members) in groups {
        if members.len() == 1 {
            kept.push(members[0].to_string());
            continue;
        }
        let best = members.into_iter().max_by_key(|url| reprocessing_counter(url));
        if let Some(best) = best {
            kept.push(best.to_string());
        }
    }

    kept.sort();
    kept.dedup();
    kept
}

/// The two-digit reprocessing counter immediately preceding `.zip`.
fn reprocessing_counter(url: &str) -> u32 {
    let len = url.len();
    if len < 6 {
        return 0;
    }
    url[len - 6..len - 4].parse().unwrap_or(0)
}
