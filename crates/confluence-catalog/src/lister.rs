use std::time::Duration;

use confluence_core::Continent;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::dedup::dedupe_reprocessing_runs;
use crate::error::{CatalogError, Result};
use crate::response::UmmJsonResponse;
use crate::sorting::natural_sort;

const CMR_BASE_URL: &str = "https://cmr.earthdata.nasa.gov/search/granules.umm_json";
const PAGE_SIZE: u32 = 2000;

/// Parameters for one CMR granule search.
#[derive(Debug, Clone)]
pub struct GranuleQuery {
    pub short_name: String,
    pub provider: String,
    /// CMR `revision_date` range, `"start,end"` in ISO-8601.
    pub temporal_range: String,
}

/// Lists SWOT shapefile granules from NASA's Common Metadata Repository,
/// paginating via the `CMR-Search-After` header until exhausted.
pub struct GranuleLister {
    client: Client,
    token: Option<String>,
    base_url: String,
}

impl GranuleLister {
    pub fn new(token: Option<String>) -> Self {
        Self::with_base_url(token, CMR_BASE_URL.to_string())
    }

    pub fn with_base_url(token: Option<String>, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("reqwest client with static TLS config always builds");
        Self { client, token, base_url }
    }

    /// Runs the full paginated query and returns `.zip` shapefile URIs for
    /// `continent`, deduplicated across reprocessing runs and naturally
    /// sorted.
    pub async fn list_granules(&self, query: &GranuleQuery, continent: Continent) -> Result<Vec<String>> {
        let mut all_urls = Vec::new();
        let mut search_after: Option<String> = None;

        loop {
            let page = self.fetch_page(query, search_after.as_deref()).await?;
            all_urls.extend(page.urls);
            debug!(count = all_urls.len(), "accumulated granule URIs so far");

            match page.next_search_after {
                Some(next) => search_after = Some(next),
                None => break,
            }
        }

        let zip_urls: Vec<String> = all_urls
            .into_iter()
            .filter(|u| u.ends_with(".zip"))
            .filter(|u| continent.matches(u))
            .collect();

        let mut deduped = dedupe_reprocessing_runs(zip_urls);
        natural_sort(&mut deduped);

        info!(count = deduped.len(), continent = continent.code(), "granule listing complete");
        Ok(deduped)
    }

    async fn fetch_page(&self, query: &GranuleQuery, search_after: Option<&str>) -> Result<Page> {
        let mut request = self.client.get(&self.base_url).query(&[
            ("short_name", query.short_name.as_str()),
            ("provider", query.provider.as_str()),
            ("revision_date", query.temporal_range.as_str()),
            ("page_size", &PAGE_SIZE.to_string()),
        ]);

        if let Some(token) = &self.token {
            request = request.query(&[("token", token.as_str())]);
        }
        if let Some(search_after) = search_after {
            request = request.header("CMR-Search-After", search_after);
        }

        let response = request.send().await?;
        let next_search_after = response
            .headers()
            .get("CMR-Search-After")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(%status, "CMR returned a non-success status");
            return Err(CatalogError::Shape(format!("CMR returned HTTP {status}: {body}")));
        }

        let parsed: UmmJsonResponse = serde_json::from_str(&body)?;
        Ok(Page {
            urls: parsed.direct_access_urls(),
            next_search_after,
        })
    }
}

struct Page {
    urls: Vec<String>,
    next_search_after: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn umm_body(urls: &[&str]) -> String {
        let items: Vec<_> = urls
            .iter()
            .map(|u| {
                serde_json::json!({
                    "umm": {
                        "RelatedUrls": [
                            { "URL": u, "Type": "GET DATA VIA DIRECT ACCESS" }
                        ]
                    }
                })
            })
            .collect();
        serde_json::json!({ "items": items }).to_string()
    }

    #[tokio::test]
    async fn paginates_filters_and_sorts_granule_uris() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/granules.umm_json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("CMR-Search-After", "page-2")
                    .set_body_raw(
                        umm_body(&[
                            "s3://bucket/NA_010_01.zip",
                            "s3://bucket/AF_001_01.zip", // wrong continent
                            "s3://bucket/NA_metadata.xml", // not a shapefile
                        ]),
                        "application/json",
                    ),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/search/granules.umm_json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                umm_body(&["s3://bucket/NA_002_01.zip"]),
                "application/json",
            ))
            .mount(&server)
            .await;

        let base_url = format!("{}/search/granules.umm_json", server.uri());
        let lister = GranuleLister::with_base_url(None, base_url);
        let query = GranuleQuery {
            short_name: "SWOT_L2_HR_RiverSP".to_string(),
            provider: "POCLOUD".to_string(),
            temporal_range: "2024-01-01T00:00:00Z,2024-02-01T00:00:00Z".to_string(),
        };

        let result = lister.list_granules(&query, Continent::Na).await.unwrap();
        assert_eq!(
            result,
            vec!["s3://bucket/NA_002_01.zip".to_string(), "s3://bucket/NA_010_01.zip".to_string()]
        );
    }
}
