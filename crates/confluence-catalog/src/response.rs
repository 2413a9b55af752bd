use serde::Deserialize;

/// Minimal slice of the CMR `granules.umm_json` response this crate reads.
#[derive(Debug, Deserialize)]
pub struct UmmJsonResponse {
    pub items: Vec<UmmItem>,
}

#[derive(Debug, Deserialize)]
pub struct UmmItem {
    pub umm: UmmGranule,
}

#[derive(Debug, Deserialize)]
pub struct UmmGranule {
    #[serde(rename = "RelatedUrls")]
    pub related_urls: Vec<RelatedUrl>,
}

#[derive(Debug, Deserialize)]
pub struct RelatedUrl {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Type")]
    pub url_type: String,
}

impl UmmJsonResponse {
    /// Direct-access (S3 or HTTPS) URLs for every granule in this page.
    pub fn direct_access_urls(&self) -> Vec<String> {
        self.items
            .iter()
            .flat_map(|item| &item.umm.related_urls)
            .filter(|url| url.url_type == "GET DATA VIA DIRECT ACCESS")
            .map(|url| url.url.clone())
            .collect()
    }
}
