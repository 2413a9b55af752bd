use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("CMR request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("CMR response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("CMR returned an unexpected response shape: {0}")]
    Shape(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
