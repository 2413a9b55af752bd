use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredsError {
    #[error("Earthdata login exchange failed: {0}")]
    Login(String),

    #[error("HTTP request to Earthdata/S3 endpoint failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("credentials response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("SSM parameter store operation failed after retries: {0}")]
    Ssm(String),
}

pub type Result<T> = std::result::Result<T, CredsError>;
