use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to write manifest file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode manifest as JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ManifestError>;
