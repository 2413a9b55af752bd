use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShapefileError {
    #[error("fetching granule failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("granule object was not a valid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("granule zip did not contain a member named {0}")]
    MissingMember(String),

    #[error("DBF records could not be read: {0}")]
    Dbf(String),

    #[error("sidecar XML could not be parsed: {0}")]
    Sidecar(String),

    #[error("granule {uri} authorization failed, credentials need refreshing")]
    Unauthorized { uri: String },

    #[error("task join failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("local shapefile directory read failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShapefileError>;
