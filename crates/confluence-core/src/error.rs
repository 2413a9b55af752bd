use thiserror::Error;

/// Errors surfaced by the data-model and reference-DB layer.
///
/// Variants map directly onto the failure kinds in the error-handling design:
/// `Topology`/`NotFound` are walk terminators a caller is expected to absorb,
/// everything else is fatal to the operation that produced it.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("reach {0} not found in reference database")]
    NotFound(i64),

    #[error("topology anomaly at reach {reach}: {detail}")]
    Topology { reach: i64, detail: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
