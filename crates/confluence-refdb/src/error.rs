use thiserror::Error;

#[derive(Error, Debug)]
pub enum RefDbError {
    #[error("failed to open reference database: {0}")]
    Netcdf(#[from] netcdf::Error),

    #[error("reference database is missing expected group or variable: {0}")]
    Shape(String),

    #[error("patch file could not be read: {0}")]
    Patch(#[from] std::io::Error),

    #[error("patch file was not valid JSON: {0}")]
    PatchDecode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RefDbError>;
