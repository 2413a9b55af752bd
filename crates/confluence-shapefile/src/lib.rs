pub mod cycle;
pub mod error;
pub mod reader;
pub mod sidecar;

pub use cycle::CycleIndexer;
pub use error::{Result, ShapefileError};
pub use reader::{AggregatedRecords, GranuleRecords, ShapefileReader};
