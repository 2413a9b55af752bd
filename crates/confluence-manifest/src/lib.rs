//! Pure functions that shape pipeline outputs into the JSON manifests
//! SPOT/SWORD downstream tooling expects, plus `ManifestWriter` to put them
//! on disk. Every `*_records`/`*_json` function is a pure function of its
//! inputs; the only I/O lives in `writer`.

pub mod basin;
pub mod cycle_pass;
pub mod error;
pub mod reach;
pub mod reach_node;
pub mod records;
pub mod s3;
pub mod sets;
pub mod writer;

pub use basin::basin_records;
pub use cycle_pass::{cycle_passes_json, passes_json};
pub use error::{ManifestError, Result};
pub use reach::reach_records;
pub use reach_node::{reach_node_records, ReachNodeEntry};
pub use records::{BasinRecord, ReachRecord};
pub use s3::{s3_list_json, s3_reach_json};
pub use sets::set_records;
pub use writer::ManifestWriter;
