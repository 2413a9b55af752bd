pub mod error;
pub mod loader;
pub mod patch;

pub use error::{RefDbError, Result};
pub use loader::load;
pub use patch::apply_patch_file;
