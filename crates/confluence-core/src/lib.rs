pub mod continent;
pub mod error;
pub mod observed;
pub mod reference_db;
pub mod types;

pub use continent::Continent;
pub use error::{CoreError, Result};
pub use observed::ObservedReaches;
pub use reference_db::{NodeRecord, PatchValue, ReferenceDb};
pub use types::{AlgorithmProfile, Direction, InversionSet, NodeId, Reach, ReachId};
