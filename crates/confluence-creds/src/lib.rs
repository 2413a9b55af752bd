pub mod broker;
pub mod credentials;
pub mod error;
pub mod ssm;

pub use broker::CredentialBroker;
pub use credentials::Credentials;
pub use error::{CredsError, Result};
