pub mod snapshot;
pub mod user;

pub use snapshot::{ConfigurationSnapshot, SnapshotId};
pub use user::{UserId, UserIdentity};
