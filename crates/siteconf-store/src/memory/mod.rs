//! In-memory collaborators
//!
//! State sits behind `tokio::sync::RwLock` so concurrent resolutions read
//! in parallel; clones share the same state.

pub mod snapshots;
pub mod users;

pub use snapshots::InMemorySnapshotStore;
pub use users::InMemoryUserDirectory;
