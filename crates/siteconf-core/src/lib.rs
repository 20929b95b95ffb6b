//! Siteconf Core - revision history domain
//!
//! This crate provides the pieces the revision engine is assembled from:
//! - Configuration snapshot and user models
//! - Opaque, kind-tagged identities used for ids and cursors
//! - Collaborator ports (`SnapshotStore`, `UserDirectory`)
//! - Author resolution with cooperative cancellation
//! - Redaction of sensitive values and structural diffing
//! - Structured errors and the logging facility

pub mod author;
pub mod cancellation;
pub mod diff;
pub mod errors;
pub mod identity;
pub mod logging_facility;
pub mod model;
pub mod redaction;
pub mod store;

// Re-export commonly used types
pub use author::AuthorResolver;
pub use cancellation::run_cancellable;
pub use diff::{ContentDiffer, DiffEngine, DiffStrategy, RenderedDiff, StructuralDiffer};
pub use errors::{ExError, ExErrorKind, Result, SiteConfigError};
pub use identity::OpaqueId;
pub use model::{ConfigurationSnapshot, SnapshotId, UserId, UserIdentity};
pub use redaction::{RedactionPolicy, Redactor};
pub use store::{PageDirection, SnapshotPage, SnapshotStore, UserDirectory};
