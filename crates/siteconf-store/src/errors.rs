//! Error handling for siteconf-store
//!
//! Wraps siteconf-core ExError with store-specific helpers

use siteconf_core::errors::{ExError, ExErrorKind};
use siteconf_core::SnapshotId;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Fixture problems that are not plain YAML syntax errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixtureError {
    #[error("Unsupported schema_version: {found}. Expected 0")]
    UnsupportedVersion { found: u32 },

    #[error("Duplicate {entity} id {id}")]
    DuplicateId { entity: &'static str, id: i64 },

    #[error("{entity} id {id} must be positive")]
    NonPositiveId { entity: &'static str, id: i64 },

    #[error("Snapshot {snapshot_id} author {author} is not a user; omit author for system snapshots")]
    SentinelAuthor { snapshot_id: i64, author: i32 },

    #[error("Snapshot {snapshot_id} references unknown author {author}")]
    UnknownAuthor { snapshot_id: i64, author: i32 },

    #[error("Snapshot {snapshot_id} has updated_at before created_at")]
    TimestampOrder { snapshot_id: i64 },
}

impl From<FixtureError> for ExError {
    fn from(err: FixtureError) -> Self {
        fixture_validation(&err.to_string())
    }
}

/// Create a fixture validation error
pub fn fixture_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("fixture_parse")
        .with_message(reason.to_string())
}

/// Create a duplicate snapshot error
pub fn duplicate_snapshot(snapshot_id: i64) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("insert_snapshot")
        .with_entity_id(snapshot_id.to_string())
        .with_message(format!("Snapshot {} already exists", snapshot_id))
}

/// Create an error for an append past the largest representable id
pub fn ids_exhausted(last: SnapshotId) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("append_snapshot")
        .with_entity_id(last.to_string())
        .with_message(format!("No snapshot id left after {}", last))
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_errors_are_invalid_input() {
        let err: ExError = FixtureError::UnknownAuthor {
            snapshot_id: 3,
            author: 9,
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert_eq!(err.op(), Some("fixture_parse"));
        assert!(err.message().contains("unknown author 9"));
    }
}
