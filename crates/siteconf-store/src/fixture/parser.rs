//! Fixture parser with validation
//!
//! Parses YAML and validates schema version, id uniqueness, author
//! references and timestamp order.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::errors::{fixture_validation, io_error, FixtureError, Result};
use crate::fixture::format_v0::FixtureV0;

/// Parse a fixture file from a path
///
/// # Errors
///
/// `Io` when the file cannot be read, `InvalidInput` when it does not parse
/// or validate.
pub fn parse_fixture_file(path: &Path) -> Result<FixtureV0> {
    let content = fs::read_to_string(path).map_err(|e| io_error("fixture_read", e))?;
    parse_fixture_str(&content)
}

/// Parse a fixture from a string
///
/// # Errors
///
/// `InvalidInput` when the YAML does not parse or validate.
pub fn parse_fixture_str(content: &str) -> Result<FixtureV0> {
    let fixture: FixtureV0 = serde_yaml::from_str(content)
        .map_err(|e| fixture_validation(&format!("YAML parse error: {}", e)))?;

    validate_fixture(&fixture)?;

    Ok(fixture)
}

fn validate_fixture(fixture: &FixtureV0) -> std::result::Result<(), FixtureError> {
    if fixture.schema_version != 0 {
        return Err(FixtureError::UnsupportedVersion {
            found: fixture.schema_version,
        });
    }

    let mut user_ids = HashSet::new();
    for user in &fixture.users {
        if user.id <= 0 {
            return Err(FixtureError::NonPositiveId {
                entity: "User",
                id: i64::from(user.id),
            });
        }
        if !user_ids.insert(user.id) {
            return Err(FixtureError::DuplicateId {
                entity: "User",
                id: i64::from(user.id),
            });
        }
    }

    let mut snapshot_ids = HashSet::new();
    for snapshot in &fixture.snapshots {
        if snapshot.id <= 0 {
            return Err(FixtureError::NonPositiveId {
                entity: "Snapshot",
                id: snapshot.id,
            });
        }
        if !snapshot_ids.insert(snapshot.id) {
            return Err(FixtureError::DuplicateId {
                entity: "Snapshot",
                id: snapshot.id,
            });
        }

        if let Some(author) = snapshot.author {
            if author == 0 {
                return Err(FixtureError::SentinelAuthor {
                    snapshot_id: snapshot.id,
                    author,
                });
            }
            if !user_ids.contains(&author) {
                return Err(FixtureError::UnknownAuthor {
                    snapshot_id: snapshot.id,
                    author,
                });
            }
        }

        if snapshot
            .updated_at
            .is_some_and(|updated| updated < snapshot.created_at)
        {
            return Err(FixtureError::TimestampOrder {
                snapshot_id: snapshot.id,
            });
        }
    }

    Ok(())
}
