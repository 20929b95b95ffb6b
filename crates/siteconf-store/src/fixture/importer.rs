//! Fixture importer
//!
//! Loads a validated fixture into fresh in-memory collaborators.

use std::path::Path;

use siteconf_core::{ConfigurationSnapshot, SnapshotId, UserId, UserIdentity};

use crate::errors::{fixture_validation, Result};
use crate::fixture::format_v0::FixtureV0;
use crate::fixture::parser::parse_fixture_file;
use crate::memory::{InMemorySnapshotStore, InMemoryUserDirectory};

/// Collaborators populated from a fixture
#[derive(Debug, Clone, Default)]
pub struct ImportedFixture {
    pub snapshots: InMemorySnapshotStore,
    pub users: InMemoryUserDirectory,
}

impl ImportedFixture {
    /// Parse, validate and import a fixture file
    ///
    /// # Errors
    ///
    /// See [`parse_fixture_file`] and [`import_fixture`].
    pub async fn load(path: &Path) -> Result<Self> {
        let fixture = parse_fixture_file(path)?;
        import_fixture(&fixture).await
    }
}

/// Import a parsed fixture
///
/// # Errors
///
/// `InvalidInput` for data the parser's validation would reject (fixtures
/// built in code skip that step).
pub async fn import_fixture(fixture: &FixtureV0) -> Result<ImportedFixture> {
    let imported = ImportedFixture::default();

    for user in &fixture.users {
        let id = UserId::new(user.id)
            .ok_or_else(|| fixture_validation(&format!("User id {} must be positive", user.id)))?;
        let mut identity = UserIdentity::new(id, user.username.clone());
        if let Some(display_name) = &user.display_name {
            identity = identity.with_display_name(display_name.clone());
        }
        imported.users.insert(identity).await;
    }

    for snapshot in &fixture.snapshots {
        let author = match snapshot.author {
            Some(raw) => Some(UserId::new(raw).ok_or_else(|| {
                fixture_validation(&format!(
                    "Snapshot {} author {} is not a user",
                    snapshot.id, raw
                ))
            })?),
            None => None,
        };
        let record = ConfigurationSnapshot::new(
            SnapshotId::new(snapshot.id),
            snapshot.contents.clone(),
            author,
            snapshot.created_at,
            snapshot.updated_at.unwrap_or(snapshot.created_at),
        )?;
        imported.snapshots.insert(record).await?;
    }

    tracing::debug!(
        users = fixture.users.len(),
        snapshots = fixture.snapshots.len(),
        "imported history fixture"
    );

    Ok(imported)
}
