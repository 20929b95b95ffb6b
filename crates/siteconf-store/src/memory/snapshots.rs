use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use siteconf_core::errors::SiteConfigError;
use siteconf_core::store::{PageDirection, SnapshotPage, SnapshotStore};
use siteconf_core::{ConfigurationSnapshot, SnapshotId, UserId};
use tokio::sync::RwLock;

use crate::errors::{duplicate_snapshot, ids_exhausted, Result};

/// Snapshot history kept in id order
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStore {
    snapshots: Arc<RwLock<BTreeMap<SnapshotId, ConfigurationSnapshot>>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new revision, assigning the next id
    ///
    /// Ids start at 1 and always exceed every existing id.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the newest id is already `i64::MAX`.
    pub async fn append(
        &self,
        contents: impl Into<String>,
        author: Option<UserId>,
        at: DateTime<Utc>,
    ) -> Result<SnapshotId> {
        let mut snapshots = self.snapshots.write().await;
        let next = match snapshots.keys().next_back() {
            Some(last) => last.get().checked_add(1).ok_or_else(|| ids_exhausted(*last))?,
            None => 1,
        };
        let id = SnapshotId::new(next);
        snapshots.insert(id, ConfigurationSnapshot::created(id, contents, author, at));

        tracing::debug!(snapshot_id = id.get(), "appended snapshot");
        Ok(id)
    }

    /// Insert a snapshot with its own id (fixture import)
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the id is already taken.
    pub async fn insert(&self, snapshot: ConfigurationSnapshot) -> Result<()> {
        let mut snapshots = self.snapshots.write().await;
        let id = snapshot.id();
        if snapshots.contains_key(&id) {
            return Err(duplicate_snapshot(id.get()));
        }
        snapshots.insert(id, snapshot);
        Ok(())
    }

    /// Replace a snapshot's contents in place
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `InvalidInput` when `at` precedes the
    /// snapshot's creation.
    pub async fn update_contents(
        &self,
        id: SnapshotId,
        contents: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<()> {
        let mut snapshots = self.snapshots.write().await;
        let snapshot = snapshots
            .get_mut(&id)
            .ok_or_else(|| not_found(id, "update_contents"))?;
        snapshot.update_contents(contents, at)
    }
}

fn not_found(id: SnapshotId, op: &str) -> siteconf_core::ExError {
    siteconf_core::ExError::from(SiteConfigError::SnapshotNotFound {
        snapshot_id: id.get(),
    })
    .with_op(op)
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn get_by_id(&self, id: SnapshotId) -> Result<ConfigurationSnapshot> {
        self.snapshots
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id, "get_by_id"))
    }

    async fn get_previous(&self, id: SnapshotId) -> Result<Option<ConfigurationSnapshot>> {
        Ok(self
            .snapshots
            .read()
            .await
            .range(..id)
            .next_back()
            .map(|(_, snapshot)| snapshot.clone()))
    }

    async fn list_page(
        &self,
        cursor: Option<SnapshotId>,
        limit: usize,
        direction: PageDirection,
    ) -> Result<SnapshotPage> {
        let snapshots = self.snapshots.read().await;
        let fetch = limit.saturating_add(1);

        let rows: Vec<ConfigurationSnapshot> = match direction {
            PageDirection::Descending => {
                let upper = cursor.map_or(Bound::Unbounded, Bound::Excluded);
                snapshots
                    .range((Bound::Unbounded, upper))
                    .rev()
                    .take(fetch)
                    .map(|(_, s)| s.clone())
                    .collect()
            }
            PageDirection::Ascending => {
                let lower = cursor.map_or(Bound::Unbounded, Bound::Excluded);
                snapshots
                    .range((lower, Bound::Unbounded))
                    .take(fetch)
                    .map(|(_, s)| s.clone())
                    .collect()
            }
        };

        Ok(SnapshotPage::from_overshot(rows, limit))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.snapshots.read().await.len() as u64)
    }
}
