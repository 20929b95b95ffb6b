//! Collaborator ports
//!
//! The revision engine never owns persistence. It reads snapshots through
//! `SnapshotStore` and authors through `UserDirectory`; both are shared as
//! `Arc<dyn ...>` across concurrent resolutions.

use async_trait::async_trait;

use crate::errors::Result;
use crate::model::{ConfigurationSnapshot, SnapshotId, UserId, UserIdentity};

/// Scan direction over the id-ordered snapshot sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    /// Increasing ids (oldest first), strictly after the cursor
    Ascending,
    /// Decreasing ids (newest first), strictly before the cursor
    Descending,
}

/// One page of snapshots in the requested direction
#[derive(Debug, Clone, Default)]
pub struct SnapshotPage {
    pub snapshots: Vec<ConfigurationSnapshot>,
    /// Id of the last returned snapshot when more remain in this direction
    pub next_cursor: Option<SnapshotId>,
}

impl SnapshotPage {
    /// Build a page from `limit + 1` fetched rows
    ///
    /// The extra row only signals that more remain; it is dropped.
    pub fn from_overshot(mut rows: Vec<ConfigurationSnapshot>, limit: usize) -> Self {
        let has_more = rows.len() > limit;
        rows.truncate(limit);
        let next_cursor = if has_more {
            rows.last().map(ConfigurationSnapshot::id)
        } else {
            None
        };
        Self {
            snapshots: rows,
            next_cursor,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Ordered snapshot storage
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Fetch one snapshot
    ///
    /// # Errors
    ///
    /// `NotFound` when no snapshot has this id.
    async fn get_by_id(&self, id: SnapshotId) -> Result<ConfigurationSnapshot>;

    /// The snapshot with the largest id strictly below `id`
    ///
    /// Returns `Ok(None)` for the first snapshot. `id` itself need not exist.
    ///
    /// # Errors
    ///
    /// Collaborator failures only.
    async fn get_previous(&self, id: SnapshotId) -> Result<Option<ConfigurationSnapshot>>;

    /// List up to `limit` snapshots strictly beyond `cursor` in `direction`
    ///
    /// Without a cursor the scan starts at the newest (descending) or
    /// oldest (ascending) snapshot.
    ///
    /// # Errors
    ///
    /// Collaborator failures only.
    async fn list_page(
        &self,
        cursor: Option<SnapshotId>,
        limit: usize,
        direction: PageDirection,
    ) -> Result<SnapshotPage>;

    /// Total number of snapshots
    ///
    /// # Errors
    ///
    /// Collaborator failures only.
    async fn count(&self) -> Result<u64>;
}

/// User lookup for author attribution
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// # Errors
    ///
    /// `NotFound` when the user does not exist.
    async fn get_user_by_id(&self, id: UserId) -> Result<UserIdentity>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn snap(id: i64) -> ConfigurationSnapshot {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        ConfigurationSnapshot::created(SnapshotId::new(id), "{}", None, at)
    }

    #[test]
    fn test_from_overshot_sets_cursor_when_more_remain() {
        let page = SnapshotPage::from_overshot(vec![snap(5), snap(4), snap(3)], 2);
        assert_eq!(page.snapshots.len(), 2);
        assert_eq!(page.next_cursor, Some(SnapshotId::new(4)));
    }

    #[test]
    fn test_from_overshot_exact_fit_has_no_cursor() {
        let page = SnapshotPage::from_overshot(vec![snap(2), snap(1)], 2);
        assert_eq!(page.snapshots.len(), 2);
        assert_eq!(page.next_cursor, None);
    }
}
