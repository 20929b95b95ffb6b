//! Configuration snapshot model
//!
//! One snapshot is one revision of the site configuration document. Contents
//! are wrapped in `Sensitive` so that debug output of a snapshot never prints
//! secrets embedded in the configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use siteconf_core_types::Sensitive;

use crate::errors::{ExError, SiteConfigError};
use crate::model::user::UserId;

/// Monotonically assigned snapshot identifier; the history ordering key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(i64);

impl SnapshotId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single revision of the site configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationSnapshot {
    id: SnapshotId,
    contents: Sensitive<String>,
    author: Option<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ConfigurationSnapshot {
    /// Build a snapshot, enforcing `updated_at >= created_at`
    ///
    /// # Errors
    ///
    /// `InvalidInput` when `updated_at` precedes `created_at`.
    pub fn new(
        id: SnapshotId,
        contents: impl Into<String>,
        author: Option<UserId>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ExError> {
        if updated_at < created_at {
            return Err(SiteConfigError::TimestampOrder {
                snapshot_id: id.get(),
            }
            .into());
        }
        Ok(Self {
            id,
            contents: Sensitive::new(contents.into()),
            author,
            created_at,
            updated_at,
        })
    }

    /// Snapshot created and last updated at the same instant
    pub fn created(
        id: SnapshotId,
        contents: impl Into<String>,
        author: Option<UserId>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            contents: Sensitive::new(contents.into()),
            author,
            created_at: at,
            updated_at: at,
        }
    }

    pub fn id(&self) -> SnapshotId {
        self.id
    }

    /// Raw configuration document; feed it to the redaction pass before display
    pub fn contents(&self) -> &str {
        self.contents.expose()
    }

    pub fn author(&self) -> Option<UserId> {
        self.author
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace the contents, moving `updated_at` forward
    ///
    /// `created_at` never changes. Writing identical contents is a no-op.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when `at` precedes `created_at`.
    pub fn update_contents(
        &mut self,
        contents: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<(), ExError> {
        let contents = contents.into();
        if contents == *self.contents.expose() {
            return Ok(());
        }
        if at < self.created_at {
            return Err(SiteConfigError::TimestampOrder {
                snapshot_id: self.id.get(),
            }
            .into());
        }
        self.contents = Sensitive::new(contents);
        self.updated_at = at;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_new_rejects_updated_before_created() {
        let err = ConfigurationSnapshot::new(
            SnapshotId::new(1),
            "{}",
            None,
            t0(),
            t0() - Duration::seconds(1),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_update_contents_moves_updated_at_only() {
        let mut snap = ConfigurationSnapshot::created(SnapshotId::new(1), "a: 1", None, t0());
        let later = t0() + Duration::minutes(5);

        snap.update_contents("a: 2", later).unwrap();

        assert_eq!(snap.contents(), "a: 2");
        assert_eq!(snap.created_at(), t0());
        assert_eq!(snap.updated_at(), later);
    }

    #[test]
    fn test_update_with_same_contents_keeps_timestamp() {
        let mut snap = ConfigurationSnapshot::created(SnapshotId::new(1), "a: 1", None, t0());

        snap.update_contents("a: 1", t0() + Duration::hours(1))
            .unwrap();

        assert_eq!(snap.updated_at(), t0());
    }

    #[test]
    fn test_debug_never_prints_contents() {
        let snap = ConfigurationSnapshot::created(
            SnapshotId::new(3),
            r#"{"password": "hunter2"}"#,
            None,
            t0(),
        );
        let debug = format!("{:?}", snap);
        assert!(!debug.contains("hunter2"));
    }
}
