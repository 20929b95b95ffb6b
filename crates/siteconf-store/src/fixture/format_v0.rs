//! History fixture format v0
//!
//! ```yaml
//! schema_version: 0
//! users:
//!   - id: 42
//!     username: ops
//! snapshots:
//!   - id: 1
//!     created_at: 2026-01-01T00:00:00Z
//!     contents: |
//!       foo: 1
//!   - id: 2
//!     author: 42
//!     created_at: 2026-01-02T00:00:00Z
//!     contents: |
//!       foo: 2
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level fixture file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    #[serde(default)]
    pub users: Vec<FixtureUser>,

    /// Revisions in any order; ids define history order
    pub snapshots: Vec<FixtureSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureUser {
    pub id: i32,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureSnapshot {
    pub id: i64,

    /// Omitted or null for system-authored revisions
    #[serde(default)]
    pub author: Option<i32>,

    pub created_at: DateTime<Utc>,

    /// Defaults to `created_at`
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    pub contents: String,
}
