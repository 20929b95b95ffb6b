//! Serializable revision shape handed to the query layer

use chrono::{DateTime, Utc};
use serde::Serialize;
use siteconf_core::identity::OpaqueId;
use siteconf_core::{ExError, UserIdentity};

use crate::resolver::history::PageInfo;

/// One fully resolved revision
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionNode {
    pub id: OpaqueId,
    pub previous_id: Option<OpaqueId>,
    pub author: AuthorField,
    /// `None` when the diff could not be produced safely (see `errors`)
    pub diff: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Fields that degraded instead of failing the whole node
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// Author as exposed to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AuthorField {
    /// System-generated revision with no human author
    System,
    #[serde(rename_all = "camelCase")]
    User {
        id: OpaqueId,
        username: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
    },
    /// The author account no longer resolves
    Unknown { id: OpaqueId },
}

impl From<UserIdentity> for AuthorField {
    fn from(user: UserIdentity) -> Self {
        AuthorField::User {
            id: user.id.to_opaque(),
            username: user.username,
            display_name: user.display_name,
        }
    }
}

/// A field that resolved to a placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, err: &ExError) -> Self {
        Self {
            field: field.to_string(),
            code: err.code().to_string(),
            message: err.message().to_string(),
        }
    }
}

/// A history page rendered for output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryConnection {
    pub nodes: Vec<RevisionNode>,
    pub page_info: PageInfo,
    pub total_count: u64,
}
