//! Opaque external identities
//!
//! An opaque id is the URL-safe base64 (padded) encoding of
//! `"<Kind>:<json raw id>"`, e.g. `SiteConfiguration:1`. The kind tag keeps
//! ids of different entity kinds apart even when their raw ids collide, and
//! the same encoding doubles as the pagination cursor.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::errors::{ExError, SiteConfigError};
use crate::model::{SnapshotId, UserId};

/// Kind tag for configuration snapshots
pub const SITE_CONFIGURATION_KIND: &str = "SiteConfiguration";

/// Kind tag for users (authors)
pub const USER_KIND: &str = "User";

/// An encoded, externally visible identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpaqueId(String);

impl OpaqueId {
    /// Wrap a string received from a caller (not validated until decoded)
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for OpaqueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode a raw id under a kind tag
///
/// Deterministic: the same `(kind, raw_id)` always yields the same id.
/// Kinds are the constants in this module and never contain `:`.
pub fn encode(kind: &str, raw_id: i64) -> OpaqueId {
    debug_assert!(!kind.is_empty() && !kind.contains(':'));
    OpaqueId(URL_SAFE.encode(format!("{}:{}", kind, raw_id)))
}

/// Decode an opaque id into its kind tag and raw id
///
/// # Errors
///
/// `MalformedId` when the input is not base64, not UTF-8, has no kind tag,
/// or the raw part is not an integer.
pub fn decode(opaque: &str) -> Result<(String, i64), ExError> {
    let malformed = |reason: &str| -> ExError {
        ExError::from(SiteConfigError::MalformedId {
            id: opaque.to_string(),
            reason: reason.to_string(),
        })
        .with_op("decode_id")
    };

    let bytes = URL_SAFE
        .decode(opaque.as_bytes())
        .map_err(|_| malformed("not valid base64"))?;
    let text = String::from_utf8(bytes).map_err(|_| malformed("not valid UTF-8"))?;
    let (kind, raw) = text
        .split_once(':')
        .ok_or_else(|| malformed("missing kind separator"))?;
    if kind.is_empty() {
        return Err(malformed("empty kind tag"));
    }
    let raw_id: i64 = serde_json::from_str(raw).map_err(|_| malformed("raw id is not an integer"))?;

    Ok((kind.to_string(), raw_id))
}

/// Decode an opaque id that must carry `expected_kind`
///
/// # Errors
///
/// `MalformedId` for undecodable input or a different kind tag.
pub fn decode_expected(expected_kind: &str, opaque: &str) -> Result<i64, ExError> {
    let (kind, raw_id) = decode(opaque)?;
    if kind != expected_kind {
        return Err(ExError::from(SiteConfigError::KindMismatch {
            id: opaque.to_string(),
            expected: expected_kind.to_string(),
            found: kind,
        })
        .with_op("decode_id"));
    }
    Ok(raw_id)
}

impl SnapshotId {
    /// External identity of this snapshot
    pub fn to_opaque(self) -> OpaqueId {
        encode(SITE_CONFIGURATION_KIND, self.get())
    }

    /// Parse an external snapshot identity (also used for history cursors)
    ///
    /// # Errors
    ///
    /// `MalformedId` when the id is undecodable or not a snapshot id.
    pub fn from_opaque(opaque: &str) -> Result<Self, ExError> {
        decode_expected(SITE_CONFIGURATION_KIND, opaque).map(SnapshotId::new)
    }
}

impl UserId {
    /// External identity of this user
    pub fn to_opaque(self) -> OpaqueId {
        encode(USER_KIND, i64::from(self.get()))
    }
}
