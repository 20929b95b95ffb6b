use serde::Serialize;

/// Identifier of a user in the external identity source
///
/// Always a real id: the "no author" state is expressed as `Option<UserId>`
/// rather than a zero sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw user id
    ///
    /// Returns `None` for ids that cannot name a user (zero or negative).
    pub fn new(raw: i32) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    /// Convert an author column that uses `0` for "system authored"
    ///
    /// This is the only place the legacy sentinel is interpreted.
    pub fn from_legacy_column(raw: i32) -> Option<Self> {
        Self::new(raw)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved author
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdentity {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl UserIdentity {
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_not_a_user() {
        assert_eq!(UserId::from_legacy_column(0), None);
        assert_eq!(UserId::new(-3), None);
        assert_eq!(UserId::from_legacy_column(42).map(UserId::get), Some(42));
    }

    #[test]
    fn test_identity_serializes_without_empty_display_name() {
        let user = UserIdentity::new(UserId::new(1).unwrap(), "alice");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "username": "alice"}));
    }
}
