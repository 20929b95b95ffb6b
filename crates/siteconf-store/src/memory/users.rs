use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use siteconf_core::errors::SiteConfigError;
use siteconf_core::store::UserDirectory;
use siteconf_core::{UserId, UserIdentity};
use tokio::sync::RwLock;

use crate::errors::Result;

/// Users known to the reference setup
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<UserId, UserIdentity>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user
    pub async fn insert(&self, user: UserIdentity) {
        self.users.write().await.insert(user.id, user);
    }

    /// Remove a user, e.g. to model an account deleted after authoring
    pub async fn remove(&self, id: UserId) -> Option<UserIdentity> {
        self.users.write().await.remove(&id)
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn get_user_by_id(&self, id: UserId) -> Result<UserIdentity> {
        self.users.read().await.get(&id).cloned().ok_or_else(|| {
            siteconf_core::ExError::from(SiteConfigError::UserNotFound { user_id: id.get() })
                .with_op("get_user_by_id")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_then_lookup_then_remove() {
        let dir = InMemoryUserDirectory::new();
        let id = UserId::new(42).unwrap();
        dir.insert(UserIdentity::new(id, "ops")).await;

        assert_eq!(dir.get_user_by_id(id).await.unwrap().username, "ops");

        dir.remove(id).await;
        assert!(dir.get_user_by_id(id).await.unwrap_err().is_not_found());
    }
}
