//! Author attribution for snapshots

use std::sync::Arc;

use siteconf_core_types::RequestContext;

use crate::cancellation::run_cancellable;
use crate::errors::Result;
use crate::model::{UserId, UserIdentity};
use crate::store::UserDirectory;

/// Maps a snapshot's optional author to a user identity
#[derive(Clone)]
pub struct AuthorResolver {
    directory: Arc<dyn UserDirectory>,
}

impl AuthorResolver {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve the author of a snapshot
    ///
    /// `None` is a system-authored snapshot and resolves to `Ok(None)`
    /// without touching the directory.
    ///
    /// # Errors
    ///
    /// `NotFound` when the author no longer exists, `Cancelled` when the
    /// request is cancelled during the lookup.
    pub async fn resolve_author(
        &self,
        ctx: &RequestContext,
        author: Option<UserId>,
    ) -> Result<Option<UserIdentity>> {
        let Some(user_id) = author else {
            return Ok(None);
        };

        let user = run_cancellable(ctx, "resolve_author", self.directory.get_user_by_id(user_id))
            .await
            .map_err(|e| e.with_request_id(ctx.request_id.clone()))?;

        Ok(Some(user))
    }
}

impl std::fmt::Debug for AuthorResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ExErrorKind, SiteConfigError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingDirectory {
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl UserDirectory for CountingDirectory {
        async fn get_user_by_id(&self, id: UserId) -> Result<UserIdentity> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if id.get() == 42 {
                Ok(UserIdentity::new(id, "ops"))
            } else {
                Err(SiteConfigError::UserNotFound { user_id: id.get() }.into())
            }
        }
    }

    fn resolver() -> (AuthorResolver, Arc<CountingDirectory>) {
        let dir = Arc::new(CountingDirectory::default());
        (AuthorResolver::new(dir.clone()), dir)
    }

    #[tokio::test]
    async fn test_absent_author_skips_lookup() {
        let (resolver, dir) = resolver();
        let ctx = RequestContext::new();

        assert_eq!(resolver.resolve_author(&ctx, None).await.unwrap(), None);
        assert_eq!(dir.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_existing_author_resolves() {
        let (resolver, _) = resolver();
        let ctx = RequestContext::new();

        let user = resolver
            .resolve_author(&ctx, UserId::new(42))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.username, "ops");
    }

    #[tokio::test]
    async fn test_missing_author_is_not_found() {
        let (resolver, _) = resolver();
        let ctx = RequestContext::new();

        let err = resolver
            .resolve_author(&ctx, UserId::new(7))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(err.request_id(), Some(&ctx.request_id));
    }

    #[tokio::test]
    async fn test_cancelled_context_reports_cancelled() {
        let (resolver, dir) = resolver();
        let ctx = RequestContext::new();
        ctx.cancel();

        let err = resolver
            .resolve_author(&ctx, UserId::new(42))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Cancelled);
        assert_eq!(dir.lookups.load(Ordering::SeqCst), 0);
    }
}
