//! A snapshot paired with its predecessor

use std::sync::Arc;

use chrono::{DateTime, Utc};
use siteconf_core::errors::{ExErrorKind, Result, SiteConfigError};
use siteconf_core::identity::OpaqueId;
use siteconf_core::{
    log_op_end, log_op_error, log_op_start, AuthorResolver, ConfigurationSnapshot, DiffEngine,
    ExError, RenderedDiff, UserIdentity,
};
use siteconf_core_types::RequestContext;

use crate::resolver::node::{AuthorField, FieldError, RevisionNode};

/// Read-only view of one revision
///
/// Built per query and never mutated; the predecessor is resolved before
/// construction so every accessor except `author` is local.
#[derive(Clone)]
pub struct RevisionView {
    snapshot: ConfigurationSnapshot,
    previous: Option<ConfigurationSnapshot>,
    diff_engine: Arc<DiffEngine>,
    authors: AuthorResolver,
}

impl RevisionView {
    pub fn new(
        snapshot: ConfigurationSnapshot,
        previous: Option<ConfigurationSnapshot>,
        diff_engine: Arc<DiffEngine>,
        authors: AuthorResolver,
    ) -> Self {
        Self {
            snapshot,
            previous,
            diff_engine,
            authors,
        }
    }

    pub fn snapshot(&self) -> &ConfigurationSnapshot {
        &self.snapshot
    }

    pub fn previous(&self) -> Option<&ConfigurationSnapshot> {
        self.previous.as_ref()
    }

    pub fn id(&self) -> OpaqueId {
        self.snapshot.id().to_opaque()
    }

    /// `None` for the first revision
    pub fn previous_id(&self) -> Option<OpaqueId> {
        self.previous.as_ref().map(|p| p.id().to_opaque())
    }

    /// # Errors
    ///
    /// `NotFound` when the author no longer exists, `Cancelled` when the
    /// request is cancelled.
    pub async fn author(&self, ctx: &RequestContext) -> Result<Option<UserIdentity>> {
        self.authors
            .resolve_author(ctx, self.snapshot.author())
            .await
    }

    /// Redacted diff against the predecessor; empty for the first revision
    ///
    /// # Errors
    ///
    /// `RedactionFailed` when either side cannot be safely redacted.
    pub fn diff(&self) -> Result<String> {
        self.rendered_diff().map(RenderedDiff::into_text)
    }

    /// Diff text together with the strategy that produced it
    ///
    /// # Errors
    ///
    /// As for [`RevisionView::diff`].
    pub fn rendered_diff(&self) -> Result<RenderedDiff> {
        let snapshot_id = self.snapshot.id().get();
        log_op_start!("revision_diff", snapshot_id = snapshot_id);
        let start = std::time::Instant::now();

        let result = self
            .diff_engine
            .diff(&self.snapshot, self.previous.as_ref());

        let elapsed = start.elapsed().as_millis() as u64;
        match &result {
            Ok(rendered) => log_op_end!(
                "revision_diff",
                duration_ms = elapsed,
                snapshot_id = snapshot_id,
                strategy = ?rendered.strategy
            ),
            Err(e) => {
                let e_clone = e.clone();
                log_op_error!(
                    "revision_diff",
                    e_clone,
                    duration_ms = elapsed,
                    snapshot_id = snapshot_id
                );
            }
        }
        result
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.snapshot.created_at()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.snapshot.updated_at()
    }

    /// Resolve every field into a node
    ///
    /// A vanished author degrades to `AuthorField::Unknown` and a diff that
    /// cannot be redacted degrades to `diff: None`; both are listed in
    /// `errors`.
    ///
    /// # Errors
    ///
    /// `Cancelled` and collaborator failures propagate.
    pub async fn to_node(&self, ctx: &RequestContext) -> Result<RevisionNode> {
        if ctx.is_cancelled() {
            return Err(ExError::from(SiteConfigError::Cancelled {
                op: "revision_node".to_string(),
            })
            .with_request_id(ctx.request_id.clone()));
        }

        let mut errors = Vec::new();

        let author = match (self.snapshot.author(), self.author(ctx).await) {
            (_, Ok(None)) => AuthorField::System,
            (_, Ok(Some(user))) => AuthorField::from(user),
            (Some(user_id), Err(e)) if e.is_not_found() => {
                errors.push(FieldError::new("author", &e));
                AuthorField::Unknown {
                    id: user_id.to_opaque(),
                }
            }
            (_, Err(e)) => return Err(e),
        };

        let diff = match self.diff() {
            Ok(text) => Some(text),
            Err(e) if e.kind() == ExErrorKind::RedactionFailed => {
                errors.push(FieldError::new("diff", &e));
                None
            }
            Err(e) => return Err(e),
        };

        Ok(RevisionNode {
            id: self.id(),
            previous_id: self.previous_id(),
            author,
            diff,
            created_at: self.created_at(),
            updated_at: self.updated_at(),
            errors,
        })
    }
}

impl std::fmt::Debug for RevisionView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevisionView")
            .field("snapshot", &self.snapshot)
            .field("previous", &self.previous.as_ref().map(|p| p.id()))
            .finish_non_exhaustive()
    }
}
