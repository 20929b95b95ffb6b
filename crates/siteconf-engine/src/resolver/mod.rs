//! Revision resolution façade
//!
//! Every operation takes a `RequestContext`; all store and directory calls
//! race its cancellation token, and a cancelled request reports `Cancelled`
//! rather than a partial result.

pub mod history;
pub mod node;
pub mod revision;

use std::sync::Arc;
use std::time::Instant;

use futures::future::try_join_all;
use siteconf_core::errors::Result;
use siteconf_core::store::{PageDirection, SnapshotStore, UserDirectory};
use siteconf_core::{
    log_op_end, log_op_error, log_op_start, run_cancellable, AuthorResolver, ConfigurationSnapshot,
    DiffEngine, SnapshotId,
};
use siteconf_core_types::RequestContext;

use crate::config::{EngineConfig, HistoryConfig};
use history::PageRequest;

pub use history::{HistoryArgs, HistoryPage, PageInfo};
pub use node::{AuthorField, FieldError, HistoryConnection, RevisionNode};
pub use revision::RevisionView;

/// Answers revision and history queries over injected collaborators
#[derive(Clone)]
pub struct RevisionResolver {
    store: Arc<dyn SnapshotStore>,
    authors: AuthorResolver,
    diff_engine: Arc<DiffEngine>,
    history: HistoryConfig,
}

impl RevisionResolver {
    /// Build a resolver with the default differ and the configured policy
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the configuration does not validate.
    pub fn new(
        store: Arc<dyn SnapshotStore>,
        users: Arc<dyn UserDirectory>,
        config: &EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        let diff_engine = DiffEngine::from_policy(&config.redaction)?;
        Ok(Self::with_diff_engine(
            store,
            users,
            diff_engine,
            config.history.clone(),
        ))
    }

    /// Build a resolver around a preassembled diff engine
    pub fn with_diff_engine(
        store: Arc<dyn SnapshotStore>,
        users: Arc<dyn UserDirectory>,
        diff_engine: DiffEngine,
        history: HistoryConfig,
    ) -> Self {
        Self {
            store,
            authors: AuthorResolver::new(users),
            diff_engine: Arc::new(diff_engine),
            history,
        }
    }

    /// Look a revision up by its opaque id
    ///
    /// # Errors
    ///
    /// `MalformedId` for an undecodable or non-snapshot id, `NotFound` when
    /// no snapshot has that id, `Cancelled` when the request is cancelled.
    pub async fn revision(&self, ctx: &RequestContext, id: &str) -> Result<RevisionView> {
        log_op_start!("revision_get", request_id = ctx.request_id.as_str());
        let start = Instant::now();

        let result = self
            .revision_impl(ctx, id)
            .await
            .map_err(|e| e.with_request_id(ctx.request_id.clone()));

        let elapsed = start.elapsed().as_millis() as u64;
        match &result {
            Ok(view) => log_op_end!(
                "revision_get",
                duration_ms = elapsed,
                request_id = ctx.request_id.as_str(),
                snapshot_id = view.snapshot().id().get()
            ),
            Err(e) => {
                let e_clone = e.clone();
                log_op_error!(
                    "revision_get",
                    e_clone,
                    duration_ms = elapsed,
                    request_id = ctx.request_id.as_str()
                );
            }
        }
        result
    }

    async fn revision_impl(&self, ctx: &RequestContext, id: &str) -> Result<RevisionView> {
        let snapshot_id = SnapshotId::from_opaque(id)?;
        let snapshot = run_cancellable(ctx, "get_by_id", self.store.get_by_id(snapshot_id)).await?;
        self.view(ctx, snapshot).await
    }

    /// Pair a snapshot with its true predecessor
    ///
    /// # Errors
    ///
    /// `Cancelled` or collaborator failures.
    pub async fn view(
        &self,
        ctx: &RequestContext,
        snapshot: ConfigurationSnapshot,
    ) -> Result<RevisionView> {
        let previous = run_cancellable(
            ctx,
            "get_previous",
            self.store.get_previous(snapshot.id()),
        )
        .await?;
        Ok(RevisionView::new(
            snapshot,
            previous,
            self.diff_engine.clone(),
            self.authors.clone(),
        ))
    }

    /// One page of history, newest first
    ///
    /// # Errors
    ///
    /// `InvalidInput` for conflicting or zero-sized arguments, `MalformedId`
    /// for a bad cursor, `Cancelled` when the request is cancelled.
    pub async fn history(&self, ctx: &RequestContext, args: HistoryArgs) -> Result<HistoryPage> {
        log_op_start!("revision_history", request_id = ctx.request_id.as_str());
        let start = Instant::now();

        let result = self
            .history_impl(ctx, &args)
            .await
            .map_err(|e| e.with_request_id(ctx.request_id.clone()));

        let elapsed = start.elapsed().as_millis() as u64;
        match &result {
            Ok(page) => log_op_end!(
                "revision_history",
                duration_ms = elapsed,
                request_id = ctx.request_id.as_str(),
                page_len = page.items.len() as u64
            ),
            Err(e) => {
                let e_clone = e.clone();
                log_op_error!(
                    "revision_history",
                    e_clone,
                    duration_ms = elapsed,
                    request_id = ctx.request_id.as_str()
                );
            }
        }
        result
    }

    async fn history_impl(&self, ctx: &RequestContext, args: &HistoryArgs) -> Result<HistoryPage> {
        let request = PageRequest::from_args(args, &self.history)?;

        let (snapshots, has_next_page, has_previous_page, total_count) = match request {
            PageRequest::Forward { size, after } => {
                let (page, newer_exist, total) = tokio::try_join!(
                    run_cancellable(
                        ctx,
                        "list_page",
                        self.store.list_page(after, size, PageDirection::Descending),
                    ),
                    self.exists_from(ctx, after, PageDirection::Ascending),
                    run_cancellable(ctx, "count", self.store.count()),
                )?;
                let more = page.next_cursor.is_some();
                (page.snapshots, more, newer_exist, total)
            }
            PageRequest::Backward { size, before } => {
                let (page, older_exist, total) = tokio::try_join!(
                    run_cancellable(
                        ctx,
                        "list_page",
                        self.store.list_page(before, size, PageDirection::Ascending),
                    ),
                    self.exists_from(ctx, before, PageDirection::Descending),
                    run_cancellable(ctx, "count", self.store.count()),
                )?;
                let more = page.next_cursor.is_some();
                // Ascending scan; flip to newest first
                let mut snapshots = page.snapshots;
                snapshots.reverse();
                (snapshots, older_exist, more, total)
            }
        };

        let items = try_join_all(snapshots.into_iter().map(|s| self.view(ctx, s))).await?;

        let page_info = PageInfo {
            has_next_page,
            has_previous_page,
            start_cursor: items.first().map(RevisionView::id),
            end_cursor: items.last().map(RevisionView::id),
        };

        Ok(HistoryPage {
            items,
            page_info,
            total_count,
        })
    }

    /// Whether any snapshot lies at or beyond `cursor` in `direction`
    ///
    /// Used for the flag opposite the paging direction; no cursor means the
    /// page started at the end of history, so nothing lies beyond it.
    async fn exists_from(
        &self,
        ctx: &RequestContext,
        cursor: Option<SnapshotId>,
        direction: PageDirection,
    ) -> Result<bool> {
        let Some(cursor) = cursor else {
            return Ok(false);
        };
        // Step one id back so the cursor snapshot itself counts
        let peek_from = match direction {
            PageDirection::Ascending => SnapshotId::new(cursor.get().saturating_sub(1)),
            PageDirection::Descending => SnapshotId::new(cursor.get().saturating_add(1)),
        };
        let neighbour = run_cancellable(
            ctx,
            "list_page",
            self.store.list_page(Some(peek_from), 1, direction),
        )
        .await?;
        Ok(!neighbour.is_empty())
    }

    /// Render every revision of a page as a node, concurrently
    ///
    /// # Errors
    ///
    /// The first non-degradable field failure, typically `Cancelled`.
    pub async fn resolve_nodes(
        &self,
        ctx: &RequestContext,
        page: &HistoryPage,
    ) -> Result<Vec<RevisionNode>> {
        try_join_all(page.items.iter().map(|view| view.to_node(ctx)))
            .await
            .map_err(|e| e.with_request_id(ctx.request_id.clone()))
    }

    /// Render a page together with its page info and total
    ///
    /// # Errors
    ///
    /// As for [`RevisionResolver::resolve_nodes`].
    pub async fn resolve_connection(
        &self,
        ctx: &RequestContext,
        page: &HistoryPage,
    ) -> Result<HistoryConnection> {
        Ok(HistoryConnection {
            nodes: self.resolve_nodes(ctx, page).await?,
            page_info: page.page_info.clone(),
            total_count: page.total_count,
        })
    }
}

impl std::fmt::Debug for RevisionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevisionResolver")
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}
