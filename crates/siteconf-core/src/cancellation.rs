//! Cooperative cancellation of collaborator lookups

use std::future::Future;

use siteconf_core_types::RequestContext;

use crate::errors::{ExError, Result, SiteConfigError};

/// Race `fut` against the context's cancellation token
///
/// The lookup is dropped as soon as the token fires and the call reports
/// `Cancelled` instead of a partial result. A context that is already
/// cancelled never starts the lookup.
///
/// # Errors
///
/// `Cancelled` when the token fires first, otherwise whatever `fut` returns.
pub async fn run_cancellable<T, F>(ctx: &RequestContext, op: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let cancelled = || -> ExError {
        ExError::from(SiteConfigError::Cancelled { op: op.to_string() })
            .with_request_id(ctx.request_id.clone())
    };

    if ctx.is_cancelled() {
        return Err(cancelled());
    }

    tokio::select! {
        biased;
        _ = ctx.cancellation_token().cancelled() => Err(cancelled()),
        result = fut => result,
    }
}
