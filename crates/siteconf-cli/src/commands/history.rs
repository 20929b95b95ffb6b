//! History command
//!
//! Usage: siteconf history --fixture <PATH> [--first N [--after C] | --last N [--before C]]

use std::path::{Path, PathBuf};

use clap::Args;
use siteconf_core_types::RequestContext;
use siteconf_engine::HistoryArgs;

use super::{open_resolver, CmdResult};

#[derive(Debug, Args)]
pub struct HistoryCmdArgs {
    /// History fixture (YAML)
    #[arg(long)]
    pub fixture: PathBuf,

    /// Newest revisions to return
    #[arg(long, conflicts_with_all = ["last", "before"])]
    pub first: Option<usize>,

    /// Continue after this cursor (older revisions)
    #[arg(long, conflicts_with_all = ["last", "before"])]
    pub after: Option<String>,

    /// Oldest revisions to return
    #[arg(long)]
    pub last: Option<usize>,

    /// Continue before this cursor (newer revisions)
    #[arg(long)]
    pub before: Option<String>,
}

pub async fn execute(config: Option<&Path>, args: HistoryCmdArgs) -> CmdResult {
    let resolver = open_resolver(config, &args.fixture).await?;
    let ctx = RequestContext::new();

    let history_args = HistoryArgs {
        first: args.first,
        after: args.after,
        last: args.last,
        before: args.before,
    };
    let page = resolver.history(&ctx, history_args).await?;
    let connection = resolver.resolve_connection(&ctx, &page).await?;

    println!("{}", serde_json::to_string_pretty(&connection)?);
    Ok(())
}
