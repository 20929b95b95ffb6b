//! Diff command
//!
//! Usage: siteconf diff --fixture <PATH> --id <OPAQUE_ID>
//!
//! Prints the diff text as-is; the first revision prints nothing.

use std::path::{Path, PathBuf};

use clap::Args;
use siteconf_core_types::RequestContext;

use super::{open_resolver, CmdResult};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// History fixture (YAML)
    #[arg(long)]
    pub fixture: PathBuf,

    /// Opaque revision id
    #[arg(long)]
    pub id: String,
}

pub async fn execute(config: Option<&Path>, args: DiffArgs) -> CmdResult {
    let resolver = open_resolver(config, &args.fixture).await?;
    let ctx = RequestContext::new();

    let diff = resolver.revision(&ctx, &args.id).await?.diff()?;

    print!("{}", diff);
    Ok(())
}
