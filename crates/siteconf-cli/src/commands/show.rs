//! Show command
//!
//! Usage: siteconf show --fixture <PATH> --id <OPAQUE_ID>

use std::path::{Path, PathBuf};

use clap::Args;
use siteconf_core_types::RequestContext;

use super::{open_resolver, CmdResult};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// History fixture (YAML)
    #[arg(long)]
    pub fixture: PathBuf,

    /// Opaque revision id
    #[arg(long)]
    pub id: String,
}

pub async fn execute(config: Option<&Path>, args: ShowArgs) -> CmdResult {
    let resolver = open_resolver(config, &args.fixture).await?;
    let ctx = RequestContext::new();

    let node = resolver.revision(&ctx, &args.id).await?.to_node(&ctx).await?;

    println!("{}", serde_json::to_string_pretty(&node)?);
    Ok(())
}
