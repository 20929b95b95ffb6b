pub mod diff;
pub mod history;
pub mod show;

use std::path::Path;
use std::sync::Arc;

use siteconf_engine::{load_config, EngineConfig, RevisionResolver};
use siteconf_store::ImportedFixture;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Load the fixture into memory and wire a resolver over it
pub async fn open_resolver(
    config: Option<&Path>,
    fixture: &Path,
) -> Result<RevisionResolver, Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };

    tracing::debug!(fixture = %fixture.display(), "loading history fixture");
    let imported = ImportedFixture::load(fixture).await?;

    let resolver = RevisionResolver::new(
        Arc::new(imported.snapshots),
        Arc::new(imported.users),
        &config,
    )?;
    Ok(resolver)
}
