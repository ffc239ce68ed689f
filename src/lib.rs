//! Template catalog application: configuration, content sources, HTML rendering
//! and the HTTP query API on top of [`catalog_core`].

pub mod api;
pub mod config;
pub mod render;
pub mod sources;

use anyhow::Result;
use catalog_core::{LoadOutcome, Loader, TracingSink};

use crate::config::AppConfig;

/// Build the manifest and source described by `config` and load the catalog once.
pub async fn load_catalog(config: &AppConfig) -> Result<LoadOutcome> {
    let manifest = config.manifest()?;
    let source = config.content_source()?;
    tracing::info!(
        rows = manifest.len(),
        default_owner = manifest.default_owner(),
        "Loading template catalog"
    );

    let outcome = Loader::new(config.failure_policy)
        .load(&manifest, &source, &TracingSink)
        .await;
    Ok(outcome)
}
