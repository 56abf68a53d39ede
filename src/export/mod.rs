// stocksync/src/export/mod.rs
pub(crate) mod logic;

use anyhow::{Context, Result};
use tracing::info;

use crate::catalog::OdooSession;
use crate::config::AppConfig;
use crate::utils::files::write_json_pretty;

/// Public entry point for the catalog export.
/// Dumps every stockable product template with its variants and attribute lines.
pub async fn run_export_flow(app_config: &AppConfig) -> Result<()> {
    let session = OdooSession::authenticate(&app_config.odoo)
        .await
        .context("Failed to authenticate against Odoo")?;

    let catalog = logic::collect_catalog(&session)
        .await
        .context("Failed to read the product catalog")?;

    let output = &app_config.files.catalog_export;
    write_json_pretty(output, &catalog).context("Failed to write catalog export")?;
    info!(templates = catalog.len(), output = %output.display(), "catalog exported");
    Ok(())
}
