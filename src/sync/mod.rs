// stocksync/src/sync/mod.rs
pub(crate) mod descriptor;
pub(crate) mod location;
pub(crate) mod logic;
pub(crate) mod product;
pub(crate) mod report;

use anyhow::{Context, Result};
use tracing::info;

use crate::catalog::{CatalogClient, OdooSession};
use crate::config::{AppConfig, FileConfig};
use crate::utils::files::{read_json, write_json_pretty};
use report::{OutcomeReport, StockRecord};

/// Public entry point for the stock sync process.
///
/// Authentication is fatal: if it fails no report is written.
pub async fn run_sync_flow(app_config: &AppConfig) -> Result<()> {
    let session = OdooSession::authenticate(&app_config.odoo)
        .await
        .context("Failed to authenticate against Odoo")?;

    run_sync_with(&session, &app_config.files).await?;
    Ok(())
}

/// Reads the stock input, reconciles every record against `client` and writes
/// the report.
///
/// An unreadable or malformed input aborts before the record loop and leaves no
/// report file behind. Once the loop starts, every record ends up in the report.
pub async fn run_sync_with<C>(client: &C, files: &FileConfig) -> Result<OutcomeReport>
where
    C: CatalogClient + ?Sized,
{
    let records: Vec<StockRecord> = read_json(&files.stock_input)
        .context("Failed to load stock input records")?;
    info!(records = records.len(), input = %files.stock_input.display(), "loaded stock input");

    let report = logic::reconcile_stock(client, &records).await;

    write_json_pretty(&files.stock_report, &report).context("Failed to write stock report")?;
    info!(
        records = report.total(),
        success = report.success.len(),
        not_found = report.not_found.len(),
        errors = report.errors.len(),
        output = %files.stock_report.display(),
        "stock sync finished"
    );
    Ok(report)
}
