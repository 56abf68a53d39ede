// stocksync/src/sync/logic.rs
use serde_json::json;
use tracing::{info, warn};

use super::descriptor;
use super::location::resolve_location;
use super::product::resolve_product;
use super::report::{
    ErrorEntry, NotFoundEntry, NotFoundReason, OutcomeReport, RecordOutcome, StockRecord,
    SuccessEntry,
};
use crate::catalog::CatalogClient;
use crate::errors::{AppError, Result};

const QUANT_MODEL: &str = "stock.quant";

/// Runs every record through the reconciliation pipeline, one at a time and in
/// input order, and folds the outcomes into a report.
///
/// Never fails: a record whose backend calls fault ends up in `errors` and the
/// loop moves on.
pub async fn reconcile_stock<C>(client: &C, records: &[StockRecord]) -> OutcomeReport
where
    C: CatalogClient + ?Sized,
{
    let mut report = OutcomeReport::default();
    for (index, record) in records.iter().enumerate() {
        let outcome = process_record(client, record).await;
        match &outcome {
            RecordOutcome::Success(_) => {
                info!(index, product = %record.product_id, "✓ stock quantity created")
            }
            RecordOutcome::NotFound(entry) => {
                info!(index, product = %record.product_id, reason = %entry.reason, "skipped")
            }
            RecordOutcome::Error(entry) => {
                warn!(index, product = %record.product_id, error = %entry.error, "record failed")
            }
        }
        report = report.record(outcome);
    }
    report
}

/// Drives one record to its terminal state.
pub async fn process_record<C>(client: &C, record: &StockRecord) -> RecordOutcome
where
    C: CatalogClient + ?Sized,
{
    match try_process_record(client, record).await {
        Ok(outcome) => outcome,
        Err(e) => RecordOutcome::Error(ErrorEntry {
            product: record.product_id.clone(),
            error: failure_message(e),
        }),
    }
}

/// Backend faults are reported with the backend's own text; anything else
/// (transport, decoding) with the full error description.
fn failure_message(error: AppError) -> String {
    match error {
        AppError::Fault { message, .. } => message,
        other => other.to_string(),
    }
}

fn not_found(record: &StockRecord, reason: NotFoundReason) -> RecordOutcome {
    RecordOutcome::NotFound(NotFoundEntry {
        product: record.product_id.clone(),
        reason,
    })
}

/// `Err` only for backend or transport failures; lookup misses are outcomes.
async fn try_process_record<C>(client: &C, record: &StockRecord) -> Result<RecordOutcome>
where
    C: CatalogClient + ?Sized,
{
    let parsed = descriptor::parse(&record.product_id);
    if parsed.code.is_none() {
        return Ok(not_found(record, NotFoundReason::InvalidCode));
    }

    let product = match resolve_product(client, &parsed).await? {
        None => return Ok(not_found(record, NotFoundReason::ProductNotFound)),
        Some(product) if !product.valid => {
            return Ok(not_found(record, NotFoundReason::ProductNotStockable));
        }
        Some(product) => product,
    };

    let Some(location_id) = resolve_location(client, &record.location_id).await? else {
        return Ok(not_found(record, NotFoundReason::LocationNotFound));
    };

    let quant_id = client
        .create(
            QUANT_MODEL,
            json!({
                "product_id": product.id,
                "location_id": location_id,
                "quantity": record.quantity,
            }),
        )
        .await?;
    tracing::debug!(quant_id, product_id = product.id, location_id, "quant created");

    Ok(RecordOutcome::Success(SuccessEntry {
        product: record.product_id.clone(),
        location: record.location_id.clone(),
        quantity: record.quantity.clone(),
    }))
}
