// stocksync/src/sync/location.rs
use tracing::debug;

use crate::catalog::{CatalogClient, Condition, record_id};
use crate::errors::Result;

const LOCATION_MODEL: &str = "stock.location";

/// Looks up a stock location by its full name (e.g. `WH/Stock`).
///
/// Exact match only; every call goes to the backend.
pub async fn resolve_location<C>(client: &C, name: &str) -> Result<Option<i64>>
where
    C: CatalogClient + ?Sized,
{
    let domain = [Condition::eq("complete_name", name)];
    let location = client.search_one(LOCATION_MODEL, &domain, &["id"]).await?;
    let id = location.as_ref().and_then(record_id);
    debug!(location = name, ?id, "location lookup");
    Ok(id)
}
