//! Remote catalog access
//!
//! The [`CatalogClient`] trait is the seam between the reconciliation logic and
//! the backend: a search returning zero rows is a normal `Ok(vec![])`, while any
//! transport or backend failure surfaces as an [`AppError`](crate::errors::AppError).

// stocksync/src/catalog/mod.rs
pub(crate) mod rpc;
#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::errors::Result;

pub use rpc::OdooSession;

/// A backend row as returned by `search_read`.
pub type Record = serde_json::Map<String, Value>;

/// One `(field, operator, value)` constraint of a search domain.
///
/// Serializes as the three-element array the backend expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition(pub String, pub String, pub Value);

impl Condition {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Condition(field.to_string(), "=".to_string(), value.into())
    }

    pub fn is_in(field: &str, values: Vec<Value>) -> Self {
        Condition(field.to_string(), "in".to_string(), Value::Array(values))
    }
}

#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Reads `fields` of every `model` row matching all conditions of `domain`.
    async fn search_read(
        &self,
        model: &str,
        domain: &[Condition],
        fields: &[&str],
        limit: Option<usize>,
    ) -> Result<Vec<Record>>;

    /// Creates one `model` row and returns its id.
    async fn create(&self, model: &str, values: Value) -> Result<i64>;

    /// First matching row, if any.
    async fn search_one(
        &self,
        model: &str,
        domain: &[Condition],
        fields: &[&str],
    ) -> Result<Option<Record>> {
        let rows = self.search_read(model, domain, fields, Some(1)).await?;
        Ok(rows.into_iter().next())
    }
}

pub fn record_id(record: &Record) -> Option<i64> {
    record.get("id").and_then(Value::as_i64)
}

/// Id of a many2one value, which the backend sends as `[id, "display name"]` or `false`.
pub fn many2one_id(value: &Value) -> Option<i64> {
    match value {
        Value::Array(pair) => pair.first().and_then(Value::as_i64),
        other => other.as_i64(),
    }
}

pub fn many2one_name(value: &Value) -> Option<&str> {
    value.as_array().and_then(|pair| pair.get(1)).and_then(Value::as_str)
}

/// Ids of a one2many/many2many value.
pub fn id_list(value: &Value) -> Vec<i64> {
    value
        .as_array()
        .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default()
}
