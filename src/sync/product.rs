// stocksync/src/sync/product.rs
use serde_json::Value;
use tracing::debug;

use super::descriptor::ProductDescriptor;
use crate::catalog::{CatalogClient, Condition, Record, record_id};
use crate::errors::Result;

const PRODUCT_MODEL: &str = "product.product";
const ATTRIBUTE_VALUE_MODEL: &str = "product.attribute.value";
const PRODUCT_FIELDS: &[&str] = &["id", "display_name", "default_code", "type"];

/// Backend product type that carries stock quantities.
const STOCKABLE_TYPE: &str = "product";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedProduct {
    pub id: i64,
    /// `false` for services and consumables, which must never get a quant.
    pub valid: bool,
}

impl ResolvedProduct {
    fn from_record(record: &Record) -> Option<Self> {
        let id = record_id(record)?;
        let valid = record.get("type").and_then(Value::as_str) == Some(STOCKABLE_TYPE);
        Some(Self { id, valid })
    }
}

/// Finds the backend product a descriptor refers to.
///
/// Strategies are tried in order and the first hit wins:
/// 1. code, narrowed by the exact name and by every attribute value;
/// 2. exact name;
/// 3. products carrying the first attribute value.
pub async fn resolve_product<C>(client: &C, descriptor: &ProductDescriptor) -> Result<Option<ResolvedProduct>>
where
    C: CatalogClient + ?Sized,
{
    if let Some(code) = &descriptor.code {
        let mut domain = vec![Condition::eq("default_code", code.as_str())];
        if !descriptor.name.is_empty() {
            domain.push(Condition::eq("name", descriptor.name.as_str()));
        }
        for attribute in &descriptor.attributes {
            domain.push(Condition::eq(
                "product_template_attribute_value_ids.name",
                attribute.as_str(),
            ));
        }
        if let Some(found) = find_product(client, &domain, "code").await? {
            return Ok(Some(found));
        }
    }

    if !descriptor.name.is_empty() {
        let domain = [Condition::eq("name", descriptor.name.as_str())];
        if let Some(found) = find_product(client, &domain, "name").await? {
            return Ok(Some(found));
        }
    }

    // Only the first attribute takes part in this fallback.
    if let Some(attribute) = descriptor.attributes.first() {
        let value_domain = [Condition::eq("name", attribute.as_str())];
        let value = client
            .search_one(ATTRIBUTE_VALUE_MODEL, &value_domain, &["id"])
            .await?;
        if let Some(value_id) = value.as_ref().and_then(record_id) {
            let domain = [Condition::is_in(
                "product_template_attribute_value_ids.product_attribute_value_id",
                vec![Value::from(value_id)],
            )];
            if let Some(found) = find_product(client, &domain, "attribute").await? {
                return Ok(Some(found));
            }
        }
    }

    Ok(None)
}

async fn find_product<C>(client: &C, domain: &[Condition], strategy: &str) -> Result<Option<ResolvedProduct>>
where
    C: CatalogClient + ?Sized,
{
    let record = client.search_one(PRODUCT_MODEL, domain, PRODUCT_FIELDS).await?;
    let resolved = record.as_ref().and_then(ResolvedProduct::from_record);
    if let Some(product) = &resolved {
        debug!(strategy, id = product.id, valid = product.valid, "product matched");
    }
    Ok(resolved)
}
