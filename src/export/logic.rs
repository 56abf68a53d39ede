// stocksync/src/export/logic.rs
use serde_json::{Value, json};
use std::collections::HashMap;
use tracing::info;

use crate::catalog::{
    CatalogClient, Condition, Record, id_list, many2one_id, many2one_name, record_id,
};
use crate::errors::Result;

const TEMPLATE_FIELDS: &[&str] = &["id", "name", "categ_id", "default_code", "list_price", "barcode"];
const VARIANT_FIELDS: &[&str] = &["id", "name", "default_code", "lst_price", "barcode", "product_tmpl_id"];
const LINE_FIELDS: &[&str] = &["id", "product_tmpl_id", "attribute_id", "value_ids"];
const VALUE_FIELDS: &[&str] = &["id", "name", "attribute_id"];

/// Variant fields copied into the export.
const EXPORTED_VARIANT_FIELDS: &[&str] = &["id", "name", "default_code", "lst_price", "barcode"];

/// Reads the stockable catalog in four queries and joins it per template.
pub async fn collect_catalog<C>(client: &C) -> Result<Vec<Record>>
where
    C: CatalogClient + ?Sized,
{
    let templates = client
        .search_read(
            "product.template",
            &[Condition::eq("type", "product")],
            TEMPLATE_FIELDS,
            None,
        )
        .await?;
    info!(templates = templates.len(), "fetched product templates");

    let template_ids: Vec<Value> = templates.iter().filter_map(record_id).map(Value::from).collect();
    if template_ids.is_empty() {
        return Ok(combine_catalog(templates, &[], &[], &[]));
    }

    let by_template = [Condition::is_in("product_tmpl_id", template_ids)];
    let variants = client
        .search_read("product.product", &by_template, VARIANT_FIELDS, None)
        .await?;
    let lines = client
        .search_read("product.template.attribute.line", &by_template, LINE_FIELDS, None)
        .await?;

    let mut value_ids: Vec<i64> = Vec::new();
    for line in &lines {
        for id in line.get("value_ids").map(id_list).unwrap_or_default() {
            if !value_ids.contains(&id) {
                value_ids.push(id);
            }
        }
    }
    let values = if value_ids.is_empty() {
        Vec::new()
    } else {
        let domain = [Condition::is_in("id", value_ids.into_iter().map(Value::from).collect())];
        client
            .search_read("product.attribute.value", &domain, VALUE_FIELDS, None)
            .await?
    };
    info!(
        variants = variants.len(),
        attribute_lines = lines.len(),
        attribute_values = values.len(),
        "fetched catalog details"
    );

    Ok(combine_catalog(templates, &variants, &lines, &values))
}

/// Attaches to each template its `product_product` variants and its
/// `product_template_attribute_line` entries with resolved value names.
pub fn combine_catalog(
    templates: Vec<Record>,
    variants: &[Record],
    lines: &[Record],
    values: &[Record],
) -> Vec<Record> {
    let values_by_id: HashMap<i64, &Record> = values
        .iter()
        .filter_map(|value| record_id(value).map(|id| (id, value)))
        .collect();

    templates
        .into_iter()
        .map(|mut template| {
            let template_id = record_id(&template);
            let belongs = |row: &&Record| {
                template_id.is_some()
                    && row.get("product_tmpl_id").and_then(many2one_id) == template_id
            };

            let template_variants: Vec<Value> = variants
                .iter()
                .filter(belongs)
                .map(|variant| {
                    let picked: Record = EXPORTED_VARIANT_FIELDS
                        .iter()
                        .filter_map(|field| {
                            variant.get(*field).map(|v| (field.to_string(), v.clone()))
                        })
                        .collect();
                    Value::Object(picked)
                })
                .collect();

            let template_lines: Vec<Value> = lines
                .iter()
                .filter(belongs)
                .map(|line| {
                    let attribute = line
                        .get("attribute_id")
                        .and_then(many2one_name)
                        .map(Value::from)
                        .unwrap_or(Value::Null);
                    let line_values: Vec<Value> = line
                        .get("value_ids")
                        .map(id_list)
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(|id| values_by_id.get(&id))
                        .map(|value| {
                            json!({
                                "id": value.get("id").cloned().unwrap_or(Value::Null),
                                "name": value.get("name").cloned().unwrap_or(Value::Null),
                            })
                        })
                        .collect();
                    json!({ "attribute_id": attribute, "values": line_values })
                })
                .collect();

            template.insert("product_product".to_string(), Value::Array(template_variants));
            template.insert(
                "product_template_attribute_line".to_string(),
                Value::Array(template_lines),
            );
            template
        })
        .collect()
}
