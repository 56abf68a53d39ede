// stocksync/src/sync/report.rs
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// One line of the stock input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub product_id: String,
    pub location_id: String,
    pub quantity: Number,
}

/// Why a record could not be matched to backend data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    InvalidCode,
    ProductNotFound,
    ProductNotStockable,
    LocationNotFound,
}

impl NotFoundReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotFoundReason::InvalidCode => "invalid code",
            NotFoundReason::ProductNotFound => "product not found",
            NotFoundReason::ProductNotStockable => "product not valid for inventory",
            NotFoundReason::LocationNotFound => "location not found",
        }
    }
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NotFoundReason {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessEntry {
    pub product: String,
    pub location: String,
    pub quantity: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotFoundEntry {
    pub product: String,
    pub reason: NotFoundReason,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEntry {
    pub product: String,
    pub error: String,
}

/// Terminal state of a single record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Success(SuccessEntry),
    NotFound(NotFoundEntry),
    Error(ErrorEntry),
}

/// Per-run result, one entry per input record, each bucket in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutcomeReport {
    pub success: Vec<SuccessEntry>,
    #[serde(rename = "notFound")]
    pub not_found: Vec<NotFoundEntry>,
    pub errors: Vec<ErrorEntry>,
}

impl OutcomeReport {
    /// Appends an outcome to its bucket.
    pub fn record(mut self, outcome: RecordOutcome) -> Self {
        match outcome {
            RecordOutcome::Success(entry) => self.success.push(entry),
            RecordOutcome::NotFound(entry) => self.not_found.push(entry),
            RecordOutcome::Error(entry) => self.errors.push(entry),
        }
        self
    }

    pub fn total(&self) -> usize {
        self.success.len() + self.not_found.len() + self.errors.len()
    }
}

impl FromIterator<RecordOutcome> for OutcomeReport {
    fn from_iter<I: IntoIterator<Item = RecordOutcome>>(iter: I) -> Self {
        iter.into_iter().fold(OutcomeReport::default(), OutcomeReport::record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_serializes_with_contract_field_names() -> anyhow::Result<()> {
        let report: OutcomeReport = vec![
            RecordOutcome::Success(SuccessEntry {
                product: "[X1] Foo".into(),
                location: "WH/Stock".into(),
                quantity: Number::from(5),
            }),
            RecordOutcome::NotFound(NotFoundEntry {
                product: "Bar".into(),
                reason: NotFoundReason::InvalidCode,
            }),
            RecordOutcome::Error(ErrorEntry {
                product: "[Z9] Baz".into(),
                error: "Backend fault (200): boom".into(),
            }),
        ]
        .into_iter()
        .collect();

        assert_eq!(report.total(), 3);
        assert_eq!(
            serde_json::to_value(&report)?,
            json!({
                "success": [{ "product": "[X1] Foo", "location": "WH/Stock", "quantity": 5 }],
                "notFound": [{ "product": "Bar", "reason": "invalid code" }],
                "errors": [{ "product": "[Z9] Baz", "error": "Backend fault (200): boom" }],
            })
        );
        Ok(())
    }

    #[test]
    fn test_stock_record_keeps_quantity_representation() -> anyhow::Result<()> {
        let records: Vec<StockRecord> = serde_json::from_value(json!([
            { "product_id": "[A] a", "location_id": "WH/Stock", "quantity": 3 },
            { "product_id": "[B] b", "location_id": "WH/Stock", "quantity": 2.5 },
        ]))?;
        assert_eq!(serde_json::to_value(&records[0].quantity)?, json!(3));
        assert_eq!(serde_json::to_value(&records[1].quantity)?, json!(2.5));
        Ok(())
    }

    #[test]
    fn test_reason_strings() {
        assert_eq!(NotFoundReason::ProductNotFound.to_string(), "product not found");
        assert_eq!(
            NotFoundReason::ProductNotStockable.to_string(),
            "product not valid for inventory"
        );
        assert_eq!(NotFoundReason::LocationNotFound.to_string(), "location not found");
    }
}
