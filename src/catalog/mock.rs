//! In-memory [`CatalogClient`] for tests.
//!
//! Searches are answered from scripted `(model, domain)` responses; anything not
//! scripted returns no rows. Every call is recorded so tests can assert on the
//! exact sequence of backend round-trips.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

use super::{CatalogClient, Condition, Record};
use crate::errors::{AppError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Search { model: String, domain: Value },
    Create { model: String, values: Value },
}

struct ScriptedSearch {
    model: String,
    domain: Value,
    outcome: std::result::Result<Vec<Record>, String>,
}

#[derive(Default)]
pub struct MockCatalog {
    searches: Vec<ScriptedSearch>,
    failing_creates: Vec<(i64, String)>,
    next_id: Mutex<i64>,
    calls: Mutex<Vec<Call>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self {
            next_id: Mutex::new(1000),
            ..Default::default()
        }
    }

    /// Answers `search_read(model, domain)` with `rows`.
    pub fn on_search(mut self, model: &str, domain: Vec<Condition>, rows: Vec<Value>) -> Self {
        let rows = rows
            .into_iter()
            .filter_map(|row| row.as_object().cloned())
            .collect();
        self.searches.push(ScriptedSearch {
            model: model.to_string(),
            domain: domain_value(&domain),
            outcome: Ok(rows),
        });
        self
    }

    /// Makes `search_read(model, domain)` fail with a backend fault.
    pub fn fail_search(mut self, model: &str, domain: Vec<Condition>, message: &str) -> Self {
        self.searches.push(ScriptedSearch {
            model: model.to_string(),
            domain: domain_value(&domain),
            outcome: Err(message.to_string()),
        });
        self
    }

    /// Makes every `create` whose `product_id` equals `product_id` fail with a backend fault.
    pub fn fail_create_for(mut self, product_id: i64, message: &str) -> Self {
        self.failing_creates.push((product_id, message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn creates(&self) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Create { values, .. } => Some(values),
                Call::Search { .. } => None,
            })
            .collect()
    }

    pub fn search_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Search { .. }))
            .count()
    }
}

fn domain_value(domain: &[Condition]) -> Value {
    serde_json::to_value(domain).unwrap()
}

fn fault(message: &str) -> AppError {
    AppError::Fault {
        code: 200,
        message: message.to_string(),
    }
}

#[async_trait]
impl CatalogClient for MockCatalog {
    async fn search_read(
        &self,
        model: &str,
        domain: &[Condition],
        _fields: &[&str],
        limit: Option<usize>,
    ) -> Result<Vec<Record>> {
        let domain = domain_value(domain);
        self.calls.lock().unwrap().push(Call::Search {
            model: model.to_string(),
            domain: domain.clone(),
        });

        let scripted = self
            .searches
            .iter()
            .find(|s| s.model == model && s.domain == domain);
        match scripted.map(|s| &s.outcome) {
            Some(Ok(rows)) => Ok(rows
                .iter()
                .take(limit.unwrap_or(usize::MAX))
                .cloned()
                .collect()),
            Some(Err(message)) => Err(fault(message)),
            None => Ok(Vec::new()),
        }
    }

    async fn create(&self, model: &str, values: Value) -> Result<i64> {
        self.calls.lock().unwrap().push(Call::Create {
            model: model.to_string(),
            values: values.clone(),
        });

        let product_id = values.get("product_id").and_then(Value::as_i64);
        if let Some((_, message)) = self
            .failing_creates
            .iter()
            .find(|(id, _)| Some(*id) == product_id)
        {
            return Err(fault(message));
        }

        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        Ok(*next_id)
    }
}
