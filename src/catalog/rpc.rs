// stocksync/src/catalog/rpc.rs
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::{CatalogClient, Condition, Record};
use crate::config::OdooConfig;
use crate::errors::{AppError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Value,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    data: Option<RpcErrorData>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorData {
    message: Option<String>,
}

/// Unwraps a JSON-RPC response body into its `result`, turning an `error` member into a fault.
fn decode_response(body: Value) -> Result<Value> {
    let response: RpcResponse = serde_json::from_value(body)?;
    match response.error {
        Some(error) => {
            // The backend puts the exception text in data.message; the top-level
            // message is usually a generic "Odoo Server Error".
            let message = error
                .data
                .and_then(|data| data.message)
                .filter(|m| !m.is_empty())
                .unwrap_or(error.message);
            Err(AppError::Fault {
                code: error.code,
                message,
            })
        }
        None => Ok(response.result),
    }
}

/// Posts JSON-RPC `call` envelopes to `<base>/jsonrpc`.
pub struct JsonRpcTransport {
    http: reqwest::Client,
    endpoint: Url,
    next_id: AtomicU64,
}

impl JsonRpcTransport {
    pub fn new(base_url: &Url) -> Result<Self> {
        let endpoint = Url::parse(&format!(
            "{}/jsonrpc",
            base_url.as_str().trim_end_matches('/')
        ))?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            endpoint,
            next_id: AtomicU64::new(1),
        })
    }

    pub async fn call(&self, service: &str, method: &str, args: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "method": "call",
            "params": { "service": service, "method": method, "args": args },
            "id": id,
        });
        debug!(id, service, method, "sending JSON-RPC request");

        let body: Value = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        decode_response(body)
    }
}

/// An authenticated session; the uid is reused for every call of the run.
pub struct OdooSession {
    transport: JsonRpcTransport,
    database: String,
    password: String,
    uid: i64,
}

impl OdooSession {
    pub async fn authenticate(config: &OdooConfig) -> Result<Self> {
        let transport = JsonRpcTransport::new(&config.url)?;
        let result = transport
            .call(
                "common",
                "authenticate",
                json!([config.database, config.username, config.password, {}]),
            )
            .await?;

        // A rejected login is answered with `false`, not with an error.
        let uid = match result.as_i64() {
            Some(uid) if uid > 0 => uid,
            _ => return Err(AppError::Authentication(config.username.clone())),
        };
        info!(uid, database = %config.database, "authenticated against Odoo");

        Ok(Self {
            transport,
            database: config.database.clone(),
            password: config.password.clone(),
            uid,
        })
    }

    async fn execute_kw(&self, model: &str, method: &str, args: Value, kwargs: Value) -> Result<Value> {
        self.transport
            .call(
                "object",
                "execute_kw",
                json!([self.database, self.uid, self.password, model, method, args, kwargs]),
            )
            .await
    }
}

#[async_trait]
impl CatalogClient for OdooSession {
    async fn search_read(
        &self,
        model: &str,
        domain: &[Condition],
        fields: &[&str],
        limit: Option<usize>,
    ) -> Result<Vec<Record>> {
        let mut kwargs = json!({ "fields": fields });
        if let Some(limit) = limit {
            kwargs["limit"] = json!(limit);
        }
        let result = self
            .execute_kw(model, "search_read", json!([domain]), kwargs)
            .await?;
        let rows: Vec<Record> = serde_json::from_value(result)?;
        debug!(model, rows = rows.len(), "search_read finished");
        Ok(rows)
    }

    async fn create(&self, model: &str, values: Value) -> Result<i64> {
        let result = self
            .execute_kw(model, "create", json!([values]), json!({}))
            .await?;
        result.as_i64().ok_or_else(|| {
            AppError::UnexpectedResponse(format!("create on {} returned {}", model, result))
        })
    }
}
