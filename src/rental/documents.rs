//! Client for the document service. The service is schema-less and may be
//! down, so callers get raw JSON values and an error they can shrug off.

use std::time::Duration;

use serde_json::Value;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct DocumentClient {
    http: reqwest::Client,
    base_url: String,
}

impl DocumentClient {
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Whether the service answers its liveness probe.
    pub async fn is_alive(&self) -> bool {
        match self.http.get(format!("{}/", self.base_url)).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!(url = %self.base_url, error = %e, "Document service unreachable");
                false
            }
        }
    }

    /// Fetch every document. Anything that is not a JSON array is an error.
    pub async fn fetch_documents(&self) -> AppResult<Vec<Value>> {
        let response = self
            .http
            .get(format!("{}/data", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Document service returned {}: {}",
                status, body
            )));
        }

        match response.json::<Value>().await? {
            Value::Array(documents) => Ok(documents),
            other => Err(AppError::Upstream(format!(
                "Expected a JSON array of documents, got {}",
                kind(&other)
            ))),
        }
    }

    /// Like [`fetch_documents`](Self::fetch_documents), but a failure only
    /// logs and yields no documents.
    pub async fn fetch_documents_or_empty(&self) -> Vec<Value> {
        self.fetch_documents().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring document service failure");
            Vec::new()
        })
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
