//! HttpDraftService - REST implementation of the remote draft service.
//!
//! Endpoints (relative to the configured base URL):
//! - `POST /start-draft`  `{"query": ...}`
//! - `POST /finish-draft` `{"template_id", "answers", "prefilled"}`
//! - `POST /ingest`       multipart field `file`
//! - `GET  /health`

use async_trait::async_trait;
use drafter_core::config::ApiConfig;
use drafter_core::service::{
    BeginDraftResponse, CompleteDraftRequest, CompleteDraftResponse, DraftService, IngestReceipt,
};
use drafter_core::{DrafterError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const INVALID_RESPONSE_MESSAGE: &str = "Invalid server response";
const REQUEST_FAILED_MESSAGE: &str = "Request failed";

/// Draft service client that talks to the drafting backend over HTTP.
#[derive(Clone)]
pub struct HttpDraftService {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpDraftService {
    /// Creates a client for `base_url` with the given per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            timeout,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.base_url.clone(), config.timeout())
    }

    /// Replaces the underlying HTTP client (e.g. to share a connection pool).
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned>(&self, endpoint: &str, request: RequestBuilder) -> Result<T> {
        tracing::debug!("[HttpDraftService] Sending request to {}", endpoint);

        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!("[HttpDraftService] {} transport failure: {}", endpoint, err);
                DrafterError::service(
                    err.status().map(|s| s.as_u16()),
                    format!("Draft service request failed: {err}"),
                )
            })?;

        handle_response(endpoint, response).await
    }
}

#[async_trait]
impl DraftService for HttpDraftService {
    async fn begin_draft(&self, query: &str) -> Result<BeginDraftResponse> {
        let body = StartDraftBody { query };
        let request = self.client.post(self.url("start-draft")).json(&body);
        self.send("start-draft", request).await
    }

    async fn complete_draft(&self, request: CompleteDraftRequest) -> Result<CompleteDraftResponse> {
        let builder = self.client.post(self.url("finish-draft")).json(&request);
        self.send("finish-draft", builder).await
    }

    async fn ingest(&self, file_name: &str, contents: Vec<u8>) -> Result<IngestReceipt> {
        let part = Part::bytes(contents).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        let request = self.client.post(self.url("ingest")).multipart(form);
        self.send("ingest", request).await
    }

    async fn health(&self) -> Result<String> {
        let request = self.client.get(self.url("health"));
        let body: HealthBody = self.send("health", request).await?;
        Ok(body.message)
    }
}

#[derive(Serialize)]
struct StartDraftBody<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct HealthBody {
    message: String,
}

/// Parses the body as JSON first, then checks the status.
///
/// An unparsable body is an invalid response regardless of status. A
/// non-success status uses the body's `detail` string when present.
async fn handle_response<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(|err| {
        DrafterError::service(Some(status.as_u16()), format!("Failed to read response body: {err}"))
    })?;

    let value: Value = serde_json::from_slice(&bytes).map_err(|err| {
        tracing::warn!(
            "[HttpDraftService] {} returned non-JSON body (status {}): {}",
            endpoint,
            status,
            err
        );
        DrafterError::invalid_response(INVALID_RESPONSE_MESSAGE)
    })?;

    if !status.is_success() {
        let message = error_detail(&value).unwrap_or_else(|| REQUEST_FAILED_MESSAGE.to_string());
        tracing::warn!("[HttpDraftService] {} failed with {}: {}", endpoint, status, message);
        return Err(DrafterError::service(Some(status.as_u16()), message));
    }

    serde_json::from_value(value).map_err(|err| {
        tracing::warn!("[HttpDraftService] {} response has unexpected shape: {}", endpoint, err);
        DrafterError::invalid_response(INVALID_RESPONSE_MESSAGE)
    })
}

fn error_detail(body: &Value) -> Option<String> {
    body.get("detail")
        .and_then(Value::as_str)
        .filter(|detail| !detail.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_joins_without_double_slash() {
        let service = HttpDraftService::new("http://localhost:8000/", Duration::from_secs(1));
        assert_eq!(service.base_url(), "http://localhost:8000");
        assert_eq!(service.url("start-draft"), "http://localhost:8000/start-draft");
        assert_eq!(service.url("/health"), "http://localhost:8000/health");
    }

    #[test]
    fn test_error_detail_only_for_strings() {
        assert_eq!(
            error_detail(&json!({"detail": "Template not found"})).as_deref(),
            Some("Template not found")
        );
        assert_eq!(error_detail(&json!({"detail": [{"loc": ["body"]}]})), None);
        assert_eq!(error_detail(&json!({"detail": ""})), None);
        assert_eq!(error_detail(&json!({})), None);
    }
}
