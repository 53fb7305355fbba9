// ── Parcelle Engine: API Transport ─────────────────────────────────────────
// The HTTP surface of the widget: upload (multipart), query (JSON), stats
// and health (JSON GET), each with consistent error translation into the
// operation's `WidgetError` variant.
//
// No retries and no circuit breaking here: a failed call reports exactly
// once and recovery is explicit user re-action (re-send, re-upload).

use log::{info, warn};
use reqwest::Client;
use serde_json::json;

use crate::atoms::constants::{
    CONNECT_TIMEOUT, HEALTH_PATH, QUERY_PATH, REQUEST_TIMEOUT, STATS_PATH, UPLOAD_PATH,
};
use crate::atoms::error::{WidgetError, WidgetResult};
use crate::atoms::types::{HealthStatus, QueryOutcome, StatsSnapshot, UploadedDocument};

/// Thin client over the assistant's HTTP API. Cheap to clone — the inner
/// `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against `base_url` (no trailing slash needed).
    /// Timeouts are fixed: 10s to connect, 120s per request.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiClient {
            client: Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a document as multipart (`file` part + `session_id` text part).
    pub async fn upload(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        session_id: &str,
    ) -> WidgetResult<UploadedDocument> {
        info!("[transport] POST {}{} file={}", self.base_url, UPLOAD_PATH, filename);

        let file_part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("session_id", session_id.to_string());

        let resp = self
            .client
            .post(format!("{}{}", self.base_url, UPLOAD_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(|e| WidgetError::upload(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            warn!("[transport] upload failed ({}): {}", status, body);
            return Err(WidgetError::upload(format!("HTTP {}: {}", status, body)));
        }

        resp.json::<UploadedDocument>()
            .await
            .map_err(|e| WidgetError::upload(format!("invalid upload response: {}", e)))
    }

    /// POST a question. `use_context` is the caller's "documents uploaded?"
    /// judgment at call time.
    pub async fn query(
        &self,
        question: &str,
        session_id: &str,
        use_context: bool,
    ) -> WidgetResult<QueryOutcome> {
        info!("[transport] POST {}{} use_context={}", self.base_url, QUERY_PATH, use_context);

        let body = json!({
            "question": question,
            "session_id": session_id,
            "use_context": use_context,
        });

        let resp = self
            .client
            .post(format!("{}{}", self.base_url, QUERY_PATH))
            .json(&body)
            .send()
            .await
            .map_err(|e| WidgetError::query(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            warn!("[transport] query failed ({}): {}", status, body);
            return Err(WidgetError::query(format!("HTTP {}: {}", status, body)));
        }

        resp.json::<QueryOutcome>()
            .await
            .map_err(|e| WidgetError::query(format!("invalid query response: {}", e)))
    }

    /// GET the usage counters.
    pub async fn stats(&self) -> WidgetResult<StatsSnapshot> {
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, STATS_PATH))
            .send()
            .await
            .map_err(|e| WidgetError::stats(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(WidgetError::stats(format!("HTTP {}", resp.status())));
        }

        resp.json::<StatsSnapshot>()
            .await
            .map_err(|e| WidgetError::stats(format!("invalid stats response: {}", e)))
    }

    /// GET the health probe.
    pub async fn health(&self) -> WidgetResult<HealthStatus> {
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, HEALTH_PATH))
            .send()
            .await
            .map_err(|e| WidgetError::health(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(WidgetError::health(format!("HTTP {}", resp.status())));
        }

        resp.json::<HealthStatus>()
            .await
            .map_err(|e| WidgetError::health(format!("invalid health response: {}", e)))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
// HTTP behavior is exercised end-to-end in tests/integration.rs against a
// wiremock server; only URL normalization is unit-tested here.
