// ── Parcelle Engine: Widget Controller ─────────────────────────────────────
// The UI-glue organism: wires host events through the transport into
// renderer and session-state updates.
//
// Dependency rule (one-way): widget.rs → transport, render, session, stats.
// Nothing below this module knows the controller exists.
//
// Every flow restores interactive state on every exit path — the loading
// guard is released before outcomes are rendered, and both success and
// failure produce exactly one visible result.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use log::{info, warn};
use parking_lot::Mutex;

use crate::atoms::constants::{
    GREETING_MESSAGE, LOADING_PLACEHOLDER_HTML, QUERY_FAILED_MESSAGE, STATUS_OFFLINE,
    UPLOAD_FAILED_MESSAGE,
};
use crate::atoms::error::WidgetResult;
use crate::atoms::types::{ChatMessage, QueryOutcome, UploadedDocument};
use crate::engine::render::{self, Transcript};
use crate::engine::session::SessionState;
use crate::engine::stats::{self, SharedStatsPanel, StatsPanel};
use crate::engine::transport::ApiClient;

pub struct ChatWidget {
    client: ApiClient,
    state: SessionState,
    transcript: Transcript,
    stats: SharedStatsPanel,
}

impl ChatWidget {
    /// Build a widget against a resolved base URL (see `config::resolve_base_url`)
    /// with a fresh session.
    pub fn new(base_url: impl Into<String>) -> Self {
        ChatWidget {
            client: ApiClient::new(base_url),
            state: SessionState::start_session(),
            transcript: Transcript::new(),
            stats: Arc::new(Mutex::new(StatsPanel::default())),
        }
    }

    pub fn session_id(&self) -> &str {
        self.state.session_id()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn documents(&self) -> &[UploadedDocument] {
        self.state.documents()
    }

    /// Shared handle to the stats panel, for hosts running the poller.
    pub fn stats_panel(&self) -> SharedStatsPanel {
        Arc::clone(&self.stats)
    }

    /// The underlying transport client (clone it into a poller task).
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Submit a question: render the user message, show a loading
    /// placeholder, and resolve it into the answer (with badges) or into the
    /// apology message. At most one query is in flight per session — a
    /// second submission fails `Busy` without touching the transcript.
    pub async fn send_message(&mut self, question: &str) -> WidgetResult<()> {
        let question = question.trim();
        if question.is_empty() {
            return Ok(());
        }
        self.state.begin_request()?;

        self.transcript.append(&ChatMessage::user(question));
        let placeholder_id = format!("loading-{}", Utc::now().timestamp_millis());
        self.transcript
            .append(&ChatMessage::bot(LOADING_PLACEHOLDER_HTML).with_id(&placeholder_id));

        let started = Instant::now();
        let result = self
            .client
            .query(question, self.state.session_id(), self.state.use_context())
            .await;
        self.state.end_request();

        match result {
            Ok(outcome) => {
                let elapsed_ms = started.elapsed().as_millis();
                info!("[widget] answered in {} ms (cached: {})", elapsed_ms, outcome.cached);
                let badges = badges_for(&outcome);
                self.transcript.replace(
                    &placeholder_id,
                    &ChatMessage::bot(&outcome.answer).with_badges(badges),
                );
                self.stats.lock().last_response_time_ms = Some(elapsed_ms);
                self.refresh_stats().await;
                Ok(())
            }
            Err(e) => {
                warn!("[widget] query failed: {}", e);
                self.transcript.remove(&placeholder_id);
                self.transcript.append(&ChatMessage::bot(QUERY_FAILED_MESSAGE));
                Err(e)
            }
        }
    }

    /// Upload a document: on success, record it and confirm with a
    /// badge-free system message; on failure, surface the inline error
    /// message. Not gated by the loading guard — uploads may overlap a
    /// query. Either way the host must re-enable its upload control and
    /// clear the file input.
    pub async fn upload_document(&mut self, filename: &str, bytes: Vec<u8>) -> WidgetResult<()> {
        match self.client.upload(filename, bytes, self.state.session_id()).await {
            Ok(doc) => {
                let notice = format!(
                    "📄 Document \"{}\" uploadé avec succès ({} chunks indexés)",
                    doc.filename, doc.chunk_count
                );
                self.state.record_upload(doc);
                self.transcript.append(&ChatMessage::system(notice));
                Ok(())
            }
            Err(e) => {
                warn!("[widget] upload failed: {}", e);
                self.transcript.append(&ChatMessage::system(UPLOAD_FAILED_MESSAGE));
                Err(e)
            }
        }
    }

    /// Refresh the stats panel once (the poller calls the same path on its
    /// own interval). Failures raise the connection banner and leave the
    /// displayed counters untouched.
    pub async fn refresh_stats(&self) {
        stats::refresh_stats(&self.client, &self.stats).await;
    }

    /// Probe `/health` and set the online/offline status line.
    pub async fn check_connection(&self) {
        match self.client.health().await {
            Ok(health) => {
                self.stats.lock().status_line =
                    Some(format!("✅ En ligne - Cache: {}", health.cache));
            }
            Err(e) => {
                warn!("[widget] health probe failed: {}", e);
                self.stats.lock().status_line = Some(STATUS_OFFLINE.to_string());
            }
        }
    }

    /// Append the canned example-questions introduction.
    pub fn greet(&mut self) {
        self.transcript.append(&ChatMessage::bot(GREETING_MESSAGE));
    }

    /// Render the uploaded-documents panel.
    pub fn render_documents(&self) -> String {
        render::render_document_list(self.state.documents())
    }
}

/// Answer badges in their fixed order: cache flag, source count, confidence.
/// A zero confidence renders no badge, matching the original widget.
pub fn badges_for(outcome: &QueryOutcome) -> Vec<String> {
    let mut badges = Vec::new();
    if outcome.cached {
        badges.push("💾 Cache".to_string());
    }
    if !outcome.sources_used.is_empty() {
        badges.push(format!("📄 {} sources", outcome.sources_used.len()));
    }
    if let Some(confidence) = outcome.confidence {
        if confidence > 0.0 {
            badges.push(format!("🎯 {}%", (confidence * 100.0).round() as u32));
        }
    }
    badges
}

// ── Tests ──────────────────────────────────────────────────────────────────
// Full flows run against a mock server in tests/integration.rs; the badge
// table is pure and tested here.
