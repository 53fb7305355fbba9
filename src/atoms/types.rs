// ── Parcelle Atoms: Pure Data Types ────────────────────────────────────────
// All plain struct/enum definitions with no logic beyond constructors.
// Atoms layer rule: no I/O, no side effects, no imports from engine/.

use serde::{Deserialize, Serialize};

// ── Chat messages ──────────────────────────────────────────────────────────

/// Who a rendered chat entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
    System,
}

impl Role {
    /// CSS class fragment used on the rendered node (`message user`, …).
    pub fn css_class(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "bot",
            Role::System => "system",
        }
    }
}

/// One chat entry, immutable once rendered. A superseded entry (the loading
/// placeholder) is replaced wholesale in the transcript, never mutated.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// When true, `content` may carry markup and must flow through the
    /// sanitizer before reaching a document tree. When false, `content` is
    /// rendered as plain text no matter what it contains.
    pub allow_markup: bool,
    /// Short labels appended after the content, in order. Empty for most
    /// messages; answers carry cache/source/confidence badges.
    pub badges: Vec<String>,
    /// Optional handle so a later call can locate and replace this node.
    pub id: Option<String>,
}

impl ChatMessage {
    /// A user-typed message. Always plain text.
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::User,
            content: content.into(),
            allow_markup: false,
            badges: Vec::new(),
            id: None,
        }
    }

    /// A bot answer. Model output may contain markup, so it is
    /// markup-capable and will be sanitized at render time.
    pub fn bot(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::Bot,
            content: content.into(),
            allow_markup: true,
            badges: Vec::new(),
            id: None,
        }
    }

    /// A widget-generated notice (upload confirmations, errors). Plain text.
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::System,
            content: content.into(),
            allow_markup: false,
            badges: Vec::new(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_badges(mut self, badges: Vec<String>) -> Self {
        self.badges = badges;
        self
    }
}

// ── Wire types ─────────────────────────────────────────────────────────────
// Field renames track the backend's JSON exactly; the Rust names follow the
// crate's vocabulary.

/// Successful `/api/upload` response. Appended to the session's document
/// ledger in insertion order; never removed within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedDocument {
    pub filename: String,
    #[serde(rename = "chunks")]
    pub chunk_count: u64,
    #[serde(rename = "size")]
    pub size_bytes: u64,
}

/// Successful `/api/query` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub answer: String,
    #[serde(default)]
    pub cached: bool,
    /// Source references backing the answer. The backend sends opaque
    /// scalars; only the count is rendered.
    #[serde(default)]
    pub sources_used: Vec<serde_json::Value>,
    /// Confidence in 0..1, when the backend reports one.
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Server-side processing time in seconds.
    #[serde(default)]
    pub processing_time: Option<f64>,
}

/// `/api/stats` response. Replaced wholesale on each poll, never merged with
/// prior values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_queries: u64,
    pub cache_hits: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_calls: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents_indexed: Option<u64>,
}

/// `/health` response. Extra fields the backend reports are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Cache state as reported by the backend ("enabled" / "disabled").
    pub cache: String,
}
