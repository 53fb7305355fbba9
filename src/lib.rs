// Parcelle — chat widget engine for the Assistant Urbanisme document-QA API.
//
// The client-side logic of the chat UI as a library: it uploads documents
// and submits questions to the remote API, produces browser-safe rendered
// nodes (messages, cache/confidence badges), and maintains session state and
// usage statistics. The visual shell that embeds the rendered output is out
// of scope — any host (webview, server-side template, test harness) can
// place the engine's output into a document tree directly.
//
// Layering:
//   atoms/   — pure constants, error, and data types (no I/O)
//   engine/  — config, sanitizer, renderer, session, transport, stats,
//              and the widget controller

pub mod atoms;
pub mod engine;

pub use atoms::constants::STATS_POLL_INTERVAL;
pub use atoms::error::{WidgetError, WidgetResult};
pub use atoms::types::{
    ChatMessage, HealthStatus, QueryOutcome, Role, StatsSnapshot, UploadedDocument,
};
pub use engine::config::resolve_base_url;
pub use engine::render::{render, render_document_list, RenderedMessage, Transcript};
pub use engine::sanitize::sanitize;
pub use engine::session::SessionState;
pub use engine::stats::{spawn_stats_poller, SharedStatsPanel, StatsPanel};
pub use engine::transport::ApiClient;
pub use engine::widget::{badges_for, ChatWidget};
