// ── Parcelle Atoms: Constants ──────────────────────────────────────────────
// All named constants for the crate live here.
// Rationale: collecting constants in one place eliminates magic strings,
// makes auditing easier, and keeps every layer's code self-documenting.

use std::time::Duration;

// ── API base URLs ──────────────────────────────────────────────────────────
// The production URL is the deployed backend; the local URL is what a page
// served from a loopback host talks to. Resolution order lives in
// engine/config.rs — an injected override always wins.

pub(crate) const PRODUCTION_API_URL: &str = "https://striking-clarity-actelle.up.railway.app";
pub(crate) const LOCAL_API_URL: &str = "http://localhost:8000";

/// Hosts treated as "served locally" when no override is injected.
pub(crate) const LOOPBACK_HOSTS: &[&str] = &["localhost", "127.0.0.1"];

// ── Endpoint paths ─────────────────────────────────────────────────────────

pub(crate) const UPLOAD_PATH: &str = "/api/upload";
pub(crate) const QUERY_PATH: &str = "/api/query";
pub(crate) const STATS_PATH: &str = "/api/stats";
pub(crate) const HEALTH_PATH: &str = "/health";

// ── HTTP client tuning ─────────────────────────────────────────────────────

pub(crate) const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Fixed interval between stats refreshes (the original widget polled every
/// 10 seconds). Overlapping polls resolve as last-response-wins.
pub const STATS_POLL_INTERVAL: Duration = Duration::from_secs(10);

// ── User-facing strings (French, like the rest of the product) ─────────────

/// Markup shown in the provisional bot node while a query is in flight.
pub(crate) const LOADING_PLACEHOLDER_HTML: &str =
    r#"<span class="loading-dots">Analyse en cours</span>"#;

pub(crate) const QUERY_FAILED_MESSAGE: &str =
    "❌ Erreur lors de l'analyse. Veuillez réessayer.";

pub(crate) const UPLOAD_FAILED_MESSAGE: &str = "❌ Erreur lors de l'upload du document";

pub(crate) const CONNECTION_ERROR_BANNER: &str = "Erreur de connexion API";

pub(crate) const STATUS_OFFLINE: &str = "❌ Hors ligne";

/// Canned introduction listing example questions, appended by
/// `ChatWidget::greet` shortly after the widget comes up.
pub(crate) const GREETING_MESSAGE: &str = "📘 Je peux répondre à des questions comme :

• Quelle est la hauteur maximale autorisée en zone UB ?
• Puis-je construire une piscine en limite de propriété ?
• Combien de places de parking pour un immeuble de bureaux ?
• Quelle distance respecter par rapport à la voirie ?
• Ai-je besoin d'un permis de construire pour mon projet ?

N'hésitez pas à me poser vos questions !";
