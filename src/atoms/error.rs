// ── Parcelle Atoms: Error Types ────────────────────────────────────────────
// Single canonical error enum for the widget engine, built with `thiserror`.
//
// Design rules:
//   • Variants are coarse-grained by operation (Upload, Query, Stats…), so a
//     call site can tell which user-visible recovery applies.
//   • Every failure is recovered at the call site that triggered it — nothing
//     here is fatal to the embedding page.
//   • `WidgetError` → `String` conversion is provided via `Display` so that
//     webview command boundaries (`Result<T, String>`) can call
//     `.map_err(|e| e.to_string())` without boilerplate.

use thiserror::Error;

// ── Primary error enum ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum WidgetError {
    /// Document upload failed (non-success status or network failure).
    #[error("Upload error: {0}")]
    Upload(String),

    /// Question submission failed (non-success status or network failure).
    #[error("Query error: {0}")]
    Query(String),

    /// Stats refresh failed. Callers keep the previously displayed numbers.
    #[error("Stats error: {0}")]
    Stats(String),

    /// Health probe failed — the backend is unreachable.
    #[error("Health error: {0}")]
    Health(String),

    /// A query is already in flight for this session. Callers must wait for
    /// the active request to settle before submitting again.
    #[error("Query already in flight for this session")]
    Busy,
}

// ── Convenience constructors ───────────────────────────────────────────────

impl WidgetError {
    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload(message.into())
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }

    pub fn stats(message: impl Into<String>) -> Self {
        Self::Stats(message.into())
    }

    pub fn health(message: impl Into<String>) -> Self {
        Self::Health(message.into())
    }
}

// ── Convenience alias ──────────────────────────────────────────────────────

/// All widget operations should return this type.
/// At webview command boundaries, convert with `.map_err(|e| e.to_string())`.
pub type WidgetResult<T> = Result<T, WidgetError>;

// ── Conversion: WidgetError → String ───────────────────────────────────────
// Lets embedding command functions call `.map_err(WidgetError::into)` directly.

impl From<WidgetError> for String {
    fn from(e: WidgetError) -> Self {
        e.to_string()
    }
}
