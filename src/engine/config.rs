// ── Parcelle Engine: Startup Configuration ─────────────────────────────────
// Base-URL resolution, decided exactly once at widget startup:
//   1. an injected override value, when present and non-empty;
//   2. the local backend, when the embedding page is served from a loopback
//      host;
//   3. the fixed production URL otherwise.

use log::info;
use url::Url;

use crate::atoms::constants::{LOCAL_API_URL, LOOPBACK_HOSTS, PRODUCTION_API_URL};

/// Resolve the API base URL. `page_origin` is where the embedding page is
/// served from — either a bare hostname ("localhost") or a full origin
/// ("http://127.0.0.1:5500/index.html").
pub fn resolve_base_url(override_url: Option<&str>, page_origin: &str) -> String {
    if let Some(value) = override_url {
        let value = value.trim();
        if !value.is_empty() {
            return value.trim_end_matches('/').to_string();
        }
    }

    let host = host_of(page_origin);
    if LOOPBACK_HOSTS.contains(&host.as_str()) {
        info!("[config] using local API base URL: {}", LOCAL_API_URL);
        return LOCAL_API_URL.to_string();
    }
    PRODUCTION_API_URL.to_string()
}

/// Extract the host part of an origin string.
fn host_of(page_origin: &str) -> String {
    if let Ok(url) = Url::parse(page_origin) {
        if let Some(host) = url.host_str() {
            return host.to_string();
        }
    }
    // Bare "host" or "host:port" form.
    page_origin.trim().split(':').next().unwrap_or_default().to_string()
}

// ── Tests ──────────────────────────────────────────────────────────────────
