// ── Parcelle Engine: Stats Panel & Poller ──────────────────────────────────
// The usage-counters view model and its fixed-interval refresh loop.
//
// Concurrency model: the poller task and the controller share the panel
// behind a parking_lot Mutex; the lock is taken only to apply a finished
// response, never across an await. There is no sequencing token — a slow
// poll can overwrite fresher state with stale data (last response wins).

use std::sync::Arc;
use std::time::Duration;

use log::warn;
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::atoms::constants::CONNECTION_ERROR_BANNER;
use crate::atoms::types::StatsSnapshot;
use crate::engine::transport::ApiClient;

/// View model behind the stats strip: server counters plus client-side
/// indicators (connection banner, measured response time, health line).
#[derive(Debug, Default)]
pub struct StatsPanel {
    snapshot: StatsSnapshot,
    connection_error: bool,
    /// Client-measured elapsed time of the last answered query.
    pub last_response_time_ms: Option<u128>,
    /// Online/offline line from the health probe, once checked.
    pub status_line: Option<String>,
}

impl StatsPanel {
    /// Replace the counters wholesale and clear the connection banner.
    pub fn apply(&mut self, snapshot: StatsSnapshot) {
        self.snapshot = snapshot;
        self.connection_error = false;
    }

    /// A refresh failed: raise the banner, leave the counters untouched.
    pub fn mark_unreachable(&mut self) {
        self.connection_error = true;
    }

    pub fn snapshot(&self) -> &StatsSnapshot {
        &self.snapshot
    }

    pub fn connection_error(&self) -> bool {
        self.connection_error
    }

    /// Banner text to display, when the last refresh failed.
    pub fn banner(&self) -> Option<&'static str> {
        self.connection_error.then_some(CONNECTION_ERROR_BANNER)
    }
}

pub type SharedStatsPanel = Arc<Mutex<StatsPanel>>;

/// Fetch stats once and apply the outcome to the panel.
pub async fn refresh_stats(client: &ApiClient, panel: &SharedStatsPanel) {
    match client.stats().await {
        Ok(snapshot) => panel.lock().apply(snapshot),
        Err(e) => {
            warn!("[stats] refresh failed: {}", e);
            panel.lock().mark_unreachable();
        }
    }
}

/// Spawn the fixed-interval refresh loop. The first tick fires immediately,
/// matching the original widget's refresh-on-load. Abort the returned handle
/// to tear the loop down; an in-flight request is simply abandoned.
pub fn spawn_stats_poller(
    client: ApiClient,
    panel: SharedStatsPanel,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            refresh_stats(&client, &panel).await;
        }
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────
