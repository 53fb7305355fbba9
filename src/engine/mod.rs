// ── Parcelle Widget Engine ─────────────────────────────────────────────────
// The working modules of the chat widget: startup config, the sanitizer
// boundary, message rendering, session state, API transport, stats, and the
// controller that wires them together.

pub mod config;
pub mod render;
pub mod sanitize;
pub mod session;
pub mod stats;
pub mod transport;
pub mod widget;
