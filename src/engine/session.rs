// ── Parcelle Engine: Session State ─────────────────────────────────────────
// One explicit state object per widget, replacing the original's
// free-floating globals. Lives for the widget's lifetime; nothing persists.
//
// The loading guard is the sole mutual exclusion in the engine: it
// serializes query submissions and nothing else. Uploads and stats polling
// are deliberately not gated.

use chrono::Utc;
use log::info;
use uuid::Uuid;

use crate::atoms::error::{WidgetError, WidgetResult};
use crate::atoms::types::UploadedDocument;

#[derive(Debug)]
pub struct SessionState {
    session_id: String,
    is_loading: bool,
    documents: Vec<UploadedDocument>,
}

impl SessionState {
    /// Begin a fresh session with a newly generated identifier.
    pub fn start_session() -> Self {
        let session_id = generate_session_id();
        info!("[session] started {}", session_id);
        SessionState {
            session_id,
            is_loading: false,
            documents: Vec::new(),
        }
    }

    /// Client-generated opaque token correlating this widget's uploads and
    /// queries server-side.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Take the loading guard. Fails with `Busy` while a query is in flight;
    /// callers must check before submitting.
    pub fn begin_request(&mut self) -> WidgetResult<()> {
        if self.is_loading {
            return Err(WidgetError::Busy);
        }
        self.is_loading = true;
        Ok(())
    }

    /// Release the loading guard. Idempotent — runs on every exit path.
    pub fn end_request(&mut self) {
        self.is_loading = false;
    }

    /// Append a successful upload to the document ledger. Insertion order is
    /// significant; duplicate filenames stay as distinct entries.
    pub fn record_upload(&mut self, doc: UploadedDocument) {
        info!(
            "[session] recorded upload '{}' ({} chunks, {} bytes)",
            doc.filename, doc.chunk_count, doc.size_bytes
        );
        self.documents.push(doc);
    }

    pub fn documents(&self) -> &[UploadedDocument] {
        &self.documents
    }

    /// Whether queries should ask the backend to use uploaded context.
    /// Derived at call time, never persisted.
    pub fn use_context(&self) -> bool {
        !self.documents.is_empty()
    }
}

/// `session_<unix-millis>_<random-suffix>` — unique with overwhelming
/// probability within a session's lifetime.
fn generate_session_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("session_{}_{}", Utc::now().timestamp_millis(), &suffix[..9])
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(filename: &str) -> UploadedDocument {
        UploadedDocument {
            filename: filename.into(),
            chunk_count: 1,
            size_bytes: 10,
        }
    }

    #[test]
    fn second_begin_request_fails_busy() {
        let mut state = SessionState::start_session();
        state.begin_request().unwrap();
        assert!(matches!(state.begin_request(), Err(WidgetError::Busy)));
        state.end_request();
        assert!(state.begin_request().is_ok());
    }

    #[test]
    fn end_request_is_idempotent() {
        let mut state = SessionState::start_session();
        state.end_request();
        state.end_request();
        assert!(!state.is_loading());
    }

    #[test]
    fn duplicate_filenames_stay_distinct_in_order() {
        let mut state = SessionState::start_session();
        assert!(!state.use_context());
        state.record_upload(doc("plan.pdf"));
        state.record_upload(doc("plan.pdf"));
        state.record_upload(doc("annexe.docx"));
        assert_eq!(state.documents().len(), 3);
        assert_eq!(state.documents()[0].filename, "plan.pdf");
        assert_eq!(state.documents()[1].filename, "plan.pdf");
        assert_eq!(state.documents()[2].filename, "annexe.docx");
        assert!(state.use_context());
    }

    #[test]
    fn session_ids_look_right_and_differ() {
        let a = SessionState::start_session();
        let b = SessionState::start_session();
        assert!(a.session_id().starts_with("session_"));
        assert_eq!(a.session_id().split('_').count(), 3);
        assert_ne!(a.session_id(), b.session_id());
    }
}
