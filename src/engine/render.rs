// ── Parcelle Engine: Message Rendering ─────────────────────────────────────
// Structured node construction for chat entries and the documents panel.
// All markup interpretation is confined to sanitize.rs; everything assembled
// here is either already-sanitized or escaped on the way in.
//
// Called by: engine/widget.rs (the controller). No imports from transport or
// session — rendering is pure.

use crate::atoms::types::{ChatMessage, Role, UploadedDocument};
use crate::engine::sanitize::{escape_html, sanitize};

/// A display node, ready for direct placement into a document tree.
#[derive(Debug, Clone)]
pub struct RenderedMessage {
    pub id: Option<String>,
    pub role: Role,
    pub html: String,
}

/// Build the display node for one chat entry.
///
/// Markup-capable content flows through the sanitizer; everything else is
/// escaped so it reads as literal text no matter what it contains. Badges
/// render as an ordered run of labeled spans after the content, omitted
/// entirely when there are none.
pub fn render(message: &ChatMessage) -> RenderedMessage {
    let content = if message.allow_markup {
        sanitize(&message.content)
    } else {
        escape_html(&message.content)
    };

    let mut html = String::new();
    html.push_str("<div class=\"message ");
    html.push_str(message.role.css_class());
    html.push('"');
    if let Some(id) = &message.id {
        html.push_str(" id=\"msg-");
        html.push_str(&escape_html(id));
        html.push('"');
    }
    html.push('>');

    html.push_str("<div class=\"message-content\">");
    html.push_str(&content);
    html.push_str("</div>");

    if !message.badges.is_empty() {
        html.push_str("<div class=\"message-meta\">");
        for badge in &message.badges {
            html.push_str("<span class=\"source-badge\">");
            html.push_str(&escape_html(badge));
            html.push_str("</span>");
        }
        html.push_str("</div>");
    }

    html.push_str("</div>");

    RenderedMessage {
        id: message.id.clone(),
        role: message.role,
        html,
    }
}

// ── Transcript ─────────────────────────────────────────────────────────────

/// The ordered list of rendered nodes — the widget's stand-in for the chat
/// column of the document tree. Supports replace-by-id so a loading
/// placeholder can be resolved into the final answer at the same position.
#[derive(Debug, Default)]
pub struct Transcript {
    nodes: Vec<RenderedMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Transcript { nodes: Vec::new() }
    }

    /// Render `message` and append it at the end.
    pub fn append(&mut self, message: &ChatMessage) {
        self.nodes.push(render(message));
    }

    /// Replace the node tagged `id` in place, preserving surrounding order.
    /// Returns false when no node carries that id.
    pub fn replace(&mut self, id: &str, message: &ChatMessage) -> bool {
        match self.position(id) {
            Some(index) => {
                self.nodes[index] = render(message);
                true
            }
            None => false,
        }
    }

    /// Remove the node tagged `id`. Returns false when absent.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) => {
                self.nodes.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn nodes(&self) -> &[RenderedMessage] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Concatenated HTML of the whole transcript, for hosts that re-render
    /// the column wholesale.
    pub fn to_html(&self) -> String {
        self.nodes.iter().map(|n| n.html.as_str()).collect()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id.as_deref() == Some(id))
    }
}

// ── Documents panel ────────────────────────────────────────────────────────

/// Render the uploaded-documents list (name, chunk count, human size).
/// Filenames are untrusted input and are escaped.
pub fn render_document_list(documents: &[UploadedDocument]) -> String {
    if documents.is_empty() {
        return "<div class=\"documents-empty\">Aucun document uploadé</div>".to_string();
    }
    let mut html = String::new();
    for doc in documents {
        html.push_str("<div class=\"document-item\"><div><div class=\"document-name\">");
        html.push_str(&escape_html(&doc.filename));
        html.push_str("</div><div class=\"document-size\">");
        html.push_str(&format!("{} chunks • {}", doc.chunk_count, format_bytes(doc.size_bytes)));
        html.push_str("</div></div></div>");
    }
    html
}

/// Human-readable base-1024 size, up to two decimals with trailing zeros
/// trimmed ("1 KB", "1.5 KB", "1.21 MB").
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB"];
    let exponent = (((bytes as f64).ln() / 1024_f64.ln()).floor() as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[exponent])
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_never_interpreted_as_markup() {
        let node = render(&ChatMessage::user("<b>x</b>"));
        assert!(node.html.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(!node.html.contains("<b>x</b>"));
    }

    #[test]
    fn markup_capable_content_is_sanitized() {
        let node = render(&ChatMessage::bot(r#"ok<script>evil()</script><i onclick="x()">i</i>"#));
        assert!(!node.html.contains("script"));
        assert!(!node.html.contains("onclick"));
        assert!(node.html.contains("<i>i</i>"));
    }

    #[test]
    fn badges_render_in_order_and_are_omitted_when_empty() {
        let with = render(
            &ChatMessage::bot("42").with_badges(vec!["💾 Cache".into(), "📄 2 sources".into()]),
        );
        let cache_at = with.html.find("💾 Cache").unwrap();
        let sources_at = with.html.find("📄 2 sources").unwrap();
        assert!(cache_at < sources_at);
        assert_eq!(with.html.matches("source-badge").count(), 2);

        let without = render(&ChatMessage::bot("42"));
        assert!(!without.html.contains("message-meta"));
    }

    #[test]
    fn node_ids_are_escaped_and_tagged() {
        let node = render(&ChatMessage::bot("…").with_id("loading-1"));
        assert!(node.html.contains("id=\"msg-loading-1\""));
    }

    #[test]
    fn replace_preserves_position() {
        let mut transcript = Transcript::new();
        transcript.append(&ChatMessage::user("question"));
        transcript.append(&ChatMessage::bot("chargement").with_id("l1"));
        transcript.append(&ChatMessage::system("note"));

        assert!(transcript.replace("l1", &ChatMessage::bot("réponse")));
        assert_eq!(transcript.len(), 3);
        assert!(transcript.nodes()[1].html.contains("réponse"));
        assert!(transcript.nodes()[2].html.contains("note"));
    }

    #[test]
    fn replace_and_remove_miss_unknown_ids() {
        let mut transcript = Transcript::new();
        transcript.append(&ChatMessage::user("q"));
        assert!(!transcript.replace("nope", &ChatMessage::bot("r")));
        assert!(!transcript.remove("nope"));
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn document_list_escapes_filenames() {
        let docs = vec![UploadedDocument {
            filename: "<img src=x onerror=p()>.pdf".into(),
            chunk_count: 3,
            size_bytes: 2048,
        }];
        let html = render_document_list(&docs);
        assert!(!html.contains("<img"));
        assert!(html.contains("3 chunks • 2 KB"));
    }

    #[test]
    fn document_list_empty_state() {
        assert!(render_document_list(&[]).contains("Aucun document uploadé"));
    }

    #[test]
    fn format_bytes_matches_the_panel() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(500), "500 Bytes");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1_269_000), "1.21 MB");
    }
}
