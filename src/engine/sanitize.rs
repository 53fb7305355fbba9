// ── Parcelle Engine: Markup Sanitizer ──────────────────────────────────────
// The single audited boundary where untrusted markup-capable content (model
// answers) is made safe for direct placement into a document tree.
//
// Contract:
//   • Every <script> element is removed with its entire subtree.
//   • Every attribute whose name begins with "on" (any case) is stripped
//     from every element, recursively.
//   • Text content and non-executable markup pass through with meaning
//     intact; malformed input never errors — html5ever's recovery parse is
//     re-serialized as-is.
//   • Pure function over a detached fragment; idempotent.

use ego_tree::NodeRef;
use scraper::{Html, Node};

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Escape a string for placement in HTML text or attribute-value position.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Sanitize an untrusted markup fragment.
///
/// The fragment is parsed with html5ever (via `scraper`), which never fails —
/// malformed input degrades to its closest well-formed reading — then
/// re-serialized with script elements dropped and event-handler attributes
/// stripped.
pub fn sanitize(raw_html: &str) -> String {
    let fragment = Html::parse_fragment(raw_html);
    let mut out = String::new();
    for child in fragment.tree.root().children() {
        // parse_fragment wraps content in a synthetic <html> element; unwrap
        // it so the output is the bare fragment.
        if let Node::Element(element) = child.value() {
            if element.name() == "html" {
                for grandchild in child.children() {
                    write_node(grandchild, &mut out);
                }
                continue;
            }
        }
        write_node(child, &mut out);
    }
    out
}

fn write_node(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => out.push_str(&escape_html(&text)),
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(&comment);
            out.push_str("-->");
        }
        Node::Element(element) => {
            let name = element.name();
            if name.eq_ignore_ascii_case("script") {
                // Dropping the node drops its subtree, nested scripts included.
                return;
            }
            out.push('<');
            out.push_str(name);
            for (attr, value) in element.attrs() {
                if is_event_handler(attr) {
                    continue;
                }
                out.push(' ');
                out.push_str(attr);
                out.push_str("=\"");
                out.push_str(&escape_html(value));
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&name) {
                return;
            }
            for child in node.children() {
                write_node(child, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        // Document/Fragment/Doctype/PI nodes carry nothing renderable.
        _ => {}
    }
}

/// Attribute names starting with "on" (any case) are event handlers.
fn is_event_handler(name: &str) -> bool {
    matches!(name.as_bytes(), [b'o' | b'O', b'n' | b'N', ..])
}

// ── Tests ──────────────────────────────────────────────────────────────────
