//! XML-style serialization of node trees, used for assertions and logging.
//!
//! Elements without children render self-closed (`<i/>`). Attribute order is
//! preserved. Inline style is not serialized separately; it lives in the
//! `style` attribute when the tree was parsed from markup.

use crate::{Document, NodeId, NodeKind};
use std::fmt::Write;

/// Markup of the children of `node`.
pub fn inner_markup(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    for &child in doc.children(node) {
        write_node(doc, child, &mut out);
    }
    out
}

/// Markup of `node` itself, including its children.
pub fn outer_markup(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, node, &mut out);
    out
}

/// Concatenated text of every text node in the subtree, in document order.
pub fn text_content(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    collect_text(doc, node, &mut out);
    out
}

fn collect_text(doc: &Document, node: NodeId, out: &mut String) {
    if let Some(text) = doc.text(node) {
        out.push_str(text);
        return;
    }
    for &child in doc.children(node) {
        collect_text(doc, child, out);
    }
}

fn write_node(doc: &Document, node: NodeId, out: &mut String) {
    match doc.kind(node) {
        None => {}
        Some(NodeKind::Text { text }) => escape_into(out, text, false),
        Some(NodeKind::Element {
            name, attributes, ..
        }) => {
            out.push('<');
            out.push_str(name);
            for (key, value) in attributes {
                let _ = write!(out, " {key}=\"");
                escape_into(out, value.as_deref().unwrap_or_default(), true);
                out.push('"');
            }
            let children = doc.children(node);
            if children.is_empty() {
                out.push_str("/>");
                return;
            }
            out.push('>');
            for &child in children {
                write_node(doc, child, out);
            }
            let _ = write!(out, "</{name}>");
        }
    }
}

fn escape_into(out: &mut String, s: &str, attribute: bool) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

/// Indented one-line-per-node outline of a subtree, capped at `cap` lines.
///
/// Text previews are truncated and have newlines flattened; meant for log
/// output, not for comparisons.
pub fn outline(doc: &Document, root: NodeId, cap: usize) -> Vec<String> {
    const INDENT_STEP: &str = "  ";
    const PREVIEW_CHARS: usize = 40;

    fn walk(doc: &Document, node: NodeId, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let mut line = INDENT_STEP.repeat(depth);
        match doc.kind(node) {
            None => return,
            Some(NodeKind::Text { text }) => {
                line.push('"');
                let mut truncated = false;
                for (i, ch) in text.chars().enumerate() {
                    if i == PREVIEW_CHARS {
                        truncated = true;
                        break;
                    }
                    line.push(if ch == '\n' { ' ' } else { ch });
                }
                if truncated {
                    line.push('…');
                }
                line.push('"');
            }
            Some(NodeKind::Element { name, style, .. }) => {
                let _ = write!(line, "<{name}> {node}");
                if !style.is_empty() {
                    line.push_str("  /* ");
                    for (i, (k, v)) in style.iter().take(3).enumerate() {
                        if i != 0 {
                            line.push(' ');
                        }
                        let _ = write!(line, "{k}: {v};");
                    }
                    line.push_str(" */");
                }
            }
        }
        out.push(line);
        for &child in doc.children(node) {
            walk(doc, child, depth + 1, out, left);
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    walk(doc, root, 0, &mut out, &mut left);
    out
}
