use crate::{Document, DomError, NodeId};
use std::sync::Arc;

/// Build a detached tree from XML text and return its root element.
///
/// Elements, attributes and text are kept; comments, processing
/// instructions and the XML declaration are dropped. Adjacent text
/// produced by dropping a comment is merged so the result is normalised.
/// Element names keep their namespace prefix (`tei:p`); attribute names are
/// local names.
pub fn parse_xml(doc: &mut Document, source: &str) -> Result<NodeId, DomError> {
    let xml = roxmltree::Document::parse(source).map_err(|e| DomError::Parse(e.to_string()))?;
    let root = build(doc, xml.root_element())?;
    log::debug!(target: "dom.tree", "parsed {} bytes of xml into {root}", source.len());
    Ok(root)
}

fn build(doc: &mut Document, element: roxmltree::Node<'_, '_>) -> Result<NodeId, DomError> {
    let attributes = element
        .attributes()
        .map(|a| (Arc::<str>::from(a.name()), Some(a.value().to_owned())))
        .collect();
    let local = element.tag_name().name();
    let prefix = element
        .tag_name()
        .namespace()
        .and_then(|uri| element.lookup_prefix(uri))
        .filter(|prefix| !prefix.is_empty());
    let id = match prefix {
        Some(prefix) => doc.create_element_with_attributes(&format!("{prefix}:{local}"), attributes),
        None => doc.create_element_with_attributes(local, attributes),
    };
    let mut pending = String::new();
    for child in element.children() {
        if child.is_element() {
            flush_text(doc, id, &mut pending)?;
            let built = build(doc, child)?;
            doc.append_child(id, built)?;
        } else if child.is_text() {
            pending.push_str(child.text().unwrap_or_default());
        }
    }
    flush_text(doc, id, &mut pending)?;
    Ok(id)
}

fn flush_text(doc: &mut Document, parent: NodeId, pending: &mut String) -> Result<(), DomError> {
    if pending.is_empty() {
        return Ok(());
    }
    let text = doc.create_text(std::mem::take(pending));
    doc.append_child(parent, text)
}
