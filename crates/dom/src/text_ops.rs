//! Text node mutation primitives.
//!
//! Every primitive leaves the touched parent normalised before returning: no
//! two adjacent text siblings and no empty text node, with the single
//! exception of the pair returned by [`split_text_node`].

use crate::text::{char_len, clamp_offset, drain_chars, insert_chars, split_at_char};
use crate::traverse::descendants;
use crate::{Caret, Content, Document, DomError, NodeId, NodeKind};

fn require_text(doc: &Document, op: &'static str, node: NodeId) -> Result<(), DomError> {
    match doc.kind(node) {
        Some(NodeKind::Text { .. }) => Ok(()),
        Some(NodeKind::Element { .. }) => Err(DomError::NotText { op, node }),
        None => Err(DomError::MissingNode(node)),
    }
}

fn attached_parent(doc: &Document, op: &'static str, node: NodeId) -> Result<(NodeId, usize), DomError> {
    match (doc.parent(node), doc.index_in_parent(node)) {
        (Some(parent), Some(index)) => Ok((parent, index)),
        _ => Err(DomError::Detached { op, node }),
    }
}

/// Replace `node` with two text nodes holding the text before and after
/// `offset`.
///
/// The offset is clamped to `[0, len]`. Both halves stay attached even when
/// empty; the original node is detached.
pub fn split_text_node(doc: &mut Document, node: NodeId, offset: isize) -> Result<(NodeId, NodeId), DomError> {
    require_text(doc, "split_text_node", node)?;
    let (parent, index) = attached_parent(doc, "split_text_node", node)?;
    let (head, tail) = {
        let text = doc.text(node).unwrap_or_default();
        let (head, tail) = split_at_char(text, clamp_offset(offset, char_len(text)));
        (head.to_owned(), tail.to_owned())
    };
    let before = doc.create_text(head);
    let after = doc.create_text(tail);
    doc.detach(node)?;
    doc.insert_child(parent, index, before)?;
    doc.insert_child(parent, index + 1, after)?;
    log::trace!(target: "dom.text", "split {node} at {offset} into {before} + {after}");
    Ok((before, after))
}

/// Insert `content` inside the text node `node` at `offset`.
///
/// Text at the edges of the inserted content is merged with the surrounding
/// text. The returned carets bracket the inserted content and must be used
/// instead of node ids captured before the call: the host node is replaced
/// and text nodes may be merged away. When one side of the split is empty
/// its caret is an element-child position in the parent.
pub fn insert_into_text(
    doc: &mut Document,
    node: NodeId,
    offset: isize,
    content: impl Into<Content>,
) -> Result<(Caret, Caret), DomError> {
    let content = content.into();
    require_text(doc, "insert_into_text", node)?;
    let items = content.nodes().to_vec();
    if items.is_empty() {
        return Err(DomError::MissingContent);
    }
    if items.iter().any(|item| !doc.contains(*item)) {
        return Err(DomError::MissingContent);
    }
    let (parent, _) = attached_parent(doc, "insert_into_text", node)?;
    if let Some(&item) = items.iter().find(|item| doc.is_inclusive_ancestor(**item, node)) {
        return Err(DomError::Cycle {
            parent,
            child: item,
        });
    }

    let (before, after) = split_text_node(doc, node, offset)?;
    for &item in &items {
        doc.insert_before(parent, item, Some(after))?;
    }

    let mut run = Vec::with_capacity(items.len() + 2);
    run.push(before);
    run.extend_from_slice(&items);
    run.push(after);
    let (before_caret, after_caret) = normalize_run(doc, parent, &run)?;
    log::trace!(
        target: "dom.text",
        "insert {} node(s) into {node} at {offset}: {before_caret} .. {after_caret}",
        items.len()
    );
    Ok((before_caret, after_caret))
}

/// Normalise `run`, a sequence of adjacent siblings in `parent`, and return
/// the carets at the boundary after its first node and before its last.
///
/// Empty text nodes are dropped and adjacent text is merged. A boundary
/// preceded by text is the end of that text, unless it is the end boundary
/// and the last node is empty. Otherwise the start boundary is an
/// element-child position and the end boundary is the start of the text
/// following it or an element-child position.
fn normalize_run(doc: &mut Document, parent: NodeId, run: &[NodeId]) -> Result<(Caret, Caret), DomError> {
    let (start_slot, end_slot) = (1, run.len() - 1);
    let mut index = doc.index_in_parent(run[0]).ok_or(DomError::Detached {
        op: "insert_into_text",
        node: run[0],
    })?;
    let mut start = None;
    let mut end = None;
    let mut end_pending = false;
    let mut prev_text: Option<NodeId> = None;

    for (slot, &node) in run.iter().enumerate() {
        let at_text_end = prev_text.map(|t| Caret::new(t, doc.text_len(t).unwrap_or(0)));
        if slot == start_slot {
            start = Some(at_text_end.unwrap_or(Caret::new(parent, index)));
        }
        if slot == end_slot {
            // an empty trailing side always yields a child position
            end = at_text_end.filter(|_| doc.text_len(node) != Some(0));
            end_pending = end.is_none();
        }

        match doc.text_len(node) {
            Some(0) => {
                doc.detach(node)?;
            }
            Some(_) => match prev_text {
                Some(prev) => {
                    merge_text_nodes(doc, prev, node)?;
                }
                None => {
                    if end_pending {
                        end = Some(Caret::new(node, 0));
                        end_pending = false;
                    }
                    prev_text = Some(node);
                    index += 1;
                }
            },
            None => {
                if end_pending {
                    end = Some(Caret::new(parent, index));
                    end_pending = false;
                }
                prev_text = None;
                index += 1;
            }
        }
    }

    let fallback = Caret::new(parent, index);
    Ok((start.unwrap_or(fallback), end.unwrap_or(fallback)))
}

/// Insert plain text at a caret position.
///
/// In a text node the text goes in at the character offset and the result
/// is `(Some(node), Some(node))`. In an element an adjacent text node is
/// extended when possible (previous sibling first, then next sibling),
/// giving `(Some(n), Some(n))`; otherwise a new text node is created at the
/// child index and the result is `(None, Some(new))`. Inserting an empty
/// string does nothing and returns `(None, None)`.
pub fn insert_text(
    doc: &mut Document,
    container: NodeId,
    offset: usize,
    text: &str,
) -> Result<(Option<NodeId>, Option<NodeId>), DomError> {
    if text.is_empty() {
        return Ok((None, None));
    }
    match doc.kind(container) {
        None => Err(DomError::MissingNode(container)),
        Some(NodeKind::Text { text: current }) => {
            let len = char_len(current);
            if offset > len {
                return Err(DomError::OffsetOutOfRange {
                    node: container,
                    offset,
                    len,
                });
            }
            insert_chars(doc.text_mut("insert_text", container)?, offset, text);
            log::trace!(target: "dom.text", "insert {text:?} into {container} at {offset}");
            Ok((Some(container), Some(container)))
        }
        Some(NodeKind::Element { .. }) => {
            let len = doc.child_count(container);
            if offset > len {
                return Err(DomError::OffsetOutOfRange {
                    node: container,
                    offset,
                    len,
                });
            }
            let prev = offset
                .checked_sub(1)
                .and_then(|i| doc.child(container, i))
                .filter(|id| doc.is_text(*id));
            if let Some(prev) = prev {
                doc.text_mut("insert_text", prev)?.push_str(text);
                log::trace!(target: "dom.text", "extend previous {prev} with {text:?}");
                return Ok((Some(prev), Some(prev)));
            }
            let next = doc.child(container, offset).filter(|id| doc.is_text(*id));
            if let Some(next) = next {
                doc.text_mut("insert_text", next)?.insert_str(0, text);
                log::trace!(target: "dom.text", "extend next {next} with {text:?}");
                return Ok((Some(next), Some(next)));
            }
            let created = doc.create_text(text);
            doc.insert_child(container, offset, created)?;
            log::trace!(target: "dom.text", "create {created} in {container} at {offset}");
            Ok((None, Some(created)))
        }
    }
}

/// Remove `count` characters starting at `offset` and return them.
///
/// A text node left empty is detached.
pub fn delete_text(doc: &mut Document, node: NodeId, offset: usize, count: usize) -> Result<String, DomError> {
    require_text(doc, "delete_text", node)?;
    let buffer = doc.text_mut("delete_text", node)?;
    let removed = drain_chars(buffer, offset, count);
    let emptied = buffer.is_empty();
    if emptied {
        doc.detach(node)?;
    }
    log::trace!(
        target: "dom.text",
        "delete {removed:?} from {node} at {offset}{}",
        if emptied { " (detached)" } else { "" }
    );
    Ok(removed)
}

/// Append the text of `second` to `first` and detach `second`.
///
/// `second` must be the next sibling of `first`. Returns the caret at the
/// junction.
pub fn merge_text_nodes(doc: &mut Document, first: NodeId, second: NodeId) -> Result<Caret, DomError> {
    require_text(doc, "merge_text_nodes", first)?;
    require_text(doc, "merge_text_nodes", second)?;
    if doc.next_sibling(first) != Some(second) {
        return Err(DomError::NotAdjacent { first, second });
    }
    let tail = doc.text(second).unwrap_or_default().to_owned();
    let buffer = doc.text_mut("merge_text_nodes", first)?;
    let junction = char_len(buffer);
    buffer.push_str(&tail);
    doc.detach(second)?;
    log::trace!(target: "dom.text", "merge {second} into {first} at {junction}");
    Ok(Caret::new(first, junction))
}

/// Detach `node` together with its subtree.
pub fn delete_node(doc: &mut Document, node: NodeId) -> Result<(), DomError> {
    if !doc.contains(node) {
        return Err(DomError::MissingNode(node));
    }
    doc.detach(node)?;
    Ok(())
}

/// Merge adjacent text nodes and drop empty ones throughout the subtree.
pub fn normalize(doc: &mut Document, root: NodeId) -> Result<(), DomError> {
    if !doc.contains(root) {
        return Err(DomError::MissingNode(root));
    }
    let elements: Vec<NodeId> = descendants(doc, root)
        .filter(|id| doc.is_element(*id))
        .collect();
    for element in elements {
        let mut index = 0;
        while let Some(child) = doc.child(element, index) {
            if doc.text_len(child) == Some(0) {
                doc.detach(child)?;
                continue;
            }
            if doc.is_text(child) {
                if let Some(next) = doc.child(element, index + 1).filter(|id| doc.is_text(*id)) {
                    merge_text_nodes(doc, child, next)?;
                    continue;
                }
            }
            index += 1;
        }
    }
    Ok(())
}

/// `true` if no element in the subtree has two adjacent text children or an
/// empty text child.
pub fn is_normalized(doc: &Document, root: NodeId) -> bool {
    descendants(doc, root).all(|id| {
        let children = doc.children(id);
        children.iter().all(|c| doc.text_len(*c) != Some(0))
            && children
                .windows(2)
                .all(|pair| !(doc.is_text(pair[0]) && doc.is_text(pair[1])))
    })
}
