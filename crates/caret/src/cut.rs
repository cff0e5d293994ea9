//! Range cut.
//!
//! A range is either two offsets in one text node, or two boundaries in one
//! element `E` where each boundary is an element-child position in `E` or a
//! text position in a text child of `E`.

use crate::traits::TreeMutator;
use dom::{Caret, Document, DomError, NodeId};

/// Remove the content between `start` and `end` from `doc`.
///
/// Returns the caret where the content was and the removed nodes in
/// document order.
pub fn cut(doc: &mut Document, start: Caret, end: Caret) -> Result<(Caret, Vec<NodeId>), DomError> {
    generic_cut(doc, start, end)
}

/// [`cut`] written against a [`TreeMutator`], so callers can route the
/// mutations through their own bookkeeping.
///
/// Partially covered text at either boundary is removed from its node and
/// returned as a new detached text node. When the nodes left on both sides
/// of the gap are text they are merged and the merge point is the returned
/// caret; otherwise the caret is the gap as a child index of the shared
/// element.
pub fn generic_cut<M: TreeMutator + ?Sized>(
    mutator: &mut M,
    start: Caret,
    end: Caret,
) -> Result<(Caret, Vec<NodeId>), DomError> {
    let malformed = || DomError::MalformedRange {
        start_node: start.node,
        start_offset: start.offset,
        end_node: end.node,
        end_offset: end.offset,
    };
    for caret in [start, end] {
        let doc = mutator.document();
        let len = doc.caret_len(caret.node).ok_or(DomError::MissingNode(caret.node))?;
        if caret.offset > len {
            return Err(DomError::OffsetOutOfRange {
                node: caret.node,
                offset: caret.offset,
                len,
            });
        }
    }

    if start.node == end.node && mutator.document().is_text(start.node) {
        if start.offset > end.offset {
            return Err(malformed());
        }
        return cut_in_text(mutator, start, end.offset - start.offset);
    }

    let plan = Plan::new(mutator.document(), start, end).ok_or_else(malformed)?;
    log::debug!(target: "caret.cut", "cut {start}..{end} in {}: children {}..{}", plan.element, plan.lo, plan.hi);

    let mut removed = Vec::with_capacity(plan.between.len() + 2);

    // End side first; ids were captured up front so order does not shift them.
    let tail = match plan.end_text {
        Some((node, offset)) if offset > 0 => Some(mutator.delete_text(node, 0, offset)?),
        _ => None,
    };
    for &child in &plan.between {
        mutator.delete_node(child)?;
    }
    let head = match plan.start_text {
        Some((node, offset)) => {
            let len = mutator.document().text_len(node).unwrap_or(0);
            if offset < len {
                Some(mutator.delete_text(node, offset, len - offset)?)
            } else {
                None
            }
        }
        None => None,
    };

    if let Some(head) = head {
        removed.push(mutator.create_text(&head));
    }
    removed.extend(plan.between.iter().copied());
    if let Some(tail) = tail {
        removed.push(mutator.create_text(&tail));
    }

    let (left, right) = {
        let doc = mutator.document();
        let attached = |id: &NodeId| doc.parent(*id) == Some(plan.element);
        let left = plan.left.iter().copied().find(attached);
        let right = plan.right.iter().copied().find(attached);
        (left.filter(|id| doc.is_text(*id)), right)
    };
    let caret = match (left, right) {
        (Some(l), Some(r)) if mutator.document().is_text(r) => mutator.merge_text_nodes(l, r)?,
        (_, Some(r)) => Caret::new(plan.element, mutator.document().index_in_parent(r).unwrap_or(0)),
        (_, None) => Caret::new(plan.element, mutator.document().child_count(plan.element)),
    };
    log::debug!(target: "caret.cut", "cut removed {} node(s); caret {caret}", removed.len());
    Ok((caret, removed))
}

fn cut_in_text<M: TreeMutator + ?Sized>(
    mutator: &mut M,
    start: Caret,
    count: usize,
) -> Result<(Caret, Vec<NodeId>), DomError> {
    let fallback = Caret::before(mutator.document(), start.node);
    let text = mutator.delete_text(start.node, start.offset, count)?;
    let caret = if mutator.document().parent(start.node).is_some() {
        start
    } else {
        fallback.ok_or(DomError::Detached {
            op: "cut",
            node: start.node,
        })?
    };
    let removed = mutator.create_text(&text);
    log::debug!(target: "caret.cut", "cut {count} char(s) from {}; caret {caret}", start.node);
    Ok((caret, vec![removed]))
}

/// Everything the cut needs, resolved before the first mutation.
struct Plan {
    element: NodeId,
    lo: usize,
    hi: usize,
    start_text: Option<(NodeId, usize)>,
    end_text: Option<(NodeId, usize)>,
    between: Vec<NodeId>,
    /// Nodes that may sit left of the gap afterwards, preferred first.
    left: Vec<NodeId>,
    /// Nodes that may sit right of the gap afterwards, preferred first.
    right: Vec<NodeId>,
}

impl Plan {
    fn new(doc: &Document, start: Caret, end: Caret) -> Option<Self> {
        let (element, lo, start_text) = if doc.is_text(start.node) {
            let parent = doc.parent(start.node)?;
            (parent, doc.index_in_parent(start.node)? + 1, Some((start.node, start.offset)))
        } else {
            (start.node, start.offset, None)
        };
        let (end_element, hi, end_text) = if doc.is_text(end.node) {
            let parent = doc.parent(end.node)?;
            (parent, doc.index_in_parent(end.node)?, Some((end.node, end.offset)))
        } else {
            (end.node, end.offset, None)
        };
        if element != end_element || lo > hi {
            return None;
        }

        let between = doc.children(element)[lo..hi].to_vec();
        let mut left = Vec::new();
        if let Some((node, _)) = start_text {
            left.push(node);
        }
        if let Some(prev) = start_text
            .map(|(node, _)| doc.prev_sibling(node))
            .unwrap_or_else(|| lo.checked_sub(1).and_then(|i| doc.child(element, i)))
        {
            left.push(prev);
        }
        let mut right = Vec::new();
        if let Some((node, _)) = end_text {
            right.push(node);
        }
        if let Some(next) = end_text
            .map(|(node, _)| doc.next_sibling(node))
            .unwrap_or_else(|| doc.child(element, hi))
        {
            right.push(next);
        }

        Some(Self {
            element,
            lo,
            hi,
            start_text,
            end_text,
            between,
            left,
            right,
        })
    }
}
