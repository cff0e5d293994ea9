//! Caret stepping across element and text boundaries.
//!
//! Both directions are pure functions of `(caret, bound, no_text)`. The
//! text-granularity walk is a small state machine over positions:
//!
//! - inside a text node it moves one character and stops, unless the
//!   character crossed begins a whitespace run that collapses at the node's
//!   edge, in which case the whole run is skipped;
//! - leaving a text node is not a stop (the position just outside it is the
//!   same visual place), leaving an element is;
//! - entering a text node or an empty element is a stop, entering a
//!   non-empty element descends further.
//!
//! With `no_text` set, text results are collapsed to the position just
//! before or after their text node and the walk continues until the
//! collapsed position differs from the start. A text result moving
//! backward collapses before its node unless it sits at the node's end, so
//! stepping back into `<b>text</b>` lands at `(b, 1)`, after the text,
//! rather than `(b, 0)`. This mirrors the forward rule, where any offset
//! past the start collapses after the node.

use css::{Edge, is_collapsible};
use dom::{Caret, Document, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Next caret position after `caret` inside `bound`, or `None` when there is
/// none.
///
/// A caret whose node does not exist, whose offset is out of range or which
/// is not inside `bound` gives `None`.
pub fn next_caret_position(doc: &Document, caret: Caret, bound: NodeId, no_text: bool) -> Option<Caret> {
    step(doc, caret, bound, no_text, Direction::Forward)
}

/// Mirror image of [`next_caret_position`].
pub fn prev_caret_position(doc: &Document, caret: Caret, bound: NodeId, no_text: bool) -> Option<Caret> {
    step(doc, caret, bound, no_text, Direction::Backward)
}

fn step(doc: &Document, caret: Caret, bound: NodeId, no_text: bool, direction: Direction) -> Option<Caret> {
    if !caret.is_valid(doc) || !doc.is_inclusive_ancestor(bound, caret.node) {
        log::trace!(target: "caret.step", "{caret} is not a position inside {bound}");
        return None;
    }
    let result = if no_text {
        if doc.is_text(bound) {
            return None;
        }
        step_element_granularity(doc, caret, bound, direction)
    } else {
        step_text_granularity(doc, caret, bound, direction)
    };
    log::trace!(target: "caret.step", "{direction:?} from {caret} within {bound} (no_text={no_text}): {result:?}");
    result
}

fn step_element_granularity(doc: &Document, start: Caret, bound: NodeId, direction: Direction) -> Option<Caret> {
    let mut current = start;
    loop {
        let found = step_text_granularity(doc, current, bound, direction)?;
        let collapsed = collapse_text(doc, found, direction)?;
        if collapsed != start {
            return Some(collapsed);
        }
        current = found;
    }
}

/// Element-child form of a text position; other positions pass through.
fn collapse_text(doc: &Document, caret: Caret, direction: Direction) -> Option<Caret> {
    let len = match doc.text_len(caret.node) {
        Some(len) => len,
        None => return Some(caret),
    };
    let after = match direction {
        Direction::Forward => caret.offset > 0,
        Direction::Backward => caret.offset == len,
    };
    if after {
        Caret::after(doc, caret.node)
    } else {
        Caret::before(doc, caret.node)
    }
}

fn step_text_granularity(doc: &Document, start: Caret, bound: NodeId, direction: Direction) -> Option<Caret> {
    let mut pos = start;
    loop {
        let node = pos.node;
        if let Some(len) = doc.text_len(node) {
            match direction {
                Direction::Forward if pos.offset < len => {
                    if is_collapsible(doc, node, pos.offset, Edge::End) {
                        pos = Caret::new(node, len);
                        continue;
                    }
                    return Some(Caret::new(node, pos.offset + 1));
                }
                Direction::Backward if pos.offset > 0 => {
                    if is_collapsible(doc, node, pos.offset, Edge::Start) {
                        pos = Caret::new(node, 0);
                        continue;
                    }
                    return Some(Caret::new(node, pos.offset - 1));
                }
                _ => {
                    // Leaving a text node does not change the visual place.
                    if node == bound {
                        return None;
                    }
                    pos = exit(doc, node, direction)?;
                    continue;
                }
            }
        }

        let count = doc.child_count(node);
        let child = match direction {
            Direction::Forward if pos.offset < count => doc.child(node, pos.offset),
            Direction::Backward if pos.offset > 0 => doc.child(node, pos.offset - 1),
            _ => {
                if node == bound {
                    return None;
                }
                return exit(doc, node, direction);
            }
        }?;

        if let Some(len) = doc.text_len(child) {
            return Some(match direction {
                Direction::Forward => Caret::new(child, 0),
                Direction::Backward => Caret::new(child, len),
            });
        }
        let child_count = doc.child_count(child);
        if child_count == 0 {
            // Empty elements are caret stops.
            return Some(Caret::new(child, 0));
        }
        pos = match direction {
            Direction::Forward => Caret::new(child, 0),
            Direction::Backward => Caret::new(child, child_count),
        };
    }
}

fn exit(doc: &Document, node: NodeId, direction: Direction) -> Option<Caret> {
    match direction {
        Direction::Forward => Caret::after(doc, node),
        Direction::Backward => Caret::before(doc, node),
    }
}
