//! Stepper and cut properties over generated trees.

use caret::{cut, next_caret_position, prev_caret_position};
use dom::{Caret, Document, NodeId, descendants, path_to_node, text_content};
use dom_test_support::shapes::{arb_root, build};
use proptest::prelude::*;
use proptest::sample::Index;

fn elements(doc: &Document, root: NodeId) -> Vec<NodeId> {
    descendants(doc, root).filter(|id| doc.is_element(*id)).collect()
}

fn positions(doc: &Document, bound: NodeId) -> Vec<Caret> {
    descendants(doc, bound)
        .flat_map(|node| {
            let len = doc.caret_len(node).unwrap_or(0);
            (0..=len).map(move |offset| Caret::new(node, offset))
        })
        .collect()
}

/// Document-order key: node path with the offset appended. Text nodes have
/// no children, so the key orders text positions between the element
/// positions around them.
fn key(doc: &Document, bound: NodeId, caret: Caret) -> Vec<usize> {
    let mut key = path_to_node(doc, bound, caret.node).expect("caret inside bound");
    key.push(caret.offset);
    key
}

fn size(doc: &Document, node: NodeId) -> usize {
    match doc.text_len(node) {
        Some(len) => len,
        None => 2 + doc.children(node).iter().map(|c| size(doc, *c)).sum::<usize>(),
    }
}

/// Atoms (characters and tags) before the start of `node`'s content.
fn content_start(doc: &Document, bound: NodeId, node: NodeId) -> usize {
    if node == bound {
        return 0;
    }
    let parent = doc.parent(node).expect("attached");
    let index = doc.index_in_parent(node).expect("attached");
    let before: usize = doc.children(parent)[..index].iter().map(|c| size(doc, *c)).sum();
    content_start(doc, bound, parent) + before + usize::from(doc.is_element(node))
}

/// Visual place of a caret: positions with nothing between them share one.
fn place(doc: &Document, bound: NodeId, caret: Caret) -> usize {
    let start = content_start(doc, bound, caret.node);
    if doc.is_text(caret.node) {
        start + caret.offset
    } else {
        start
            + doc.children(caret.node)[..caret.offset]
                .iter()
                .map(|c| size(doc, *c))
                .sum::<usize>()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn steps_stay_in_bound_and_move_in_document_order(
        shape in arb_root(),
        pick in any::<Index>(),
        no_text in any::<bool>(),
    ) {
        let mut doc = Document::new();
        let root = build(&mut doc, &shape);
        let candidates: Vec<NodeId> = descendants(&doc, root).collect();
        let bound = *pick.get(&candidates);

        for p in positions(&doc, bound) {
            if let Some(q) = next_caret_position(&doc, p, bound, no_text) {
                prop_assert!(q.is_valid(&doc));
                prop_assert!(doc.is_inclusive_ancestor(bound, q.node));
                prop_assert!(key(&doc, bound, q) > key(&doc, bound, p), "next {p} -> {q}");
                prop_assert!(!no_text || doc.is_element(q.node));
            }
            if let Some(q) = prev_caret_position(&doc, p, bound, no_text) {
                prop_assert!(q.is_valid(&doc));
                prop_assert!(doc.is_inclusive_ancestor(bound, q.node));
                prop_assert!(key(&doc, bound, q) < key(&doc, bound, p), "prev {p} -> {q}");
                prop_assert!(!no_text || doc.is_element(q.node));
            }
        }
    }

    #[test]
    fn walks_terminate(shape in arb_root(), no_text in any::<bool>()) {
        let mut doc = Document::new();
        let root = build(&mut doc, &shape);
        let cap = positions(&doc, root).len() + 1;

        let mut steps = 0;
        let mut here = Caret::new(root, 0);
        while let Some(next) = next_caret_position(&doc, here, root, no_text) {
            here = next;
            steps += 1;
            prop_assert!(steps <= cap);
        }
        steps = 0;
        here = Caret::new(root, doc.child_count(root));
        while let Some(prev) = prev_caret_position(&doc, here, root, no_text) {
            here = prev;
            steps += 1;
            prop_assert!(steps <= cap);
        }
    }

    // Stepping is not a strict inverse: forward stops on leaving an element
    // where backward descends, and entering text is a second stop at the
    // same place. Without whitespace a short backward walk from `next(p)`
    // still gets back to `p`'s place.
    #[test]
    fn backward_walk_returns_to_origin_place(shape in arb_root(), pick in any::<Index>()) {
        let mut doc = Document::new();
        let root = build(&mut doc, &shape.without_whitespace());
        let candidates = elements(&doc, root);
        let bound = *pick.get(&candidates);

        for p in positions(&doc, bound) {
            let Some(q) = next_caret_position(&doc, p, bound, false) else {
                continue;
            };
            let origin = place(&doc, bound, p);
            let budget = 2 * place(&doc, bound, q).saturating_sub(origin) + 2;
            let mut here = q;
            let mut returned = place(&doc, bound, here) <= origin;
            for _ in 0..budget {
                if returned {
                    break;
                }
                match prev_caret_position(&doc, here, bound, false) {
                    Some(prev) => here = prev,
                    None => break,
                }
                returned = place(&doc, bound, here) <= origin;
            }
            prop_assert!(returned, "from {p} via {q}: stuck at {here}");
        }
    }

    #[test]
    fn cut_then_reinsert_restores_text(
        shape in arb_root(),
        pick in any::<Index>(),
        lo in any::<Index>(),
        hi in any::<Index>(),
        start_in_text in any::<bool>(),
        end_in_text in any::<bool>(),
        start_offset in any::<Index>(),
        end_offset in any::<Index>(),
    ) {
        let mut doc = Document::new();
        let root = build(&mut doc, &shape);
        let original = text_content(&doc, root);
        let candidates = elements(&doc, root);
        let element = *pick.get(&candidates);

        let count = doc.child_count(element);
        let (a, b) = (lo.index(count + 1), hi.index(count + 1));
        let (lo, hi) = (a.min(b), a.max(b));

        let text_child = |index: Option<usize>| index.and_then(|i| doc.child(element, i)).filter(|id| doc.is_text(*id));
        let start = match text_child(lo.checked_sub(1)) {
            Some(t) if start_in_text => Caret::new(t, start_offset.index(doc.text_len(t).unwrap_or(0) + 1)),
            _ => Caret::new(element, lo),
        };
        let end = match text_child(Some(hi)) {
            Some(t) if end_in_text => Caret::new(t, end_offset.index(doc.text_len(t).unwrap_or(0) + 1)),
            _ => Caret::new(element, hi),
        };

        let (at, removed) = cut(&mut doc, start, end).unwrap();
        prop_assert!(dom::is_normalized(&doc, root));
        if removed.is_empty() {
            prop_assert_eq!(text_content(&doc, root), original);
            return Ok(());
        }

        if doc.is_text(at.node) {
            dom::insert_into_text(&mut doc, at.node, at.offset as isize, removed).unwrap();
        } else {
            for (i, id) in removed.into_iter().enumerate() {
                doc.insert_child(at.node, at.offset + i, id).unwrap();
            }
            dom::normalize(&mut doc, at.node).unwrap();
        }
        prop_assert_eq!(text_content(&doc, root), original);
        prop_assert!(dom::is_normalized(&doc, root));
    }
}
