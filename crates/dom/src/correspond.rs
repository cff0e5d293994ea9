//! Structural correspondence between two isomorphic trees.
//!
//! The data tree and the GUI tree are kept shape-identical, so a node in one
//! maps to the node reached by the same child-index path in the other. The
//! trees may live in one [`Document`] or in two.

use crate::traverse::{descendants, path_to_node};
use crate::{Document, DomError, NodeId};
use std::collections::HashMap;

/// A tree root together with the arena that owns it.
#[derive(Clone, Copy, Debug)]
pub struct TreeRef<'a> {
    pub doc: &'a Document,
    pub root: NodeId,
}

impl<'a> TreeRef<'a> {
    pub fn new(doc: &'a Document, root: NodeId) -> Self {
        Self { doc, root }
    }
}

/// Map `node` (in tree `a`) to the node at the same child-index path in
/// tree `b`.
///
/// Fails with [`DomError::NotInTree`] when `node` is neither `a.root` nor one
/// of its descendants. Fails with [`DomError::ShapeMismatch`], carrying the
/// path prefix walked so far, when a step is missing in `b` or reaches a
/// text node where `a` has an element (or the reverse).
pub fn corresponding_node(a: TreeRef<'_>, b: TreeRef<'_>, node: NodeId) -> Result<NodeId, DomError> {
    let path = path_to_node(a.doc, a.root, node)?;
    let (mut in_a, mut in_b) = (a.root, b.root);
    for depth in 0..=path.len() {
        if depth > 0 {
            let index = path[depth - 1];
            let next = a.doc.child(in_a, index).zip(b.doc.child(in_b, index));
            let Some((next_a, next_b)) = next else {
                return Err(DomError::ShapeMismatch {
                    path: path[..depth].to_vec(),
                });
            };
            (in_a, in_b) = (next_a, next_b);
        }
        if a.doc.is_text(in_a) != b.doc.is_text(in_b) {
            return Err(DomError::ShapeMismatch {
                path: path[..depth].to_vec(),
            });
        }
    }
    log::trace!(target: "dom.correspond", "{node} in {} corresponds to {in_b} in {}", a.root, b.root);
    Ok(in_b)
}

/// Two-way links between the elements of two trees.
///
/// Links are not cleared when the trees change; a lookup through a stale
/// link returns whatever node the id names. Rebuild after re-rendering.
#[derive(Clone, Debug, Default)]
pub struct MirrorMap {
    a_to_b: HashMap<NodeId, NodeId>,
    b_to_a: HashMap<NodeId, NodeId>,
}

impl MirrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(&mut self, a: NodeId, b: NodeId) {
        self.a_to_b.insert(a, b);
        self.b_to_a.insert(b, a);
    }

    /// Mirror in tree B of a node of tree A.
    pub fn mirror_in_b(&self, a: NodeId) -> Option<NodeId> {
        self.a_to_b.get(&a).copied()
    }

    /// Mirror in tree A of a node of tree B.
    pub fn mirror_in_a(&self, b: NodeId) -> Option<NodeId> {
        self.b_to_a.get(&b).copied()
    }

    pub fn len(&self) -> usize {
        self.a_to_b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a_to_b.is_empty()
    }

    pub fn clear(&mut self) {
        self.a_to_b.clear();
        self.b_to_a.clear();
    }
}

/// Link every element of tree `a` with its counterpart in tree `b`.
///
/// Text nodes are not linked: they are merged and split too often for a
/// link to stay meaningful.
pub fn link_trees(a: TreeRef<'_>, b: TreeRef<'_>) -> Result<MirrorMap, DomError> {
    let mut map = MirrorMap::new();
    for node in descendants(a.doc, a.root).filter(|id| a.doc.is_element(*id)) {
        let mirror = corresponding_node(a, b, node)?;
        map.link(node, mirror);
    }
    log::debug!(target: "dom.correspond", "linked {} element(s) of {} with {}", map.len(), a.root, b.root);
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_xml;

    const SOURCE: &str = "<doc><p>a<b>b</b></p><p><i/>c</p></doc>";

    #[test]
    fn maps_nodes_onto_a_clone() {
        let mut doc = Document::new();
        let root = parse_xml(&mut doc, SOURCE).unwrap();
        let cloned = doc.deep_clone(root).unwrap();
        let p = doc.child(root, 1).unwrap();
        let c = doc.child(p, 1).unwrap();

        let a = TreeRef::new(&doc, root);
        let b = TreeRef::new(&doc, cloned);
        let p_clone = corresponding_node(a, b, p).unwrap();
        assert_eq!(p_clone, doc.child(cloned, 1).unwrap());
        let c_clone = corresponding_node(a, b, c).unwrap();
        assert_eq!(doc.text(c_clone), Some("c"));
        assert_ne!(c_clone, c);
        assert_eq!(corresponding_node(a, b, root).unwrap(), cloned);
    }

    #[test]
    fn maps_across_documents() {
        let mut data = Document::new();
        let root = parse_xml(&mut data, SOURCE).unwrap();
        let mut gui = Document::new();
        let gui_root = data.clone_into(root, &mut gui).unwrap();
        let b = data.child(data.child(root, 0).unwrap(), 1).unwrap();

        let found = corresponding_node(TreeRef::new(&data, root), TreeRef::new(&gui, gui_root), b).unwrap();
        assert_eq!(gui.name(found), Some("b"));
    }

    #[test]
    fn fails_for_node_outside_tree() {
        let mut doc = Document::new();
        let root = parse_xml(&mut doc, SOURCE).unwrap();
        let cloned = doc.deep_clone(root).unwrap();
        let stranger = doc.create_element("x");
        let err = corresponding_node(TreeRef::new(&doc, root), TreeRef::new(&doc, cloned), stranger).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("node {stranger} is not the tree {root} or a child of the tree {root}")
        );
    }

    #[test]
    fn fails_when_shapes_diverge() {
        let mut doc = Document::new();
        let root = parse_xml(&mut doc, SOURCE).unwrap();
        let other = parse_xml(&mut doc, "<doc><p/></doc>").unwrap();
        let p = doc.child(root, 1).unwrap();
        assert_eq!(
            corresponding_node(TreeRef::new(&doc, root), TreeRef::new(&doc, other), p),
            Err(DomError::ShapeMismatch { path: vec![1] })
        );
    }

    #[test]
    fn fails_when_kinds_diverge_along_the_path() {
        let mut doc = Document::new();
        let root = parse_xml(&mut doc, "<doc><p><i/></p></doc>").unwrap();
        let other = parse_xml(&mut doc, "<doc><b>t</b></doc>").unwrap();
        let i = doc.child(doc.child(root, 0).unwrap(), 0).unwrap();
        assert_eq!(
            corresponding_node(TreeRef::new(&doc, root), TreeRef::new(&doc, other), i),
            Err(DomError::ShapeMismatch { path: vec![0, 0] })
        );
        let map = link_trees(TreeRef::new(&doc, root), TreeRef::new(&doc, other));
        assert!(matches!(map, Err(DomError::ShapeMismatch { .. })));
    }

    #[test]
    fn text_never_maps_onto_an_element() {
        let mut doc = Document::new();
        let root = parse_xml(&mut doc, "<doc>x</doc>").unwrap();
        let other = parse_xml(&mut doc, "<doc><y/></doc>").unwrap();
        let x = doc.child(root, 0).unwrap();
        assert_eq!(
            corresponding_node(TreeRef::new(&doc, root), TreeRef::new(&doc, other), x),
            Err(DomError::ShapeMismatch { path: vec![0] })
        );
    }

    #[test]
    fn links_both_directions() {
        let mut doc = Document::new();
        let root = parse_xml(&mut doc, SOURCE).unwrap();
        let cloned = doc.deep_clone(root).unwrap();
        let map = link_trees(TreeRef::new(&doc, cloned), TreeRef::new(&doc, root)).unwrap();

        let p = doc.child(root, 0).unwrap();
        let cloned_p = doc.child(cloned, 0).unwrap();
        assert_eq!(map.mirror_in_a(p), Some(cloned_p));
        assert_eq!(map.mirror_in_b(cloned_p), Some(p));
        // doc, two p, b, i
        assert_eq!(map.len(), 5);
    }
}
