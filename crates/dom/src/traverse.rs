use crate::{Document, DomError, NodeId};

/// Follow first children down from `node` until reaching a leaf.
pub fn first_descendant_or_self(doc: &Document, node: NodeId) -> NodeId {
    let mut current = node;
    while let Some(first) = doc.child(current, 0) {
        current = first;
    }
    current
}

/// Pre-order walk of the subtree rooted at `root`, `root` included.
pub fn descendants(doc: &Document, root: NodeId) -> Descendants<'_> {
    let stack = if doc.contains(root) { vec![root] } else { Vec::new() };
    Descendants { doc, stack }
}

pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(current).iter().rev().copied());
        Some(current)
    }
}

/// Child-index path from `root` down to `node`.
///
/// The empty path designates `root` itself.
pub fn path_to_node(doc: &Document, root: NodeId, node: NodeId) -> Result<Vec<usize>, DomError> {
    if !doc.contains(node) {
        return Err(DomError::MissingNode(node));
    }
    let mut path = Vec::new();
    let mut current = node;
    while current != root {
        let (Some(parent), Some(index)) = (doc.parent(current), doc.index_in_parent(current)) else {
            return Err(DomError::NotInTree { node, root });
        };
        path.push(index);
        current = parent;
    }
    path.reverse();
    Ok(path)
}

/// Node reached by following `path` from `root`, if every step exists.
pub fn node_at_path(doc: &Document, root: NodeId, path: &[usize]) -> Option<NodeId> {
    if !doc.contains(root) {
        return None;
    }
    path.iter()
        .try_fold(root, |current, &index| doc.child(current, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_xml;

    #[test]
    fn first_descendant() {
        let mut doc = Document::new();
        let root = parse_xml(&mut doc, "<doc><p><b>abcd</b></p><p/></doc>").unwrap();
        let leaf = first_descendant_or_self(&doc, root);
        assert_eq!(doc.text(leaf), Some("abcd"));
        assert_eq!(first_descendant_or_self(&doc, leaf), leaf);
    }

    #[test]
    fn preorder_walk() {
        let mut doc = Document::new();
        let root = parse_xml(&mut doc, "<a><b>x</b><c/></a>").unwrap();
        let names: Vec<String> = descendants(&doc, root)
            .map(|id| {
                doc.name(id)
                    .map(str::to_owned)
                    .or_else(|| doc.text(id).map(|t| format!("\"{t}\"")))
                    .unwrap_or_default()
            })
            .collect();
        assert_eq!(names, vec!["a", "b", "\"x\"", "c"]);
    }

    #[test]
    fn paths_round_trip() {
        let mut doc = Document::new();
        let root = parse_xml(&mut doc, "<a><b>x</b><c><d/></c></a>").unwrap();
        let d = node_at_path(&doc, root, &[1, 0]).unwrap();
        assert_eq!(doc.name(d), Some("d"));
        assert_eq!(path_to_node(&doc, root, d).unwrap(), vec![1, 0]);
        assert_eq!(path_to_node(&doc, root, root).unwrap(), Vec::<usize>::new());
        assert_eq!(node_at_path(&doc, root, &[5]), None);
    }

    #[test]
    fn path_outside_root_fails() {
        let mut doc = Document::new();
        let root = parse_xml(&mut doc, "<a><b/></a>").unwrap();
        let stranger = doc.create_element("z");
        assert_eq!(
            path_to_node(&doc, root, stranger),
            Err(DomError::NotInTree {
                node: stranger,
                root
            })
        );
    }
}
