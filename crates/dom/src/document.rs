use crate::error::DomError;
use crate::text::char_len;
use crate::types::{NodeId, NodeKind};
use std::sync::Arc;

/// Arena holding one or more node trees.
///
/// Invariants:
/// - A node has at most one parent and appears exactly once in that parent's
///   children list.
/// - Only element nodes have children.
/// - Detaching a node keeps it (and its subtree) in the arena; it simply has
///   no parent any more.
#[derive(Clone, Debug, Default)]
pub struct Document {
    nodes: Vec<NodeRecord>,
}

#[derive(Clone, Debug)]
struct NodeRecord {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of nodes ever allocated, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    fn record(&self, id: NodeId) -> Result<&NodeRecord, DomError> {
        self.nodes.get(id.index()).ok_or(DomError::MissingNode(id))
    }

    fn record_mut(&mut self, id: NodeId) -> Result<&mut NodeRecord, DomError> {
        self.nodes
            .get_mut(id.index())
            .ok_or(DomError::MissingNode(id))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeRecord {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(NodeKind::element(name))
    }

    pub fn create_element_with_attributes(
        &mut self,
        name: &str,
        attributes: Vec<(Arc<str>, Option<String>)>,
    ) -> NodeId {
        self.push(NodeKind::Element {
            name: Arc::from(name),
            attributes,
            style: Vec::new(),
        })
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::text(text))
    }

    // ---------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.index()).map(|r| &r.kind)
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        self.kind(id).is_some_and(NodeKind::is_text)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.kind(id).is_some_and(NodeKind::is_element)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Text { text } => Some(text.as_str()),
            NodeKind::Element { .. } => None,
        }
    }

    /// Length of a text node in characters.
    pub fn text_len(&self, id: NodeId) -> Option<usize> {
        self.text(id).map(char_len)
    }

    /// Largest valid caret offset in `id`: character count for text, child
    /// count for elements.
    pub fn caret_len(&self, id: NodeId) -> Option<usize> {
        match self.kind(id)? {
            NodeKind::Text { text } => Some(char_len(text)),
            NodeKind::Element { .. } => Some(self.child_count(id)),
        }
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { name, .. } => Some(&**name),
            NodeKind::Text { .. } => None,
        }
    }

    pub fn attributes(&self, id: NodeId) -> &[(Arc<str>, Option<String>)] {
        match self.kind(id) {
            Some(NodeKind::Element { attributes, .. }) => attributes.as_slice(),
            _ => &[],
        }
    }

    pub fn attribute(&self, id: NodeId, key: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn style(&self, id: NodeId) -> &[(String, String)] {
        match self.kind(id) {
            Some(NodeKind::Element { style, .. }) => style.as_slice(),
            _ => &[],
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|r| r.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.index())
            .map(|r| r.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    /// Position of `id` among its parent's children.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        self.child(parent, index + 1)
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        index.checked_sub(1).and_then(|i| self.child(parent, i))
    }

    /// Proper ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(id),
        }
    }

    /// `true` if `ancestor` is `node` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.contains(node) {
            return false;
        }
        ancestor == node || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Top-most ancestor of `id` (or `id` itself when detached).
    pub fn root_of(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    // ---------------------------------------------------------------------
    // Writes
    // ---------------------------------------------------------------------

    pub fn set_text(&mut self, id: NodeId, value: &str) -> Result<(), DomError> {
        let text = self.text_mut("set_text", id)?;
        text.clear();
        text.push_str(value);
        Ok(())
    }

    pub(crate) fn text_mut(&mut self, op: &'static str, id: NodeId) -> Result<&mut String, DomError> {
        match &mut self.record_mut(id)?.kind {
            NodeKind::Text { text } => Ok(text),
            NodeKind::Element { .. } => Err(DomError::NotText { op, node: id }),
        }
    }

    pub fn set_attribute(
        &mut self,
        id: NodeId,
        key: &str,
        value: Option<String>,
    ) -> Result<(), DomError> {
        match &mut self.record_mut(id)?.kind {
            NodeKind::Element { attributes, .. } => {
                if let Some(slot) = attributes
                    .iter_mut()
                    .find(|(k, _)| k.eq_ignore_ascii_case(key))
                {
                    slot.1 = value;
                } else {
                    attributes.push((Arc::from(key), value));
                }
                Ok(())
            }
            NodeKind::Text { .. } => Err(DomError::NotElement {
                op: "set_attribute",
                node: id,
            }),
        }
    }

    pub fn set_style(&mut self, id: NodeId, declarations: Vec<(String, String)>) -> Result<(), DomError> {
        match &mut self.record_mut(id)?.kind {
            NodeKind::Element { style, .. } => {
                *style = declarations;
                Ok(())
            }
            NodeKind::Text { .. } => Err(DomError::NotElement {
                op: "set_style",
                node: id,
            }),
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let index = self.child_count(parent);
        // A child already under `parent` moves to the end.
        let index = if self.parent(child) == Some(parent) {
            index - 1
        } else {
            index
        };
        self.insert_child(parent, index, child)
    }

    /// Insert `child` so that it ends up at `index` among `parent`'s
    /// children. A child attached elsewhere is moved.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<(), DomError> {
        self.check_insertable("insert_child", parent, child)?;
        self.detach(child)?;
        let len = self.child_count(parent);
        if index > len {
            return Err(DomError::OffsetOutOfRange {
                node: parent,
                offset: index,
                len,
            });
        }
        self.record_mut(parent)?.children.insert(index, child);
        self.record_mut(child)?.parent = Some(parent);
        log::trace!(target: "dom.tree", "insert {child} into {parent} at {index}");
        Ok(())
    }

    /// DOM-style `insertBefore`; `before = None` appends.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        before: Option<NodeId>,
    ) -> Result<(), DomError> {
        let Some(before) = before else {
            return self.append_child(parent, child);
        };
        if self.parent(before) != Some(parent) {
            return Err(DomError::NotInTree {
                node: before,
                root: parent,
            });
        }
        self.check_insertable("insert_before", parent, child)?;
        self.detach(child)?;
        let index = self
            .index_in_parent(before)
            .ok_or(DomError::Detached {
                op: "insert_before",
                node: before,
            })?;
        self.insert_child(parent, index, child)
    }

    fn check_insertable(&self, op: &'static str, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.record(child)?;
        match self.record(parent)?.kind {
            NodeKind::Element { .. } => {}
            NodeKind::Text { .. } => return Err(DomError::NotElement { op, node: parent }),
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::Cycle { parent, child });
        }
        Ok(())
    }

    /// Remove `id` from its parent, keeping its subtree intact.
    ///
    /// Returns the former parent and index, or `None` if already detached.
    pub fn detach(&mut self, id: NodeId) -> Result<Option<(NodeId, usize)>, DomError> {
        let Some(parent) = self.record(id)?.parent else {
            return Ok(None);
        };
        let siblings = &mut self.record_mut(parent)?.children;
        let index = siblings
            .iter()
            .position(|c| *c == id)
            .ok_or(DomError::NotInTree { node: id, root: parent })?;
        siblings.remove(index);
        self.record_mut(id)?.parent = None;
        log::trace!(target: "dom.tree", "detach {id} from {parent} at {index}");
        Ok(Some((parent, index)))
    }

    /// Copy the subtree rooted at `id` into a new detached subtree.
    pub fn deep_clone(&mut self, id: NodeId) -> Result<NodeId, DomError> {
        let kind = self.record(id)?.kind.clone();
        let copy = self.push(kind);
        let children = self.children(id).to_vec();
        for child in children {
            let child_copy = self.deep_clone(child)?;
            self.record_mut(child_copy)?.parent = Some(copy);
            self.record_mut(copy)?.children.push(child_copy);
        }
        Ok(copy)
    }

    /// Copy the subtree rooted at `id` into another document.
    pub fn clone_into(&self, id: NodeId, target: &mut Document) -> Result<NodeId, DomError> {
        let copy = target.push(self.record(id)?.kind.clone());
        for &child in self.children(id) {
            let child_copy = self.clone_into(child, target)?;
            target.record_mut(child_copy)?.parent = Some(copy);
            target.record_mut(copy)?.children.push(child_copy);
        }
        Ok(copy)
    }
}

pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}
