use crate::{Document, NodeId};
use std::fmt;

/// Addressable editing position.
///
/// In a text node `offset` is a character index in `[0, len]`; in an
/// element it is a child index in `[0, child_count]`, naming the gap before
/// child `offset`. Equality is by node identity and offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Caret {
    pub node: NodeId,
    pub offset: usize,
}

impl Caret {
    #[inline]
    pub const fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }

    /// `true` if the node exists and the offset is within its caret length.
    pub fn is_valid(&self, doc: &Document) -> bool {
        doc.caret_len(self.node)
            .is_some_and(|len| self.offset <= len)
    }

    /// Position just before `node` in its parent.
    pub fn before(doc: &Document, node: NodeId) -> Option<Self> {
        let parent = doc.parent(node)?;
        Some(Self::new(parent, doc.index_in_parent(node)?))
    }

    /// Position just after `node` in its parent.
    pub fn after(doc: &Document, node: NodeId) -> Option<Self> {
        let parent = doc.parent(node)?;
        Some(Self::new(parent, doc.index_in_parent(node)? + 1))
    }
}

impl From<(NodeId, usize)> for Caret {
    fn from((node, offset): (NodeId, usize)) -> Self {
        Self::new(node, offset)
    }
}

impl fmt::Display for Caret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.node, self.offset)
    }
}
