use std::fmt;
use std::sync::Arc;

/// Index of a node inside a [`Document`](crate::Document) arena.
///
/// Ids are never reused: a detached node keeps its id and its contents, so
/// callers holding on to removed nodes can still read them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Element {
        name: Arc<str>,
        attributes: Vec<(Arc<str>, Option<String>)>,
        /// Cascaded declarations, filled by the style layer.
        style: Vec<(String, String)>,
    },
    Text {
        text: String,
    },
}

impl NodeKind {
    pub fn element(name: &str) -> Self {
        NodeKind::Element {
            name: Arc::from(name),
            attributes: Vec::new(),
            style: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        NodeKind::Text { text: text.into() }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, NodeKind::Text { .. })
    }

    pub fn is_element(&self) -> bool {
        matches!(self, NodeKind::Element { .. })
    }
}

/// Content handed to [`insert_into_text`](crate::insert_into_text).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    Node(NodeId),
    /// Ordered sequence of nodes inserted as a unit.
    Fragment(Vec<NodeId>),
}

impl Content {
    pub fn nodes(&self) -> &[NodeId] {
        match self {
            Content::Node(id) => std::slice::from_ref(id),
            Content::Fragment(ids) => ids,
        }
    }
}

impl From<NodeId> for Content {
    fn from(id: NodeId) -> Self {
        Content::Node(id)
    }
}

impl From<Vec<NodeId>> for Content {
    fn from(ids: Vec<NodeId>) -> Self {
        Content::Fragment(ids)
    }
}
