use crate::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node {0} does not exist")]
    MissingNode(NodeId),
    #[error("{op} called on non-text node {node}")]
    NotText { op: &'static str, node: NodeId },
    #[error("{op} called on non-element node {node}")]
    NotElement { op: &'static str, node: NodeId },
    #[error("{op} needs node {node} to have a parent")]
    Detached { op: &'static str, node: NodeId },
    #[error("must pass an actual node to insert")]
    MissingContent,
    #[error("cannot insert {child} under {parent}: it would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
    #[error("offset {offset} is out of range for node {node} (length {len})")]
    OffsetOutOfRange {
        node: NodeId,
        offset: usize,
        len: usize,
    },
    #[error("text nodes {first} and {second} are not adjacent siblings")]
    NotAdjacent { first: NodeId, second: NodeId },
    #[error("node {node} is not the tree {root} or a child of the tree {root}")]
    NotInTree { node: NodeId, root: NodeId },
    #[error("trees diverge in shape at path {path:?}")]
    ShapeMismatch { path: Vec<usize> },
    #[error("range ({start_node}, {start_offset})..({end_node}, {end_offset}) is not well formed")]
    MalformedRange {
        start_node: NodeId,
        start_offset: usize,
        end_node: NodeId,
        end_offset: usize,
    },
    #[error("XML parse error: {0}")]
    Parse(String),
}
