//! Seams between the editing core and its collaborators.
//!
//! - [`TreeMutator`]: the mutation operations the range cut is written
//!   against, so an editor can substitute versions that notify listeners.
//! - [`Validator`]: the contract toward the (asynchronous, out-of-crate)
//!   schema validator.

use dom::{Caret, Document, DomError, NodeId};

/// Mutation operations used by [`generic_cut`](crate::generic_cut).
///
/// Every method must leave the tree normalised the way the `dom` primitives
/// do. The `Document` implementation forwards to those primitives.
pub trait TreeMutator {
    // =========================================================================
    // Read access
    // =========================================================================

    fn document(&self) -> &Document;

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Remove `count` characters at `offset` from a text node, detaching it
    /// when it becomes empty. Returns the removed characters.
    fn delete_text(&mut self, node: NodeId, offset: usize, count: usize) -> Result<String, DomError>;

    /// Detach `node` with its subtree.
    fn delete_node(&mut self, node: NodeId) -> Result<(), DomError>;

    /// Merge `second` into `first`; `second` must be the next sibling.
    fn merge_text_nodes(&mut self, first: NodeId, second: NodeId) -> Result<Caret, DomError>;

    /// Allocate a detached text node.
    fn create_text(&mut self, text: &str) -> NodeId;
}

impl TreeMutator for Document {
    fn document(&self) -> &Document {
        self
    }

    fn delete_text(&mut self, node: NodeId, offset: usize, count: usize) -> Result<String, DomError> {
        dom::delete_text(self, node, offset, count)
    }

    fn delete_node(&mut self, node: NodeId) -> Result<(), DomError> {
        dom::delete_node(self, node)
    }

    fn merge_text_nodes(&mut self, first: NodeId, second: NodeId) -> Result<Caret, DomError> {
        dom::merge_text_nodes(self, first, second)
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        Document::create_text(self, text)
    }
}

/// Receiver of validation restarts.
///
/// The validator processes the tree incrementally in the background; after a
/// structural edit the core tells it where its results became stale.
/// Throttling and scheduling are the validator's business.
pub trait Validator {
    /// Results for `node` and everything after it in document order are
    /// stale.
    fn restart_at(&mut self, node: NodeId);
}

/// Validator that ignores restarts, for sessions without a schema.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullValidator;

impl Validator for NullValidator {
    fn restart_at(&mut self, _node: NodeId) {}
}

/// Records every restart, oldest first. Useful to hosts that batch restarts
/// and to tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingValidator {
    pub restarts: Vec<NodeId>,
}

impl Validator for RecordingValidator {
    fn restart_at(&mut self, node: NodeId) {
        self.restarts.push(node);
    }
}

impl<V: Validator + ?Sized> Validator for &mut V {
    fn restart_at(&mut self, node: NodeId) {
        (**self).restart_at(node);
    }
}
