//! Editing core for a structured XML editor: the data tree, CSS
//! white-space handling and caret motion, re-exported from the member
//! crates.

pub use caret;
pub use css;
pub use dom;

pub use caret::{EditSession, SessionConfig, cut, next_caret_position, prev_caret_position};
pub use dom::{Caret, Document, DomError, NodeId};
