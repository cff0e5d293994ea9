//! Arena document tree for structured editing.
//!
//! Nodes live in a [`Document`] and are addressed by [`NodeId`]. Carets are
//! `(node, offset)` pairs. The text mutation primitives in [`text_ops`] keep
//! every parent they touch normalised: no empty text node and no two
//! adjacent text siblings.

mod caret;
pub mod correspond;
mod document;
mod error;
pub mod markup;
mod parse;
pub mod text;
pub mod text_ops;
pub mod traverse;
mod types;

pub use caret::Caret;
pub use correspond::{MirrorMap, TreeRef, corresponding_node, link_trees};
pub use document::{Ancestors, Document};
pub use error::DomError;
pub use markup::{inner_markup, outer_markup, text_content};
pub use parse::parse_xml;
pub use text_ops::{
    delete_node, delete_text, insert_into_text, insert_text, is_normalized, merge_text_nodes,
    normalize, split_text_node,
};
pub use traverse::{descendants, first_descendant_or_self, node_at_path, path_to_node};
pub use types::{Content, NodeId, NodeKind};
