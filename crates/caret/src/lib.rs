//! # caret
//!
//! Caret motion and range editing over a [`dom::Document`].
//!
//! - [`next_caret_position`] / [`prev_caret_position`]: the stepper, a pure
//!   function of position, bound and granularity. It honours CSS
//!   `white-space` through [`css::is_collapsible`].
//! - [`cut`] / [`generic_cut`]: remove a range and report what was removed.
//! - [`EditSession`]: owns a tree and a caret, routes edits through the
//!   `dom` primitives and restarts the [`Validator`] after each one.
//!
//! ```
//! use caret::next_caret_position;
//! use dom::{Caret, Document, parse_xml};
//!
//! let mut doc = Document::new();
//! let span = parse_xml(&mut doc, "<span>test</span>").unwrap();
//! let text = doc.child(span, 0).unwrap();
//!
//! let here = Caret::new(text, 2);
//! assert_eq!(next_caret_position(&doc, here, span, false), Some(Caret::new(text, 3)));
//! assert_eq!(next_caret_position(&doc, here, span, true), Some(Caret::new(span, 1)));
//! ```

mod cut;
mod session;
mod step;
mod traits;

pub use cut::{cut, generic_cut};
pub use session::{EditSession, GuiTree, SessionConfig};
pub use step::{next_caret_position, prev_caret_position};
pub use traits::{NullValidator, RecordingValidator, TreeMutator, Validator};
