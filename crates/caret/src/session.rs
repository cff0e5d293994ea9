//! Editing session: one data tree, one caret, one validator.
//!
//! Every edit goes through the `dom` primitives so the tree stays
//! normalised, and every edit tells the validator where its results went
//! stale. The session can also render a GUI copy of the data tree and keep
//! the element mirror links between the two.

use crate::cut::generic_cut;
use crate::step::{next_caret_position, prev_caret_position};
use crate::traits::{NullValidator, TreeMutator, Validator};
use dom::text::char_len;
use dom::{Caret, Content, Document, DomError, MirrorMap, NodeId, TreeRef};

/// Session behaviour switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Move the caret at element granularity (never into text nodes).
    pub no_text: bool,
    /// Restart the validator after edits that only change text content.
    /// Structural edits always restart it.
    pub restart_on_text_edit: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            no_text: false,
            restart_on_text_edit: true,
        }
    }
}

/// GUI copy of the data tree plus the element links between them.
#[derive(Clone, Debug)]
pub struct GuiTree {
    pub doc: Document,
    pub root: NodeId,
    /// Tree A is the data tree, tree B the GUI tree.
    pub mirror: MirrorMap,
}

#[derive(Debug)]
pub struct EditSession<V = NullValidator> {
    doc: Document,
    root: NodeId,
    caret: Caret,
    config: SessionConfig,
    validator: V,
    gui: Option<GuiTree>,
}

impl EditSession<NullValidator> {
    pub fn without_validator(doc: Document, root: NodeId) -> Result<Self, DomError> {
        Self::new(doc, root, NullValidator, SessionConfig::default())
    }
}

impl<V: Validator> EditSession<V> {
    /// Start a session on the tree at `root`, with the caret at its start.
    pub fn new(doc: Document, root: NodeId, validator: V, config: SessionConfig) -> Result<Self, DomError> {
        if !doc.contains(root) {
            return Err(DomError::MissingNode(root));
        }
        if !doc.is_element(root) {
            return Err(DomError::NotElement {
                op: "EditSession::new",
                node: root,
            });
        }
        log::debug!(target: "caret.session", "session on {root} with {config:?}");
        Ok(Self {
            doc,
            root,
            caret: Caret::new(root, 0),
            config,
            validator,
            gui: None,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn caret(&self) -> Caret {
        self.caret
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    pub fn validator_mut(&mut self) -> &mut V {
        &mut self.validator
    }

    pub fn into_parts(self) -> (Document, NodeId, V) {
        (self.doc, self.root, self.validator)
    }

    /// `true` if `caret` names a position the validator can be asked about:
    /// an existing node inside the edited tree with an in-range offset.
    pub fn is_queryable(&self, caret: Caret) -> bool {
        caret.is_valid(&self.doc) && self.doc.is_inclusive_ancestor(self.root, caret.node)
    }

    // =========================================================================
    // Caret movement
    // =========================================================================

    pub fn set_caret(&mut self, caret: Caret) -> Result<(), DomError> {
        let len = self.doc.caret_len(caret.node).ok_or(DomError::MissingNode(caret.node))?;
        if caret.offset > len {
            return Err(DomError::OffsetOutOfRange {
                node: caret.node,
                offset: caret.offset,
                len,
            });
        }
        if !self.doc.is_inclusive_ancestor(self.root, caret.node) {
            return Err(DomError::NotInTree {
                node: caret.node,
                root: self.root,
            });
        }
        self.caret = caret;
        Ok(())
    }

    /// Step the caret forward; returns the new caret, or `None` (caret
    /// unchanged) at the end of the tree.
    pub fn move_next(&mut self) -> Option<Caret> {
        let next = next_caret_position(&self.doc, self.caret, self.root, self.config.no_text)?;
        self.caret = next;
        Some(next)
    }

    pub fn move_prev(&mut self) -> Option<Caret> {
        let prev = prev_caret_position(&self.doc, self.caret, self.root, self.config.no_text)?;
        self.caret = prev;
        Some(prev)
    }

    // =========================================================================
    // Edits
    // =========================================================================

    /// Type `text` at the caret and leave the caret after it.
    pub fn insert_text(&mut self, text: &str) -> Result<(), DomError> {
        if text.is_empty() {
            return Ok(());
        }
        let Caret { node, offset } = self.caret;
        let inserted = char_len(text);
        let prev_text = offset
            .checked_sub(1)
            .and_then(|i| self.doc.child(node, i))
            .filter(|id| self.doc.is_text(*id));
        let prev_len = prev_text.and_then(|id| self.doc.text_len(id)).unwrap_or(0);

        let (start, end) = dom::insert_text(&mut self.doc, node, offset, text)?;
        let Some(end) = end else {
            return Ok(());
        };
        self.caret = if end == node {
            Caret::new(node, offset + inserted)
        } else if start.is_some() && start == prev_text {
            Caret::new(end, prev_len + inserted)
        } else {
            // Extended the next text node at its start, or created a new one.
            Caret::new(end, inserted)
        };
        let structural = start.is_none();
        self.restart_after_edit(self.container_element(end), structural);
        Ok(())
    }

    /// Insert a node or fragment at the caret and leave the caret after it.
    ///
    /// Text at the edges of the content is merged with text next to the
    /// caret.
    pub fn insert_content(&mut self, content: impl Into<Content>) -> Result<(), DomError> {
        let content = content.into();
        let Caret { node, offset } = self.caret;
        let (host, host_offset) = if self.doc.is_text(node) {
            (Some(node), offset as isize)
        } else {
            let prev = offset
                .checked_sub(1)
                .and_then(|i| self.doc.child(node, i))
                .filter(|id| self.doc.is_text(*id));
            let next = self.doc.child(node, offset).filter(|id| self.doc.is_text(*id));
            match (prev, next) {
                (Some(prev), _) => (Some(prev), self.doc.text_len(prev).unwrap_or(0) as isize),
                (None, Some(next)) => (Some(next), 0),
                (None, None) => (None, 0),
            }
        };

        let parent = match host {
            Some(host) => {
                let parent = self.doc.parent(host).ok_or(DomError::Detached {
                    op: "insert_content",
                    node: host,
                })?;
                let (_, after) = dom::insert_into_text(&mut self.doc, host, host_offset, content)?;
                self.caret = after;
                parent
            }
            None => {
                let items = content.nodes();
                if items.is_empty() {
                    return Err(DomError::MissingContent);
                }
                let before = self.doc.child_count(node);
                for (i, &item) in items.iter().enumerate() {
                    self.doc.insert_child(node, offset + i, item)?;
                }
                // neighbours are not text, so merging stays inside the run
                dom::normalize(&mut self.doc, node)?;
                let added = self.doc.child_count(node).saturating_sub(before);
                self.caret = Caret::new(node, offset + added);
                node
            }
        };
        self.restart_after_edit(parent, true);
        Ok(())
    }

    /// Delete the character before the caret. Returns `false` when there is
    /// no character directly before it.
    pub fn delete_backward(&mut self) -> Result<bool, DomError> {
        let Some((text, offset)) = self.text_before_caret() else {
            return Ok(false);
        };
        self.delete_char(text, offset - 1)?;
        Ok(true)
    }

    /// Delete the character after the caret. Returns `false` when there is
    /// no character directly after it.
    pub fn delete_forward(&mut self) -> Result<bool, DomError> {
        let Some((text, offset)) = self.text_after_caret() else {
            return Ok(false);
        };
        self.delete_char(text, offset)?;
        Ok(true)
    }

    /// Cut `start..end` and move the caret to where the content was.
    pub fn cut(&mut self, start: Caret, end: Caret) -> Result<Vec<NodeId>, DomError> {
        for caret in [start, end] {
            if !self.is_queryable(caret) {
                return Err(DomError::NotInTree {
                    node: caret.node,
                    root: self.root,
                });
            }
        }
        let (caret, removed) = generic_cut(self, start, end)?;
        self.caret = caret;
        Ok(removed)
    }

    // =========================================================================
    // GUI mirror
    // =========================================================================

    /// Build a fresh GUI copy of the data tree and link their elements.
    ///
    /// Any previous GUI tree and its links are dropped.
    pub fn render_gui(&mut self) -> Result<&GuiTree, DomError> {
        let mut gui_doc = Document::new();
        let gui_root = self.doc.clone_into(self.root, &mut gui_doc)?;
        let mirror = dom::link_trees(TreeRef::new(&self.doc, self.root), TreeRef::new(&gui_doc, gui_root))?;
        log::debug!(target: "caret.session", "rendered gui tree with {} linked element(s)", mirror.len());
        let gui = self.gui.insert(GuiTree {
            doc: gui_doc,
            root: gui_root,
            mirror,
        });
        Ok(&*gui)
    }

    pub fn gui(&self) -> Option<&GuiTree> {
        self.gui.as_ref()
    }

    /// GUI element linked to a data element.
    pub fn gui_mirror_of(&self, data: NodeId) -> Option<NodeId> {
        self.gui.as_ref()?.mirror.mirror_in_b(data)
    }

    /// Data element linked to a GUI element.
    pub fn data_mirror_of(&self, gui: NodeId) -> Option<NodeId> {
        self.gui.as_ref()?.mirror.mirror_in_a(gui)
    }

    /// GUI node at the same path as `data`, text nodes included.
    pub fn gui_node_for(&self, data: NodeId) -> Result<NodeId, DomError> {
        let gui = self.gui.as_ref().ok_or(DomError::MissingNode(data))?;
        dom::corresponding_node(TreeRef::new(&self.doc, self.root), TreeRef::new(&gui.doc, gui.root), data)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn container_element(&self, node: NodeId) -> NodeId {
        if self.doc.is_text(node) {
            self.doc.parent(node).unwrap_or(self.root)
        } else {
            node
        }
    }

    fn restart_after_edit(&mut self, node: NodeId, structural: bool) {
        if structural || self.config.restart_on_text_edit {
            log::trace!(target: "caret.session", "restart validation at {node}");
            self.validator.restart_at(node);
        }
    }

    fn text_before_caret(&self) -> Option<(NodeId, usize)> {
        let Caret { node, offset } = self.caret;
        if self.doc.is_text(node) {
            return (offset > 0).then_some((node, offset));
        }
        let prev = self.doc.child(node, offset.checked_sub(1)?)?;
        let len = self.doc.text_len(prev)?;
        (len > 0).then_some((prev, len))
    }

    fn text_after_caret(&self) -> Option<(NodeId, usize)> {
        let Caret { node, offset } = self.caret;
        if let Some(len) = self.doc.text_len(node) {
            return (offset < len).then_some((node, offset));
        }
        let next = self.doc.child(node, offset)?;
        (self.doc.text_len(next)? > 0).then_some((next, 0))
    }

    fn delete_char(&mut self, text: NodeId, offset: usize) -> Result<(), DomError> {
        let before = Caret::before(&self.doc, text);
        TreeMutator::delete_text(self, text, offset, 1)?;
        self.caret = if self.doc.parent(text).is_some() {
            Caret::new(text, offset)
        } else {
            before.ok_or(DomError::Detached {
                op: "delete_char",
                node: text,
            })?
        };
        Ok(())
    }
}

/// Session edits restart the validator at the parent of every change.
impl<V: Validator> TreeMutator for EditSession<V> {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn delete_text(&mut self, node: NodeId, offset: usize, count: usize) -> Result<String, DomError> {
        let parent = self.doc.parent(node);
        let removed = dom::delete_text(&mut self.doc, node, offset, count)?;
        let detached = self.doc.parent(node).is_none();
        if let Some(parent) = parent {
            self.restart_after_edit(parent, detached);
        }
        Ok(removed)
    }

    fn delete_node(&mut self, node: NodeId) -> Result<(), DomError> {
        let parent = self.doc.parent(node);
        dom::delete_node(&mut self.doc, node)?;
        if let Some(parent) = parent {
            self.restart_after_edit(parent, true);
        }
        Ok(())
    }

    fn merge_text_nodes(&mut self, first: NodeId, second: NodeId) -> Result<Caret, DomError> {
        let caret = dom::merge_text_nodes(&mut self.doc, first, second)?;
        let parent = self.container_element(first);
        self.restart_after_edit(parent, true);
        Ok(caret)
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        self.doc.create_text(text)
    }
}
