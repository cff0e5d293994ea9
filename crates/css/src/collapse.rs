//! Whitespace that renders as nothing at the edge of a text node.

use crate::computed::computed_white_space;
use crate::values::WhiteSpace;
use dom::text::{char_len, split_at_char};
use dom::{Document, NodeId};

/// Which end of a text node a whitespace run touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    /// The run `[0, position)`; the node must have no previous sibling.
    Start,
    /// The run `[position, len)`; the node must have no next sibling.
    End,
}

/// Space, tab, line feed, form feed and carriage return. NBSP is content.
pub fn is_css_whitespace(ch: char) -> bool {
    ch.is_ascii_whitespace()
}

/// `true` if the run between `position` and `edge` of `text_node` is
/// non-empty whitespace that collapses away under the node's effective
/// `white-space`, with no sibling beyond that edge.
///
/// Never fails: unknown nodes, elements and out-of-range positions give
/// `false`.
pub fn is_collapsible(doc: &Document, text_node: NodeId, position: usize, edge: Edge) -> bool {
    let Some(text) = doc.text(text_node) else {
        return false;
    };
    if position > char_len(text) {
        return false;
    }
    let (head, tail) = split_at_char(text, position);
    let (run, beyond) = match edge {
        Edge::Start => (head, doc.prev_sibling(text_node)),
        Edge::End => (tail, doc.next_sibling(text_node)),
    };
    if run.is_empty() || beyond.is_some() || !run.chars().all(is_css_whitespace) {
        return false;
    }
    run_collapses(computed_white_space(doc, text_node), run)
}

fn run_collapses(mode: WhiteSpace, run: &str) -> bool {
    if !mode.collapses_spaces() {
        return false;
    }
    !(mode.preserves_newlines() && run.contains('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_test_support::Fixture;

    #[test]
    fn trailing_run_at_end_of_parent() {
        let fx = Fixture::parse("<span><s>test    </s><s>test  </s></span>");
        let t = fx.at(&[0, 0]);
        assert!(is_collapsible(&fx.doc, t, 4, Edge::End));
        assert!(is_collapsible(&fx.doc, t, 6, Edge::End));
        assert!(!is_collapsible(&fx.doc, t, 3, Edge::End));
        assert!(!is_collapsible(&fx.doc, t, 8, Edge::End));
    }

    #[test]
    fn sibling_beyond_edge_blocks_collapse() {
        let fx = Fixture::parse("<span>test <s>test</s></span>");
        assert!(!is_collapsible(&fx.doc, fx.at(&[0]), 4, Edge::End));
        let fx = Fixture::parse("<span><s>test</s>   test</span>");
        assert!(!is_collapsible(&fx.doc, fx.at(&[1]), 3, Edge::Start));
    }

    #[test]
    fn leading_run_at_start_of_parent() {
        let fx = Fixture::parse("<span><s>test</s><s>   test</s></span>");
        let t = fx.at(&[1, 0]);
        assert!(is_collapsible(&fx.doc, t, 3, Edge::Start));
        assert!(is_collapsible(&fx.doc, t, 1, Edge::Start));
        assert!(!is_collapsible(&fx.doc, t, 0, Edge::Start));
        assert!(!is_collapsible(&fx.doc, t, 4, Edge::Start));
    }

    #[test]
    fn preserving_modes_never_collapse() {
        for mode in ["pre", "pre-wrap", "break-spaces"] {
            let fx = Fixture::parse(&format!(r#"<span><s style="white-space: {mode}">test  </s></span>"#));
            assert!(!is_collapsible(&fx.doc, fx.at(&[0, 0]), 4, Edge::End), "{mode}");
        }
        let fx = Fixture::parse(r#"<span><s style="white-space: nowrap">test  </s></span>"#);
        assert!(is_collapsible(&fx.doc, fx.at(&[0, 0]), 4, Edge::End));
    }

    #[test]
    fn pre_line_keeps_newline_runs() {
        let fx = Fixture::parse("<span style=\"white-space: pre-line\"><s>a \t</s><s>b \n</s></span>");
        assert!(is_collapsible(&fx.doc, fx.at(&[0, 0]), 1, Edge::End));
        assert!(!is_collapsible(&fx.doc, fx.at(&[1, 0]), 1, Edge::End));
    }

    #[test]
    fn nbsp_is_content() {
        let fx = Fixture::parse("<span><s>a\u{a0}</s></span>");
        assert!(!is_collapsible(&fx.doc, fx.at(&[0, 0]), 1, Edge::End));
    }

    #[test]
    fn non_text_gives_false() {
        let fx = Fixture::parse("<span> </span>");
        assert!(!is_collapsible(&fx.doc, fx.root, 0, Edge::End));
        assert!(!is_collapsible(&fx.doc, NodeId(77), 0, Edge::End));
    }
}
