use crate::cascade::get_inline_style;
use crate::syntax::parse_declarations;
use crate::values::{WhiteSpace, parse_white_space};
use dom::{Document, NodeId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    /// Inherited. Initial: normal.
    pub white_space: WhiteSpace,
}

impl ComputedStyle {
    pub fn initial() -> Self {
        Self::default()
    }
}

/// Compute the final, inherited style for an element, given:
/// - its specified declarations (cascaded or inline)
/// - an optional parent computed style.
///
/// Property names are expected lowercase (from `parse_declarations`).
pub fn compute_style(specified: &[(String, String)], parent: Option<&ComputedStyle>) -> ComputedStyle {
    // 1. Start from initial values, then inherit.
    let mut result = parent.copied().unwrap_or_else(ComputedStyle::initial);

    // 2. Apply specified declarations; the last valid one wins.
    for (name, value) in specified {
        if name == "white-space" {
            if let Some(ws) = parse_white_space(value) {
                result.white_space = ws;
            }
        }
        // unsupported property → ignored
    }

    result
}

/// Declarations that apply to `element`.
///
/// Cascaded style (from `attach_styles`) is used when present; otherwise the
/// inline `style` attribute is read directly so trees that never went
/// through the cascade still honour inline `white-space`.
fn specified_for(doc: &Document, element: NodeId) -> Vec<(String, String)> {
    let cascaded = doc.style(element);
    if !cascaded.is_empty() {
        return cascaded.to_vec();
    }
    get_inline_style(doc, element)
        .map(|inline| {
            parse_declarations(inline)
                .into_iter()
                .map(|d| (d.name, d.value))
                .collect()
        })
        .unwrap_or_default()
}

/// Effective `white-space` for `node`; a text node uses its parent's value.
///
/// Falls back to `normal` when no ancestor declares the property or the node
/// is unknown.
pub fn computed_white_space(doc: &Document, node: NodeId) -> WhiteSpace {
    let element = if doc.is_text(node) { doc.parent(node) } else { Some(node) };
    let Some(element) = element.filter(|id| doc.is_element(*id)) else {
        return WhiteSpace::Normal;
    };
    let mut chain: Vec<NodeId> = doc.ancestors(element).collect();
    chain.reverse();
    chain.push(element);
    chain
        .into_iter()
        .fold(ComputedStyle::initial(), |parent, id| {
            compute_style(&specified_for(doc, id), Some(&parent))
        })
        .white_space
}
