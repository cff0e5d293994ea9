use crate::syntax::{Selector, Stylesheet, parse_declarations};
use dom::{Document, DomError, NodeId, descendants};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
struct Specificity(u16, u16, u16); // (id, class, type)

struct Candidate {
    property: String,
    value: String,
    important: bool,
    specificity: Specificity,
    order: u32,
}

impl Candidate {
    /// Cascade rank: importance, then specificity, then source order.
    fn rank(&self) -> (bool, Specificity, u32) {
        (self.important, self.specificity, self.order)
    }
}

fn specificity_of(selector: &Selector) -> Specificity {
    match selector {
        Selector::Universal => Specificity(0, 0, 0),
        Selector::Type(_) => Specificity(0, 0, 1),
        Selector::Class(_) => Specificity(0, 1, 0),
        Selector::Id(_) => Specificity(1, 0, 0),
    }
}

fn get_attribute<'a>(attributes: &'a [(Arc<str>, Option<String>)], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .and_then(|(_, v)| v.as_deref())
}

// Check if an element matches a selector
fn matches_selector(name: &str, attributes: &[(Arc<str>, Option<String>)], selector: &Selector) -> bool {
    match selector {
        Selector::Universal => true,
        Selector::Type(t) => name == t,
        Selector::Id(want) => get_attribute(attributes, "id").is_some_and(|v| v == want),
        Selector::Class(want) => get_attribute(attributes, "class")
            .is_some_and(|classlist| classlist.split_whitespace().any(|c| c == want)),
    }
}

/// Value of the inline `style` attribute of `node`, if any.
pub fn get_inline_style(doc: &Document, node: NodeId) -> Option<&str> {
    get_attribute(doc.attributes(node), "style")
}

fn cascade_one(doc: &Document, node: NodeId, sheet: &Stylesheet) -> Vec<(String, String)> {
    let name = doc.name(node).unwrap_or_default();
    let attributes = doc.attributes(node);

    // collect candidates (inline + matched rules)
    let mut candidates: Vec<Candidate> = Vec::new();

    if let Some(inline) = get_inline_style(doc, node) {
        let inline_spec = Specificity(2, 0, 0);
        let inline_order = u32::MAX;
        candidates.extend(parse_declarations(inline).into_iter().map(|d| Candidate {
            property: d.name,
            value: d.value,
            important: d.important,
            specificity: inline_spec,
            order: inline_order,
        }));
    }

    for (order, rule) in sheet.rules.iter().enumerate() {
        let order = order as u32;
        let matched_specificity = rule
            .selectors
            .iter()
            .filter(|selector| matches_selector(name, attributes, selector))
            .map(specificity_of)
            .max();
        if let Some(specificity) = matched_specificity {
            candidates.extend(rule.declarations.iter().map(|declaration| Candidate {
                property: declaration.name.clone(),
                value: declaration.value.clone(),
                important: declaration.important,
                specificity,
                order,
            }));
        }
    }

    let mut winners: BTreeMap<String, Candidate> = BTreeMap::new();
    for candidate in candidates {
        match winners.entry(candidate.property.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                if candidate.rank() >= slot.get().rank() {
                    slot.insert(candidate);
                }
            }
        }
    }
    winners
        .into_values()
        .map(|winner| (winner.property, winner.value))
        .collect()
}

/// Walk the subtree at `root` and store the cascaded declarations of every
/// element (matched rules plus inline style, inline winning).
pub fn attach_styles(doc: &mut Document, root: NodeId, sheet: &Stylesheet) -> Result<(), DomError> {
    if !doc.contains(root) {
        return Err(DomError::MissingNode(root));
    }
    let elements: Vec<NodeId> = descendants(doc, root)
        .filter(|id| doc.is_element(*id))
        .collect();
    for &node in &elements {
        let style = cascade_one(doc, node, sheet);
        doc.set_style(node, style)?;
    }
    log::debug!(
        target: "css.cascade",
        "attached styles to {} element(s) under {root} from {} rule(s)",
        elements.len(),
        sheet.rules.len()
    );
    Ok(())
}
