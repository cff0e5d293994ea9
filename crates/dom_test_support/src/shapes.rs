//! Random tree generation for property tests.

use dom::{Document, NodeId};
use proptest::prelude::*;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub enum Shape {
    Text(String),
    Element {
        name: &'static str,
        white_space: Option<&'static str>,
        children: Vec<Shape>,
    },
}

impl Shape {
    /// Same tree with every whitespace character removed from its text.
    pub fn without_whitespace(&self) -> Shape {
        match self {
            Shape::Text(text) => Shape::Text(text.chars().filter(|c| !c.is_ascii_whitespace()).collect()),
            Shape::Element {
                name,
                white_space,
                children,
            } => Shape::Element {
                name,
                white_space: *white_space,
                children: children.iter().map(Shape::without_whitespace).collect(),
            },
        }
    }
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', 'é', ' ', ' ', '\n', '\t']), 0..8)
        .prop_map(|chars| chars.into_iter().collect())
}

fn white_space_strategy() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![
        6 => Just(None),
        1 => Just(Some("pre")),
        1 => Just(Some("pre-line")),
        1 => Just(Some("nowrap")),
    ]
}

/// Trees up to four levels deep with a handful of children per element.
pub fn arb_shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        3 => text_strategy().prop_map(Shape::Text),
        1 => prop::sample::select(vec!["b", "i"]).prop_map(|name| Shape::Element {
            name,
            white_space: None,
            children: Vec::new(),
        }),
    ];
    leaf.prop_recursive(4, 48, 5, |inner| {
        (
            prop::sample::select(vec!["p", "span", "b", "s"]),
            white_space_strategy(),
            prop::collection::vec(inner, 0..5),
        )
            .prop_map(|(name, white_space, children)| Shape::Element {
                name,
                white_space,
                children,
            })
    })
}

/// Root element wrapping generated content.
pub fn arb_root() -> impl Strategy<Value = Shape> {
    prop::collection::vec(arb_shape(), 0..5).prop_map(|children| Shape::Element {
        name: "doc",
        white_space: None,
        children,
    })
}

/// Materialise a shape and normalise the result.
pub fn build(doc: &mut Document, shape: &Shape) -> NodeId {
    let root = build_raw(doc, shape);
    if doc.is_element(root) {
        dom::normalize(doc, root).unwrap_or_else(|err| panic!("normalising generated tree: {err}"));
    }
    root
}

fn build_raw(doc: &mut Document, shape: &Shape) -> NodeId {
    match shape {
        Shape::Text(text) => doc.create_text(text.as_str()),
        Shape::Element {
            name,
            white_space,
            children,
        } => {
            let attributes = white_space
                .map(|value| vec![(Arc::<str>::from("style"), Some(format!("white-space: {value}")))])
                .unwrap_or_default();
            let id = doc.create_element_with_attributes(name, attributes);
            for child in children {
                let child = build_raw(doc, child);
                doc.append_child(id, child)
                    .unwrap_or_else(|err| panic!("attaching generated node: {err}"));
            }
            id
        }
    }
}
