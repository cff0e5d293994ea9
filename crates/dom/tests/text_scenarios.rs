use dom::{DomError, NodeId, delete_text, insert_into_text, split_text_node};
use dom_test_support::{Fixture, assert_markup_eq};

fn abcd() -> (Fixture, NodeId) {
    let fx = Fixture::parse("<p>abcd</p>");
    let text = fx.at(&[0]);
    (fx, text)
}

#[test]
fn split_in_the_middle_keeps_both_halves() {
    let (mut fx, text) = abcd();
    let (before, after) = split_text_node(&mut fx.doc, text, 2).unwrap();
    assert_eq!(fx.doc.text(before), Some("ab"));
    assert_eq!(fx.doc.text(after), Some("cd"));
    assert_eq!(fx.doc.children(fx.root), &[before, after]);
}

#[test]
fn split_before_start_keeps_empty_half_attached() {
    let (mut fx, text) = abcd();
    let (before, after) = split_text_node(&mut fx.doc, text, -1).unwrap();
    assert_eq!(fx.doc.text(before), Some(""));
    assert_eq!(fx.doc.text(after), Some("abcd"));
    assert_eq!(fx.doc.child_count(fx.root), 2);
    assert_eq!(fx.doc.parent(before), Some(fx.root));
}

#[test]
fn fragment_insert_coalesces_edges() {
    let (mut fx, text) = abcd();
    let first = fx.doc.create_text("first");
    let span = fx.doc.create_element("span");
    let blah = fx.doc.create_text("blah");
    fx.doc.append_child(span, blah).unwrap();
    let last = fx.doc.create_text("last");

    let (start, end) = insert_into_text(&mut fx.doc, text, 2, vec![first, span, last]).unwrap();
    assert_eq!(fx.doc.text(start.node), Some("abfirst"));
    assert_eq!(fx.doc.text(end.node), Some("lastcd"));
    assert_eq!(fx.doc.child_count(fx.root), 3);
    assert_eq!(fx.doc.child(fx.root, 1), Some(span));
    assert_markup_eq("<p>abfirst<span>blah</span>lastcd</p>", &fx.markup());
}

#[test]
fn deleting_everything_detaches_the_node() {
    let (mut fx, text) = abcd();
    assert_eq!(delete_text(&mut fx.doc, text, 0, 4).unwrap(), "abcd");
    assert_eq!(fx.doc.text(text), Some(""));
    assert_eq!(fx.doc.parent(text), None);
    assert_markup_eq("<p/>", &fx.markup());
}

#[test]
fn primitives_reject_elements() {
    let (mut fx, _) = abcd();
    let root = fx.root;
    let err = delete_text(&mut fx.doc, root, 0, 1).unwrap_err();
    assert_eq!(
        err,
        DomError::NotText {
            op: "delete_text",
            node: root
        }
    );
    assert_eq!(err.to_string(), format!("delete_text called on non-text node {root}"));
}
