use caret::{EditSession, RecordingValidator, SessionConfig, cut, next_caret_position, prev_caret_position};
use dom::{Caret, Document, outer_markup, parse_xml};
use dom_test_support::{Fixture, assert_markup_eq};

#[test]
fn stepping_inside_text_with_and_without_text_positions() {
    let fx = Fixture::parse("<span>test</span>");
    let text = fx.at(&[0]);
    let at = Caret::new(text, 2);
    assert_eq!(next_caret_position(&fx.doc, at, fx.root, true), Some(Caret::new(fx.root, 1)));
    assert_eq!(next_caret_position(&fx.doc, at, fx.root, false), Some(Caret::new(text, 3)));
}

#[test]
fn cut_whole_paragraph_content() {
    let mut fx = Fixture::parse("<p>one <b>two</b> three <i>four</i> five</p>");
    let p = fx.root;
    let children = fx.doc.children(p).to_vec();
    assert_eq!(children.len(), 5);

    let (caret, removed) = cut(&mut fx.doc, Caret::new(p, 0), Caret::new(p, 5)).unwrap();
    assert_eq!(caret, Caret::new(p, 0));
    assert_eq!(removed, children);
    assert_eq!(fx.doc.child_count(p), 0);
    let rendered: Vec<String> = removed.iter().map(|id| outer_markup(&fx.doc, *id)).collect();
    assert_eq!(rendered, vec!["one ", "<b>two</b>", " three ", "<i>four</i>", " five"]);
}

#[test]
fn stepper_ignores_positions_outside_the_bound() {
    let mut doc = Document::new();
    let a = parse_xml(&mut doc, "<a>x</a>").unwrap();
    let b = parse_xml(&mut doc, "<b>y</b>").unwrap();
    let inside_b = Caret::new(b, 0);
    assert_eq!(next_caret_position(&doc, inside_b, a, false), None);
    assert_eq!(prev_caret_position(&doc, inside_b, a, true), None);
}

#[test]
fn typing_and_deleting_through_a_session() {
    let fx = Fixture::parse("<doc><p>ab</p></doc>");
    let text = fx.at(&[0, 0]);
    let root = fx.root;
    let mut session = EditSession::new(fx.doc, root, RecordingValidator::default(), SessionConfig::default()).unwrap();
    session.set_caret(Caret::new(text, 1)).unwrap();

    session.insert_text("xyz").unwrap();
    assert_markup_eq("<doc><p>axyzb</p></doc>", &outer_markup(session.doc(), root));

    session.delete_backward().unwrap();
    session.delete_forward().unwrap();
    assert_markup_eq("<doc><p>axy</p></doc>", &outer_markup(session.doc(), root));
    assert!(!session.validator().restarts.is_empty());
}
