#![no_main]

use dom::{Caret, Document, descendants, is_normalized, parse_xml, text_content};
use libfuzzer_sys::fuzz_target;

// First line is markup; every following byte pair is (position, op).
fuzz_target!(|data: &[u8]| {
    let split = data.iter().position(|b| *b == b'\n').unwrap_or(data.len());
    let Ok(source) = std::str::from_utf8(&data[..split]) else {
        return;
    };
    let mut doc = Document::new();
    let Ok(root) = parse_xml(&mut doc, source) else {
        return;
    };
    dom::normalize(&mut doc, root).expect("normalize parsed tree");

    for op in data.get(split + 1..).unwrap_or_default().chunks(2) {
        let positions: Vec<Caret> = descendants(&doc, root)
            .flat_map(|id| {
                let len = doc.caret_len(id).unwrap_or(0);
                (0..=len).map(move |offset| Caret::new(id, offset))
            })
            .collect();
        let at = positions[usize::from(op[0]) % positions.len()];
        let before = text_content(&doc, root);
        match op.get(1).copied().unwrap_or(0) % 3 {
            0 => {
                dom::insert_text(&mut doc, at.node, at.offset, "x").expect("insert_text");
                assert_eq!(text_content(&doc, root).chars().count(), before.chars().count() + 1);
            }
            1 if doc.is_text(at.node) && at.offset < doc.text_len(at.node).unwrap_or(0) => {
                dom::delete_text(&mut doc, at.node, at.offset, 1).expect("delete_text");
            }
            2 if doc.is_text(at.node) => {
                let _ = caret::cut(&mut doc, Caret::new(at.node, 0), at);
            }
            _ => {}
        }
        assert!(is_normalized(&doc, root));
    }
});
