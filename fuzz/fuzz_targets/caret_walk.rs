#![no_main]

use caret::{next_caret_position, prev_caret_position};
use dom::{Caret, Document, descendants, parse_xml};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let mut doc = Document::new();
    let Ok(root) = parse_xml(&mut doc, source) else {
        return;
    };
    let positions: usize = descendants(&doc, root)
        .map(|id| doc.caret_len(id).unwrap_or(0) + 1)
        .sum();

    for no_text in [false, true] {
        let mut steps = 0;
        let mut here = Caret::new(root, 0);
        while let Some(next) = next_caret_position(&doc, here, root, no_text) {
            assert!(next.is_valid(&doc));
            assert!(doc.is_inclusive_ancestor(root, next.node));
            here = next;
            steps += 1;
            assert!(steps <= positions, "forward walk did not terminate");
        }
        steps = 0;
        here = Caret::new(root, doc.child_count(root));
        while let Some(prev) = prev_caret_position(&doc, here, root, no_text) {
            assert!(prev.is_valid(&doc));
            here = prev;
            steps += 1;
            assert!(steps <= positions, "backward walk did not terminate");
        }
    }
});
