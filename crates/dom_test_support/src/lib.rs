use dom::{Caret, Document, NodeId};
use std::fmt::Write;

pub mod cases;
pub mod shapes;

/// A parsed markup fixture: one document holding one tree.
pub struct Fixture {
    pub doc: Document,
    pub root: NodeId,
}

impl Fixture {
    pub fn parse(markup: &str) -> Self {
        let mut doc = Document::new();
        let root = dom::parse_xml(&mut doc, markup)
            .unwrap_or_else(|err| panic!("fixture markup {markup:?} failed to parse: {err}"));
        Self { doc, root }
    }

    /// Node at a child-index path from the root; panics when absent.
    pub fn at(&self, path: &[usize]) -> NodeId {
        dom::node_at_path(&self.doc, self.root, path)
            .unwrap_or_else(|| panic!("fixture has no node at path {path:?}"))
    }

    pub fn caret(&self, path: &[usize], offset: usize) -> Caret {
        Caret::new(self.at(path), offset)
    }

    /// Path of a caret's node, for readable assertion messages.
    pub fn describe(&self, caret: Option<Caret>) -> String {
        match caret {
            None => "None".to_string(),
            Some(caret) => match dom::path_to_node(&self.doc, self.root, caret.node) {
                Ok(path) => format!("{path:?}@{}", caret.offset),
                Err(_) => format!("{caret} (outside fixture)"),
            },
        }
    }

    pub fn markup(&self) -> String {
        dom::outer_markup(&self.doc, self.root)
    }

    /// Indented outline of the fixture tree for failure messages.
    pub fn outline(&self) -> String {
        dom::markup::outline(&self.doc, self.root, 64).join("\n")
    }
}

/// Text with control characters, quotes and backslashes escaped, so
/// whitespace differences show up in assertion output.
pub fn escape_text(text: &str) -> String {
    text.escape_debug().to_string()
}

/// Split markup at tag boundaries so mismatches diff line by line.
pub fn markup_lines(markup: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for ch in markup.chars() {
        if ch == '<' && !current.is_empty() {
            lines.push(escape_text(&std::mem::take(&mut current)));
        }
        current.push(ch);
        if ch == '>' {
            lines.push(escape_text(&std::mem::take(&mut current)));
        }
    }
    if !current.is_empty() {
        lines.push(escape_text(&current));
    }
    lines
}

#[track_caller]
pub fn assert_markup_eq(expected: &str, actual: &str) {
    if expected != actual {
        let diff = diff_lines(&markup_lines(expected), &markup_lines(actual));
        panic!("markup mismatch\nexpected: {expected}\nactual:   {actual}\n{diff}");
    }
}

/// Report of the first differing line with up to two lines of context on
/// each side, `-` for expected and `+` for actual.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    const MISSING: &str = "<missing>";
    let line = |lines: &[String], i: usize| lines.get(i).map_or(MISSING, String::as_str).to_owned();
    let total = expected.len().max(actual.len());
    let mut out = String::new();

    if let Some(first) = (0..total).find(|&i| line(expected, i) != line(actual, i)) {
        let context = first.saturating_sub(2)..(first + 3).min(total);
        writeln!(out, "first mismatch at line {}:", first + 1).ok();
        for i in context {
            let (want, got) = (line(expected, i), line(actual, i));
            if want == got {
                writeln!(out, "  {:>4} {want}", i + 1).ok();
            } else {
                writeln!(out, "- {:>4} {want}", i + 1).ok();
                writeln!(out, "+ {:>4} {got}", i + 1).ok();
            }
        }
    }
    writeln!(out, "expected {} line(s), actual {} line(s)", expected.len(), actual.len()).ok();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_lines_split_at_tags() {
        assert_eq!(
            markup_lines("<p>a\nb<i/></p>"),
            vec!["<p>", "a\\nb", "<i/>", "</p>"]
        );
    }

    #[test]
    fn diff_points_at_first_mismatch() {
        let expected = markup_lines("<p>ab</p>");
        let actual = markup_lines("<p>ac</p>");
        let diff = diff_lines(&expected, &actual);
        assert!(diff.starts_with("first mismatch at line 2"));
        assert!(diff.contains("-    2 ab\n+    2 ac\n"));
    }

    #[test]
    fn fixture_paths() {
        let fx = Fixture::parse("<span>test <b>test</b></span>");
        let b = fx.at(&[1]);
        assert_eq!(fx.doc.name(b), Some("b"));
        assert_eq!(fx.describe(Some(fx.caret(&[1, 0], 2))), "[1, 0]@2");
        assert_eq!(fx.describe(None), "None");
    }
}
