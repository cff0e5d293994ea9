//! Stylesheet and declaration-list parsing.
//!
//! Covers what editor stylesheets for XML vocabularies use: rules with
//! comma-separated simple selectors, `/* */` comments and `!important`.
//! At-rules are skipped with their block. Element names may carry a
//! namespace prefix written with a CSS escape (`tei\:p`).

use std::borrow::Cow;

/// One `name: value` pair, name lowercased.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
    pub important: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Universal,
    /// Element name, possibly prefixed (`tei:p`).
    Type(String),
    Id(String),
    Class(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

fn strip_comments(input: &str) -> Cow<'_, str> {
    if !input.contains("/*") {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find("/*") {
        out.push_str(&rest[..open]);
        out.push(' ');
        rest = match rest[open + 2..].find("*/") {
            Some(close) => &rest[open + 2 + close + 2..],
            // unterminated comment runs to the end
            None => "",
        };
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Split `input` into `(prelude, block)` pairs at top-level braces.
/// Nested blocks stay inside their parent's block text.
fn top_level_blocks(input: &str) -> Vec<(&str, &str)> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut prelude_start = 0;
    let mut block_start = 0;
    for (i, ch) in input.char_indices() {
        match ch {
            '{' => {
                if depth == 0 {
                    block_start = i + 1;
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    blocks.push((&input[prelude_start..block_start - 1], &input[block_start..i]));
                    prelude_start = i + 1;
                }
            }
            ';' if depth == 0 => {
                // statement at-rule such as `@import url(x);`
                prelude_start = i + 1;
            }
            _ => {}
        }
    }
    blocks
}

/// Parse a stylesheet. Rules without a usable selector or without
/// declarations are dropped.
pub fn parse_stylesheet(input: &str) -> Stylesheet {
    let source = strip_comments(input);
    let mut rules = Vec::new();
    for (prelude, block) in top_level_blocks(&source) {
        let prelude = prelude.trim();
        if prelude.starts_with('@') {
            log::debug!(target: "css.syntax", "skipping at-rule {prelude:?}");
            continue;
        }
        let selectors: Vec<Selector> = prelude.split(',').filter_map(parse_selector).collect();
        if selectors.is_empty() {
            log::debug!(target: "css.syntax", "dropping rule with no usable selector: {prelude:?}");
            continue;
        }
        let declarations = parse_declarations(block);
        if !declarations.is_empty() {
            rules.push(Rule {
                selectors,
                declarations,
            });
        }
    }
    Stylesheet { rules }
}

/// Parse a declaration list such as the value of a `style` attribute.
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    strip_comments(input)
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            let mut value = value.trim();
            if name.is_empty() || value.is_empty() {
                return None;
            }
            let important = match value.rsplit_once('!') {
                Some((head, flag)) if flag.trim().eq_ignore_ascii_case("important") => {
                    value = head.trim_end();
                    true
                }
                _ => false,
            };
            Some(Declaration {
                name,
                value: value.to_string(),
                important,
            })
        })
        .collect()
}

fn is_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_'
}

/// Identifier with CSS backslash escapes resolved; `None` if anything else
/// is in the way.
fn parse_ident(s: &str) -> Option<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push(chars.next()?),
            ch if is_name_char(ch) => out.push(ch),
            _ => return None,
        }
    }
    (!out.is_empty()).then_some(out)
}

fn parse_selector(s: &str) -> Option<Selector> {
    let s = s.trim();
    if s == "*" {
        return Some(Selector::Universal);
    }
    if let Some(id) = s.strip_prefix('#') {
        return parse_ident(id).map(Selector::Id);
    }
    if let Some(class) = s.strip_prefix('.') {
        return parse_ident(class).map(Selector::Class);
    }
    parse_ident(s).map(Selector::Type)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(name: &str, value: &str, important: bool) -> Declaration {
        Declaration {
            name: name.into(),
            value: value.into(),
            important,
        }
    }

    #[test]
    fn declarations_are_lowercased_and_trimmed() {
        assert_eq!(
            parse_declarations(" White-Space : pre ;; color:red; empty: "),
            vec![decl("white-space", "pre", false), decl("color", "red", false)]
        );
    }

    #[test]
    fn important_flag_is_split_off() {
        assert_eq!(
            parse_declarations("white-space: pre-line ! IMPORTANT; color: red!important"),
            vec![decl("white-space", "pre-line", true), decl("color", "red", true)]
        );
    }

    #[test]
    fn stylesheet_skips_unsupported_selectors() {
        let sheet = parse_stylesheet("p > s { white-space: pre } pre, .poem, #x, * { white-space: pre-line }");
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(
            sheet.rules[0].selectors,
            vec![
                Selector::Type("pre".into()),
                Selector::Class("poem".into()),
                Selector::Id("x".into()),
                Selector::Universal,
            ]
        );
    }

    #[test]
    fn comments_and_at_rules_are_ignored() {
        let sheet = parse_stylesheet(
            "@import url(base.css); /* p { white-space: pre } */ \
             @media print { p { white-space: nowrap } } \
             tei\\:lg { white-space: /* poetry */ pre-line }",
        );
        assert_eq!(
            sheet,
            Stylesheet {
                rules: vec![Rule {
                    selectors: vec![Selector::Type("tei:lg".into())],
                    declarations: vec![decl("white-space", "pre-line", false)],
                }]
            }
        );
    }

    #[test]
    fn unterminated_comment_swallows_the_rest() {
        let sheet = parse_stylesheet("p { white-space: pre } /* s { white-space: nowrap }");
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(strip_comments("no comments"), Cow::Borrowed("no comments"));
    }
}
