//! Character-offset helpers for text node buffers.
//!
//! Caret offsets inside text nodes count Unicode scalar values, not bytes.
//! These helpers translate between the two so that buffer edits always land
//! on UTF-8 character boundaries.

/// Number of characters in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte index of the character at `char_offset`.
///
/// Offsets past the end map to `s.len()`.
///
/// # Examples
///
/// ```
/// use dom::text::byte_offset;
///
/// let s = "a€b"; // '€' is 3 bytes
/// assert_eq!(byte_offset(s, 0), 0);
/// assert_eq!(byte_offset(s, 1), 1);
/// assert_eq!(byte_offset(s, 2), 4);
/// assert_eq!(byte_offset(s, 3), 5);
/// assert_eq!(byte_offset(s, 100), 5);
/// ```
pub fn byte_offset(s: &str, char_offset: usize) -> usize {
    s.char_indices()
        .nth(char_offset)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

/// Clamp a possibly negative offset into `[0, len]`.
///
/// # Examples
///
/// ```
/// use dom::text::clamp_offset;
///
/// assert_eq!(clamp_offset(-1, 4), 0);
/// assert_eq!(clamp_offset(2, 4), 2);
/// assert_eq!(clamp_offset(9, 4), 4);
/// ```
#[inline]
pub fn clamp_offset(offset: isize, len: usize) -> usize {
    if offset <= 0 {
        0
    } else {
        (offset as usize).min(len)
    }
}

/// Split `s` at a character offset (clamped to the end).
pub fn split_at_char(s: &str, char_offset: usize) -> (&str, &str) {
    s.split_at(byte_offset(s, char_offset))
}

/// Remove characters `[start, start + count)` from `s` and return them.
pub fn drain_chars(s: &mut String, start: usize, count: usize) -> String {
    let from = byte_offset(s, start);
    let to = from + byte_offset(&s[from..], count);
    s.drain(from..to).collect()
}

/// Insert `text` at a character offset (clamped to the end).
pub fn insert_chars(s: &mut String, char_offset: usize, text: &str) {
    let at = byte_offset(s, char_offset);
    s.insert_str(at, text);
}
