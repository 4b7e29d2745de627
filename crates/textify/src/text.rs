//! Text utilities: whitespace collapsing and display-width measurement.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use unicode_width::UnicodeWidthStr;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\r\n\x0C]+").expect("valid whitespace pattern"));

/// Collapse every run of whitespace (spaces, tabs, newlines) into a single space.
///
/// Non-breaking spaces are not whitespace here and survive untouched.
/// Leading and trailing runs are kept as one space so inline text still
/// separates from its neighbours. Applying it twice changes nothing.
pub fn collapse_whitespace(text: &str) -> Cow<'_, str> {
    WHITESPACE_RUN.replace_all(text, " ")
}

/// Display width of a line in terminal columns.
pub fn display_width(line: &str) -> usize {
    UnicodeWidthStr::width(line)
}

/// Width of the longest run of characters between spaces or tabs.
pub fn longest_token(line: &str) -> usize {
    line.split([' ', '\t'])
        .map(display_width)
        .max()
        .unwrap_or(0)
}

/// Pad `line` on the right with spaces until it is `width` columns wide.
///
/// Lines already at or beyond `width` are returned unchanged.
pub fn pad_right(line: &str, width: usize) -> String {
    let current = display_width(line);
    let mut padded = String::with_capacity(line.len() + width.saturating_sub(current));
    padded.push_str(line);
    padded.extend(std::iter::repeat_n(' ', width.saturating_sub(current)));
    padded
}

/// Repeat `mark` until the result is exactly `width` characters long.
///
/// An empty mark fills with spaces.
pub fn fill(mark: &str, width: usize) -> String {
    if mark.is_empty() {
        return " ".repeat(width);
    }
    mark.chars().cycle().take(width).collect()
}
