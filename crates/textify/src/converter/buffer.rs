//! Line buffer that stitches inline content and stacks block content.
//!
//! Every renderer owns one buffer. Inline content continues the current last
//! line, block content always starts a new line. While content flows in the
//! buffer keeps two watermarks: the widest line (`max`) and the widest
//! unbroken token (`min`).

use crate::text::{display_width, longest_token, pad_right};

/// Content width watermarks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Width {
    /// Width of the longest whitespace-delimited token.
    pub min: usize,
    /// Width of the longest line.
    pub max: usize,
}

/// Ordered text lines plus their width watermarks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentBuffer {
    lines: Vec<String>,
    width: Width,
    keep_blank_lines: bool,
}

impl ContentBuffer {
    /// Create an empty buffer. With `keep_blank_lines` unset, empty lines in
    /// incoming content are dropped.
    #[must_use]
    pub const fn new(keep_blank_lines: bool) -> Self {
        Self {
            lines: Vec::new(),
            width: Width { min: 0, max: 0 },
            keep_blank_lines,
        }
    }

    /// Current lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Current watermarks.
    #[must_use]
    pub const fn width(&self) -> Width {
        self.width
    }

    /// Whether the buffer holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop all lines and reset the watermarks for a new pass.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.width = Width::default();
    }

    /// Split `content` into lines, raising the watermarks for every line seen.
    ///
    /// Empty lines are measured but not returned unless blank lines are kept.
    pub fn split(&mut self, content: &str) -> Vec<String> {
        if content.is_empty() {
            return Vec::new();
        }
        let mut lines = Vec::new();
        for line in content.split('\n') {
            self.observe(line);
            if self.keep_blank_lines || !line.is_empty() {
                lines.push(line.to_string());
            }
        }
        lines
    }

    /// Append `content`. Inline content glues its first line onto the current
    /// last line; block content starts on a fresh line.
    pub fn append(&mut self, content: &str, block: bool) {
        let mut incoming = self.split(content).into_iter();
        if !block {
            let Some(first) = incoming.next() else { return };
            match self.lines.last_mut() {
                Some(last) => {
                    last.push_str(&first);
                    let joined = last.clone();
                    self.observe(&joined);
                }
                None => self.lines.push(first),
            }
        }
        self.lines.extend(incoming);
    }

    /// Prepend `content`, gluing its last line onto the current first line.
    ///
    /// The joined first line is right-padded to the widest line so the block
    /// stays rectangular.
    pub fn prepend(&mut self, content: &str) {
        let mut incoming = self.split(content);
        let Some(last) = incoming.pop() else { return };

        if self.lines.is_empty() {
            self.lines.push(last);
        } else {
            self.lines[0].insert_str(0, &last);
        }
        let joined = self.lines[0].clone();
        self.observe(&joined);
        self.lines[0] = pad_right(&joined, self.width.max);

        if !incoming.is_empty() {
            incoming.append(&mut self.lines);
            self.lines = incoming;
        }
    }

    /// Append a line verbatim, bypassing splitting and filtering.
    pub fn push_raw(&mut self, line: String) {
        self.observe(&line);
        self.lines.push(line);
    }

    /// Append block lines, skipping the first one when it repeats the current
    /// last line. Stacked table rows use this so that a row's bottom border
    /// and the next row's top border collapse into one line.
    pub fn append_rows(&mut self, content: &str) {
        let mut incoming = self.split(content);
        if let (Some(last), Some(first)) = (self.lines.last(), incoming.first()) {
            if !last.is_empty() && last == first {
                incoming.remove(0);
            }
        }
        self.lines.extend(incoming);
    }

    /// Replace every line with `lines` and rescan the watermarks.
    pub fn replace(&mut self, lines: Vec<String>) {
        self.lines = lines;
        self.measure();
    }

    /// Rewrite each line in place and rescan the watermarks.
    pub fn map_lines(&mut self, f: impl Fn(&str) -> String) {
        for line in &mut self.lines {
            *line = f(line);
        }
        self.measure();
    }

    /// Rescan all lines, raising the watermarks where needed.
    pub fn measure(&mut self) {
        let lines = std::mem::take(&mut self.lines);
        for line in &lines {
            self.observe(line);
        }
        self.lines = lines;
    }

    pub(crate) fn lines_mut(&mut self) -> &mut Vec<String> {
        &mut self.lines
    }

    /// Lines joined with newlines.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn observe(&mut self, line: &str) {
        self.width.max = self.width.max.max(display_width(line));
        self.width.min = self.width.min.max(longest_token(line));
    }
}
