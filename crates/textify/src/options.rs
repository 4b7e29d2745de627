//! Configuration options for text rendering.

/// Rendering options.
///
/// The defaults reproduce the classic Textify output: no cell borders,
/// four-column list indentation, a 75 character horizontal rule and the
/// lossy empty-line filter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextifyOptions {
    /// Stamp the tag name into border legends instead of the legend text.
    pub debug: bool,

    /// Draw one-character borders around table cells and fieldsets.
    pub borders: bool,

    /// Left margin for `<ul>`, `<ol>` and `<dd>` content.
    pub list_indent: usize,

    /// Number of marks in a horizontal rule.
    pub rule_width: usize,

    /// Keep empty lines inside appended content instead of dropping them.
    pub preserve_blank_lines: bool,
}

impl Default for TextifyOptions {
    fn default() -> Self {
        Self {
            debug: false,
            borders: false,
            list_indent: 4,
            rule_width: 75,
            preserve_blank_lines: false,
        }
    }
}

impl TextifyOptions {
    /// Enable or disable debug legends.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Enable or disable cell and fieldset borders.
    #[must_use]
    pub const fn with_borders(mut self, borders: bool) -> Self {
        self.borders = borders;
        self
    }

    /// Set the list indentation.
    #[must_use]
    pub const fn with_list_indent(mut self, indent: usize) -> Self {
        self.list_indent = indent;
        self
    }

    /// Set the horizontal rule width.
    #[must_use]
    pub const fn with_rule_width(mut self, width: usize) -> Self {
        self.rule_width = width;
        self
    }

    /// Keep or drop empty lines inside appended content.
    #[must_use]
    pub const fn with_preserve_blank_lines(mut self, preserve: bool) -> Self {
        self.preserve_blank_lines = preserve;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_output() {
        let options = TextifyOptions::default();
        assert!(!options.debug);
        assert!(!options.borders);
        assert_eq!(options.list_indent, 4);
        assert_eq!(options.rule_width, 75);
        assert!(!options.preserve_blank_lines);
    }

    #[test]
    fn builder_methods_chain() {
        let options = TextifyOptions::default()
            .with_borders(true)
            .with_list_indent(2)
            .with_rule_width(10);
        assert!(options.borders);
        assert_eq!(options.list_indent, 2);
        assert_eq!(options.rule_width, 10);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_fills_defaults() {
        let options: TextifyOptions = serde_json::from_str(r#"{"borders": true}"#).unwrap();
        assert!(options.borders);
        assert_eq!(options.rule_width, 75);
    }
}
