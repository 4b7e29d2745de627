//! Per-element renderer: content buffer, decoration and the tag hooks.

use std::collections::BTreeMap;

use crate::converter::box_model::{Decoration, Marks};
use crate::converter::buffer::{ContentBuffer, Width};
use crate::converter::tag::{self, TagKind};
use crate::converter::table::zip_cells;
use crate::options::TextifyOptions;
use crate::text::{collapse_whitespace, display_width};

/// Rendering state for one element.
///
/// Structural fields (kind, decoration, marks) are fixed when the renderer is
/// created; the content buffer is cleared before every pass.
#[derive(Debug, Clone)]
pub struct Renderer {
    tag: String,
    kind: TagKind,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    buffer: ContentBuffer,
    decoration: Decoration,
    marks: Marks,
    legend: String,
}

impl Renderer {
    pub(crate) fn new(tag: &str, kind: TagKind, attrs: &BTreeMap<String, String>, options: &TextifyOptions) -> Self {
        let decoration = tag::decoration(tag, &kind, options);
        let mut marks = Marks {
            inline: tag::inline_mark(tag).to_string(),
            ..Marks::default()
        };
        if options.borders && matches!(kind, TagKind::Cell { .. } | TagKind::Fieldset) {
            marks.corner = Some("+".to_string());
        }

        let mut renderer = Self {
            tag: tag.to_string(),
            kind,
            attrs: BTreeMap::new(),
            styles: BTreeMap::new(),
            buffer: ContentBuffer::new(options.preserve_blank_lines),
            decoration,
            marks,
            legend: String::new(),
        };
        for (name, value) in attrs {
            if name == "style" {
                renderer.styles = parse_styles(value);
            } else {
                renderer.attrs.insert(name.clone(), value.clone());
            }
        }
        renderer
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Behaviour of this renderer.
    #[must_use]
    pub const fn kind(&self) -> &TagKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut TagKind {
        &mut self.kind
    }

    /// Attributes other than `style`.
    #[must_use]
    pub const fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    /// Declarations parsed from the `style` attribute. Not used for layout.
    #[must_use]
    pub const fn styles(&self) -> &BTreeMap<String, String> {
        &self.styles
    }

    /// Current content lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        self.buffer.lines()
    }

    /// Content width watermarks.
    #[must_use]
    pub const fn width(&self) -> Width {
        self.buffer.width()
    }

    /// Box sizes.
    #[must_use]
    pub const fn decoration(&self) -> &Decoration {
        &self.decoration
    }

    /// Mark registry.
    #[must_use]
    pub const fn marks(&self) -> &Marks {
        &self.marks
    }

    /// Legend text, empty when none was seen.
    #[must_use]
    pub fn legend(&self) -> &str {
        &self.legend
    }

    /// Whether the output starts on its own line in the parent.
    #[must_use]
    pub const fn is_block(&self) -> bool {
        self.kind.is_block()
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut ContentBuffer {
        &mut self.buffer
    }

    /// Drop content and any legend collected by the previous pass.
    pub(crate) fn clear(&mut self) {
        self.buffer.clear();
        self.legend.clear();
    }

    /// Label stamped into the top border: the tag name in debug mode,
    /// otherwise the legend text when there is one.
    pub(crate) fn border_legend(&self, debug: bool) -> Option<&str> {
        if debug {
            Some(&self.tag)
        } else if self.legend.is_empty() {
            None
        } else {
            Some(&self.legend)
        }
    }

    /// Text placed before the content.
    pub(crate) fn before(&self) -> String {
        match &self.kind {
            TagKind::Inline => self.marks.inline(1),
            TagKind::Anchor => "<".to_string(),
            TagKind::Heading { level } if *level > 2 => format!("{} ", self.marks.inline(usize::from(*level))),
            TagKind::ListItem {
                number: Some(number),
                ordered: true,
            } => format!("{number}. "),
            TagKind::ListItem { .. } => "* ".to_string(),
            TagKind::Cell { header: true, .. } => "[".to_string(),
            _ => String::new(),
        }
    }

    /// Text placed after the content.
    pub(crate) fn after(&self) -> String {
        match &self.kind {
            TagKind::Inline => self.marks.inline(1),
            TagKind::Anchor => match self.attrs.get("href") {
                Some(href) if !href.is_empty() && !href.starts_with('#') => format!(": {href}>"),
                _ => ">".to_string(),
            },
            TagKind::Heading { level } if *level > 2 => format!(" {}", self.marks.inline(usize::from(*level))),
            TagKind::Cell { header: true, .. } => "]".to_string(),
            _ => String::new(),
        }
    }

    /// Turn a text node into content, or drop it.
    pub(crate) fn format(&mut self, text: &str) -> Option<String> {
        if text.is_empty() {
            return None;
        }
        match &self.kind {
            TagKind::Row { .. } => None,
            TagKind::Table { .. } | TagKind::TableSection => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| collapse_whitespace(trimmed).into_owned())
            }
            TagKind::Legend => {
                let label = collapse_whitespace(text.trim()).into_owned();
                if label.is_empty() {
                    return None;
                }
                self.legend.push_str(&label);
                Some(format!("[{label}]"))
            }
            _ => Some(collapse_whitespace(text).into_owned()),
        }
    }

    /// Add formatted text.
    pub(crate) fn append_text(&mut self, text: &str) {
        if self.kind.stacks_rows() {
            self.buffer.append_rows(text);
        } else {
            self.buffer.append(text, false);
        }
    }

    /// Add a rendered child.
    pub(crate) fn append_child(&mut self, output: &str, block: bool) {
        match &self.kind {
            TagKind::Row { .. } => self.buffer.push_raw(output.to_string()),
            kind if kind.stacks_rows() => self.buffer.append_rows(output),
            _ => self.buffer.append(output, block),
        }
    }

    /// Take a child's legend into this fieldset's top border.
    ///
    /// Returns `true` when the child's own output should be dropped.
    pub(crate) fn absorb_legend(&mut self, child: &Self) -> bool {
        if self.kind != TagKind::Fieldset || child.kind != TagKind::Legend || self.decoration.border.top == 0 {
            return false;
        }
        self.legend.clone_from(&child.legend);
        true
    }

    /// Content rewritten before the hooks run, for kinds that replace or
    /// transform their content wholesale.
    pub(crate) fn prepare(&mut self, rule_width: usize) {
        match &self.kind {
            TagKind::LineBreak => self.buffer.replace(vec![" ".to_string(), " ".to_string()]),
            TagKind::Rule => {
                let rule = self.marks.inline(rule_width);
                self.buffer.replace(vec![rule]);
            }
            TagKind::Blockquote => self.buffer.map_lines(|line| format!("> {line}")),
            TagKind::Cell { .. } if self.buffer.is_empty() => self.buffer.push_raw(String::new()),
            _ => {}
        }
    }

    /// Underline level 1 and 2 headings with their mark.
    pub(crate) fn underline(&mut self) {
        if !matches!(self.kind, TagKind::Heading { level: 1 | 2 }) {
            return;
        }
        let width = self
            .buffer
            .lines()
            .iter()
            .map(|line| display_width(line.trim()))
            .max()
            .unwrap_or(0);
        if width > 0 {
            let underline = self.marks.inline(width);
            self.buffer.append(&underline, true);
        }
    }

    /// Zip the collected cells of a row.
    pub(crate) fn zip_row(&self) -> String {
        zip_cells(self.buffer.lines()).join("\n")
    }

    /// Lines joined with newlines.
    pub(crate) fn text(&self) -> String {
        self.buffer.text()
    }
}

/// Split a `style` attribute into `property: value` declarations.
fn parse_styles(raw: &str) -> BTreeMap<String, String> {
    raw.split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .map(|(property, value)| (property.trim().to_ascii_lowercase(), value.trim().to_string()))
        .filter(|(property, _)| !property.is_empty())
        .collect()
}
