//! Closed set of tag behaviours and their default decoration.

use crate::converter::box_model::{Decoration, Layer, Sides};
use crate::converter::renderer::Renderer;
use crate::converter::table::{CellLink, TableId, TableRegistry};
use crate::options::TextifyOptions;

/// How a renderer treats its element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagKind {
    /// Unknown tags and plain containers: inline pass-through.
    Generic,
    /// Elements whose content never shows up (`head`, `script`, ...).
    Ignored,
    /// Inline element wrapped in its inline mark (`**`, `_`, `` ` ``).
    Inline,
    /// `<a>`: `<label: href>`.
    Anchor,
    /// `<br>`: breaks the current line.
    LineBreak,
    /// Block container with no extra behaviour.
    Block,
    /// `<fieldset>`: may take its legend into the top border.
    Fieldset,
    /// `<legend>`: `[label]`.
    Legend,
    /// `<h1>` to `<h6>`.
    Heading {
        /// Heading level, 1 to 6.
        level: u8,
    },
    /// `<blockquote>`: every line prefixed with `> `.
    Blockquote,
    /// `<ul>`, `<ol>` and `<dl>`.
    List {
        /// Whether items are numbered.
        ordered: bool,
        /// Items registered so far.
        counter: usize,
    },
    /// `<li>`.
    ListItem {
        /// Position in the enclosing list.
        number: Option<usize>,
        /// Whether the enclosing list is numbered.
        ordered: bool,
    },
    /// `<hr>`.
    Rule,
    /// `<table>`, rendered in two passes.
    Table {
        /// Shared row/column state.
        table: TableId,
    },
    /// `<thead>`, `<tbody>` and `<tfoot>`.
    TableSection,
    /// `<tr>` inside a table.
    Row {
        /// Owning table.
        table: TableId,
        /// Row index inside the table.
        row: usize,
    },
    /// `<td>` or `<th>` inside a row.
    Cell {
        /// Table position and report latch.
        link: CellLink,
        /// Whether this is a `<th>`.
        header: bool,
    },
}

impl TagKind {
    /// Pick the behaviour for `tag`.
    ///
    /// List items take their number from the parent list, rows register with
    /// the enclosing table and cells with their parent row. Rows and cells
    /// outside that structure degrade to plain blocks.
    pub(crate) fn resolve(
        tag: &str,
        parent: Option<&mut Renderer>,
        table: Option<TableId>,
        tables: &mut TableRegistry,
    ) -> Self {
        match tag {
            "head" | "script" | "style" | "template" | "noscript" => Self::Ignored,
            "em" | "i" | "strong" | "b" | "code" | "kbd" | "samp" | "tt" => Self::Inline,
            "a" => Self::Anchor,
            "br" => Self::LineBreak,
            "div" | "p" | "dt" | "dd" | "address" | "section" | "article" | "header" | "footer" | "nav"
            | "main" | "aside" | "figure" => Self::Block,
            "fieldset" => Self::Fieldset,
            "legend" => Self::Legend,
            "h1" => Self::Heading { level: 1 },
            "h2" => Self::Heading { level: 2 },
            "h3" => Self::Heading { level: 3 },
            "h4" => Self::Heading { level: 4 },
            "h5" => Self::Heading { level: 5 },
            "h6" => Self::Heading { level: 6 },
            "blockquote" => Self::Blockquote,
            "ul" | "dl" => Self::List {
                ordered: false,
                counter: 0,
            },
            "ol" => Self::List {
                ordered: true,
                counter: 0,
            },
            "li" => match parent.map(Renderer::kind_mut) {
                Some(Self::List { ordered, counter }) => {
                    *counter += 1;
                    Self::ListItem {
                        number: Some(*counter),
                        ordered: *ordered,
                    }
                }
                _ => Self::ListItem {
                    number: None,
                    ordered: false,
                },
            },
            "hr" => Self::Rule,
            "table" => Self::Table {
                table: tables.create(),
            },
            "thead" | "tbody" | "tfoot" => Self::TableSection,
            "tr" => match table.and_then(|id| tables.get_mut(id).map(|state| (id, state.add_row()))) {
                Some((table, row)) => Self::Row { table, row },
                None => Self::Block,
            },
            "td" | "th" => {
                let Some(&mut Self::Row { table, row }) = parent.map(Renderer::kind_mut) else {
                    return Self::Block;
                };
                let Some(column) = tables.get_mut(table).and_then(|state| state.add_column(row)) else {
                    return Self::Block;
                };
                Self::Cell {
                    link: CellLink {
                        table,
                        row,
                        column,
                        reported: None,
                    },
                    header: tag == "th",
                }
            }
            _ => Self::Generic,
        }
    }

    /// Whether output starts on its own line in the parent.
    #[must_use]
    pub const fn is_block(&self) -> bool {
        !matches!(
            self,
            Self::Generic | Self::Ignored | Self::Inline | Self::Anchor | Self::LineBreak
        )
    }

    /// Whether a box layer is drawn for this kind.
    #[must_use]
    pub const fn draws(&self, layer: Layer) -> bool {
        self.is_block()
            && !matches!(
                (self, layer),
                (Self::Row { .. }, _) | (Self::Table { .. }, Layer::Border) | (Self::Cell { .. }, Layer::Margin)
            )
    }

    /// Whether content is stacked as table rows.
    #[must_use]
    pub const fn stacks_rows(&self) -> bool {
        matches!(self, Self::Table { .. } | Self::TableSection)
    }
}

/// Default box sizes for a tag.
pub(crate) fn decoration(tag: &str, kind: &TagKind, options: &TextifyOptions) -> Decoration {
    let indent = options.list_indent;
    let framed = if options.borders { Sides::all(1) } else { Sides::ZERO };

    match kind {
        TagKind::Heading { .. } | TagKind::Rule => Decoration {
            margin: Sides::new(1, 0, 1, 0),
            ..Decoration::default()
        },
        TagKind::List { .. } if tag == "dl" => Decoration {
            margin: Sides::new(0, 0, 1, 0),
            ..Decoration::default()
        },
        TagKind::List { .. } => Decoration {
            margin: Sides::new(0, 0, 1, indent),
            ..Decoration::default()
        },
        TagKind::Table { .. } => Decoration {
            margin: Sides::new(0, 0, 1, 0),
            ..Decoration::default()
        },
        TagKind::Cell { .. } => Decoration {
            padding: Sides::new(0, 1, 0, 1),
            border: framed,
            ..Decoration::default()
        },
        TagKind::Fieldset => Decoration {
            border: framed,
            ..Decoration::default()
        },
        TagKind::Block if tag == "p" => Decoration {
            margin: Sides::new(0, 0, 1, 0),
            ..Decoration::default()
        },
        TagKind::Block if tag == "dd" => Decoration {
            margin: Sides::new(0, 0, 0, indent),
            ..Decoration::default()
        },
        _ => Decoration::default(),
    }
}

/// Default inline mark for a tag.
pub(crate) fn inline_mark(tag: &str) -> &'static str {
    match tag {
        "em" | "i" => "_",
        "strong" | "b" => "**",
        "code" | "kbd" | "samp" | "tt" => "`",
        "h1" => "=",
        "h2" | "hr" => "-",
        "h3" | "h4" | "h5" | "h6" => "#",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(tag: &str) -> TagKind {
        TagKind::resolve(tag, None, None, &mut TableRegistry::default())
    }

    #[test]
    fn unknown_tags_fall_back_to_generic() {
        assert_eq!(resolve("blink"), TagKind::Generic);
        assert_eq!(resolve("span"), TagKind::Generic);
        assert!(!TagKind::Generic.is_block());
    }

    #[test]
    fn inline_and_block_classification() {
        assert!(!resolve("strong").is_block());
        assert!(!resolve("a").is_block());
        assert!(resolve("p").is_block());
        assert!(resolve("h4").is_block());
        assert_eq!(resolve("h4"), TagKind::Heading { level: 4 });
    }

    #[test]
    fn table_parts_outside_tables_degrade() {
        assert_eq!(resolve("tr"), TagKind::Block);
        assert_eq!(resolve("td"), TagKind::Block);
    }

    #[test]
    fn cells_take_their_column_from_the_row() {
        let options = TextifyOptions::default();
        let mut tables = TableRegistry::default();
        let table = tables.create();
        let kind = TagKind::resolve("tr", None, Some(table), &mut tables);
        assert_eq!(kind, TagKind::Row { table, row: 0 });

        let mut row = Renderer::new("tr", kind, &std::collections::BTreeMap::new(), &options);
        let first = TagKind::resolve("td", Some(&mut row), Some(table), &mut tables);
        let second = TagKind::resolve("th", Some(&mut row), Some(table), &mut tables);
        assert!(matches!(first, TagKind::Cell { link, header: false } if link.column == 0));
        assert!(matches!(second, TagKind::Cell { link, header: true } if link.column == 1));
        assert_eq!(tables.get(table).map(|state| state.rows().to_vec()), Some(vec![2]));
    }

    #[test]
    fn list_items_outside_lists_are_bulleted() {
        assert_eq!(
            resolve("li"),
            TagKind::ListItem {
                number: None,
                ordered: false
            }
        );
    }

    #[test]
    fn layer_switches() {
        let mut tables = TableRegistry::default();
        let table = tables.create();
        assert!(!TagKind::Table { table }.draws(Layer::Border));
        assert!(TagKind::Table { table }.draws(Layer::Margin));
        assert!(!TagKind::Inline.draws(Layer::Padding));
        assert!(TagKind::Block.draws(Layer::Border));
    }

    #[test]
    fn default_decoration_per_tag() {
        let options = TextifyOptions::default();
        assert_eq!(decoration("p", &TagKind::Block, &options).margin, Sides::new(0, 0, 1, 0));
        assert_eq!(decoration("div", &TagKind::Block, &options), Decoration::default());
        assert_eq!(decoration("dd", &TagKind::Block, &options).margin.left, 4);

        let ol = TagKind::List {
            ordered: true,
            counter: 0,
        };
        assert_eq!(
            decoration("ol", &ol, &options.clone().with_list_indent(2)).margin,
            Sides::new(0, 0, 1, 2)
        );
        assert_eq!(decoration("dl", &ol, &options).margin, Sides::new(0, 0, 1, 0));
        assert_eq!(
            decoration("fieldset", &TagKind::Fieldset, &options.with_borders(true)).border,
            Sides::all(1)
        );
    }
}
