#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]
//! Render HTML as Markdown-style plain text.
//!
//! Structure is kept with literal marks (`**bold**`, `_em_`, `` `code` ``,
//! `> quotes`, `* items`, `1. items`, underlined or `###` headings) and a
//! whitespace box model: every block element can be wrapped in padding,
//! border and margin layers. Tables are rendered in two passes so that all
//! rows share the same column widths.
//!
//! # Example
//!
//! ```rust
//! use textify::{convert_html, TextifyOptions};
//!
//! let html = "<h1>Title</h1><p>Some <strong>bold</strong> text.</p>";
//! let text = convert_html(html, &TextifyOptions::default())?;
//! assert_eq!(text, "Title\n=====\n\nSome **bold** text.\n");
//! # Ok::<(), textify::ConversionError>(())
//! ```

pub mod converter;
pub mod dom;
pub mod error;
pub mod options;
pub mod text;

pub use converter::Textify;
pub use converter::box_model::{Decoration, EdgeMarks, Layer, Marks, Sides};
pub use converter::buffer::{ContentBuffer, Width};
pub use converter::cache::RenderCache;
pub use converter::renderer::Renderer;
pub use converter::table::{TablePhase, TableState};
pub use converter::tag::TagKind;
pub use dom::{Document, Node, NodeId, NodeKind};
pub use error::{ConversionError, Result};
pub use options::TextifyOptions;

/// Parse `html` and render it as text.
///
/// # Errors
///
/// Returns an error if the markup cannot be parsed into a document.
pub fn convert_html(html: &str, options: &TextifyOptions) -> Result<String> {
    let document = Document::parse(html)?;
    Ok(convert_document(&document, options))
}

/// Render an already built document as text.
///
/// Trailing whitespace is removed from every line, leading and trailing blank
/// lines are dropped and non-empty output ends with a single newline.
pub fn convert_document(document: &Document, options: &TextifyOptions) -> String {
    let raw = Textify::new(document, options.clone()).render();
    finalize(&raw)
}

fn finalize(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().map(str::trim_end).collect();
    let Some(first) = lines.iter().position(|line| !line.is_empty()) else {
        return String::new();
    };
    let last = lines.iter().rposition(|line| !line.is_empty()).unwrap_or(first);

    let mut output = lines[first..=last].join("\n");
    output.push('\n');
    output
}
