//! Two-pass table layout.

use textify::{Document, TablePhase, Textify, TextifyOptions, convert_html};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn render(html: &str, options: &TextifyOptions) -> String {
    init_logging();
    convert_html(html, options).unwrap()
}

const GRID: &str = "<table><tr><td>a</td><td>bb</td></tr><tr><td>ccc</td><td>d</td></tr></table>";

#[test]
fn test_columns_share_the_widest_cell() {
    init_logging();
    let document = Document::parse(GRID).unwrap();
    let table = document.find("table").unwrap();
    let mut textify = Textify::new(&document, TextifyOptions::default());
    let raw = textify.render();

    let state = textify.table_state(table).unwrap();
    assert_eq!(state.column_widths(), vec![3, 2]);
    assert_eq!(state.rows(), &[2, 2]);
    assert_eq!(state.phase(), TablePhase::Done);

    let lines: Vec<&str> = raw.lines().collect();
    assert!(lines.contains(&" a   bb "));
    assert!(lines.contains(&" ccc d  "));
}

#[test]
fn test_rows_align() {
    assert_eq!(render(GRID, &TextifyOptions::default()), " a   bb\n ccc d\n");
}

#[test]
fn test_header_cells_are_bracketed() {
    let html = "<table><tr><th>Name</th><th>Qty</th></tr><tr><td>apple</td><td>3</td></tr></table>";
    assert_eq!(render(html, &TextifyOptions::default()), " [Name] [Qty]\n apple  3\n");
}

#[test]
fn test_bordered_grid_shares_edges() {
    let options = TextifyOptions::default().with_borders(true);
    assert_eq!(
        render(GRID, &options),
        "+-----+----+\n\
         | a   | bb |\n\
         +-----+----+\n\
         | ccc | d  |\n\
         +-----+----+\n"
    );
}

#[test]
fn test_debug_labels_cell_borders() {
    let options = TextifyOptions::default().with_borders(true).with_debug(true);
    assert_eq!(
        render("<table><tr><td>hello</td></tr></table>", &options),
        "+-td----+\n| hello |\n+-------+\n"
    );
}

#[test]
fn test_empty_cells_keep_their_column() {
    let html = "<table><tr><td></td><td>x</td></tr><tr><td>yy</td><td>z</td></tr></table>";
    assert_eq!(render(html, &TextifyOptions::default()), "    x\n yy z\n");
}

#[test]
fn test_ragged_rows_render() {
    let html = "<table><tr><td>a</td><td>b</td></tr><tr><td>c</td></tr></table>";
    init_logging();
    let document = Document::parse(html).unwrap();
    let mut textify = Textify::new(&document, TextifyOptions::default());
    textify.render();
    let table = document.find("table").unwrap();
    assert_eq!(textify.table_state(table).unwrap().rows(), &[2, 1]);

    assert_eq!(render(html, &TextifyOptions::default()), " a b\n c\n");
}

#[test]
fn test_nested_tables() {
    let html = "<table><tr><td><table><tr><td>x</td></tr></table></td></tr></table>";
    assert_eq!(render(html, &TextifyOptions::default()), "  x\n");
}

#[test]
fn test_formatting_whitespace_is_ignored() {
    let html = concat!(
        "<table>\n",
        "  <tr>\n    <td>a</td>\n    <td>bb</td>\n  </tr>\n",
        "  <tr>\n    <td>ccc</td>\n    <td>d</td>\n  </tr>\n",
        "</table>",
    );
    assert_eq!(render(html, &TextifyOptions::default()), " a   bb\n ccc d\n");
}

#[test]
fn test_rows_outside_tables_render_as_blocks() {
    let mut document = Document::new();
    let root = document.element(None, "div", &[]);
    let tr = document.element(Some(root), "tr", &[]);
    let td = document.element(Some(tr), "td", &[]);
    document.text(td, "loose");
    assert_eq!(textify::convert_document(&document, &TextifyOptions::default()), "loose\n");
}

#[test]
fn test_fieldset_inside_a_cell_keeps_one_legend() {
    let options = TextifyOptions::default().with_borders(true);
    let html = "<table><tr><td><fieldset><legend>Info</legend>some text here</fieldset></td></tr></table>";
    assert_eq!(
        render(html, &options),
        "+------------------+\n\
         | +-Info---------+ |\n\
         | |some text here| |\n\
         | +--------------+ |\n\
         +------------------+\n"
    );
}
