//! Padding, border and margin layers drawn with literal marks.
//!
//! Each layer wraps the lines it is given: every line is padded to the box
//! width, wrapped with the left and right marks, and framed by whole lines of
//! the top and bottom marks. Layers are applied one after another (padding,
//! border, margin) so the margin ends up outermost.

use crate::text::{display_width, fill, pad_right};

/// One of the three decoration layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Innermost, drawn with spaces.
    Padding,
    /// Drawn with `-` and `|` by default.
    Border,
    /// Outermost, drawn with spaces.
    Margin,
}

/// Repeat counts per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sides {
    /// Lines above the content.
    pub top: usize,
    /// Columns right of the content.
    pub right: usize,
    /// Lines below the content.
    pub bottom: usize,
    /// Columns left of the content.
    pub left: usize,
}

impl Sides {
    /// No decoration on any side.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Sides in CSS order: top, right, bottom, left.
    #[must_use]
    pub const fn new(top: usize, right: usize, bottom: usize, left: usize) -> Self {
        Self { top, right, bottom, left }
    }

    /// The same count on every side.
    #[must_use]
    pub const fn all(n: usize) -> Self {
        Self::new(n, n, n, n)
    }
}

/// Repeat counts for every layer of a box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoration {
    /// Padding layer sizes.
    pub padding: Sides,
    /// Border layer sizes.
    pub border: Sides,
    /// Margin layer sizes.
    pub margin: Sides,
}

impl Decoration {
    /// Sizes for one layer.
    #[must_use]
    pub const fn sides(&self, layer: Layer) -> Sides {
        match layer {
            Layer::Padding => self.padding,
            Layer::Border => self.border,
            Layer::Margin => self.margin,
        }
    }
}

/// Edge characters for one layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMarks {
    /// Mark repeated along the top edge.
    pub top: String,
    /// Mark repeated along the right edge.
    pub right: String,
    /// Mark repeated along the bottom edge.
    pub bottom: String,
    /// Mark repeated along the left edge.
    pub left: String,
}

impl EdgeMarks {
    /// Marks with horizontal and vertical characters.
    #[must_use]
    pub fn new(horizontal: &str, vertical: &str) -> Self {
        Self {
            top: horizontal.to_string(),
            right: vertical.to_string(),
            bottom: horizontal.to_string(),
            left: vertical.to_string(),
        }
    }

    /// Default marks for a layer.
    #[must_use]
    pub fn layer_default(layer: Layer) -> Self {
        match layer {
            Layer::Padding | Layer::Margin => Self::new(" ", " "),
            Layer::Border => Self::new("-", "|"),
        }
    }
}

/// Mark registry of a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marks {
    /// Inline mark such as `**` or `_`.
    pub inline: String,
    /// Padding edges.
    pub padding: EdgeMarks,
    /// Border edges.
    pub border: EdgeMarks,
    /// Margin edges.
    pub margin: EdgeMarks,
    /// Corner mark for border lines, when corners are drawn.
    pub corner: Option<String>,
}

impl Default for Marks {
    fn default() -> Self {
        Self {
            inline: String::new(),
            padding: EdgeMarks::layer_default(Layer::Padding),
            border: EdgeMarks::layer_default(Layer::Border),
            margin: EdgeMarks::layer_default(Layer::Margin),
            corner: None,
        }
    }
}

impl Marks {
    /// Edge marks for one layer.
    #[must_use]
    pub const fn edges(&self, layer: Layer) -> &EdgeMarks {
        match layer {
            Layer::Padding => &self.padding,
            Layer::Border => &self.border,
            Layer::Margin => &self.margin,
        }
    }

    /// The inline mark repeated `count` times.
    #[must_use]
    pub fn inline(&self, count: usize) -> String {
        self.inline.repeat(count)
    }
}

/// Everything needed to draw one layer around a block of lines.
#[derive(Debug, Clone, Copy)]
pub struct BoxLayer<'a> {
    /// Which layer is drawn.
    pub layer: Layer,
    /// Repeat counts per side.
    pub sides: Sides,
    /// Edge marks.
    pub marks: &'a EdgeMarks,
    /// Corner mark for the top and bottom lines of a border.
    pub corner: Option<&'a str>,
    /// Width every content line is padded to.
    pub width: usize,
    /// Label stamped into the top border line.
    pub legend: Option<&'a str>,
}

impl BoxLayer<'_> {
    /// Wrap `lines` in this layer.
    pub fn apply(&self, lines: &mut Vec<String>) {
        let marks = self.marks;
        let left = marks.left.repeat(self.sides.left);
        let right = marks.right.repeat(self.sides.right);

        let mut box_width = self.width + display_width(&left) + display_width(&right);
        for line in lines.iter_mut() {
            *line = format!("{left}{}{right}", pad_right(line, self.width));
            box_width = box_width.max(display_width(line));
        }

        let corner = match self.layer {
            Layer::Border => self.corner,
            Layer::Padding | Layer::Margin => None,
        };

        if self.sides.top > 0 {
            let mut top = self.edge(&marks.top, box_width, corner);
            if self.layer == Layer::Border {
                if let Some(legend) = self.legend {
                    top = stamp_legend(&top, legend);
                }
            }
            let mut framed = vec![top; self.sides.top];
            framed.append(lines);
            *lines = framed;
        }

        if self.sides.bottom > 0 {
            let bottom = self.edge(&marks.bottom, box_width, corner);
            lines.extend(std::iter::repeat_n(bottom, self.sides.bottom));
        }
    }

    fn edge(&self, mark: &str, width: usize, corner: Option<&str>) -> String {
        match corner {
            Some(corner) if self.sides.left + self.sides.right <= width => {
                let inner = width - self.sides.left - self.sides.right;
                format!(
                    "{}{}{}",
                    fill(corner, self.sides.left),
                    fill(mark, inner),
                    fill(corner, self.sides.right)
                )
            }
            _ => fill(mark, width),
        }
    }
}

/// Overwrite part of a border line with a label, starting at the third
/// character. The label is cut short rather than widening the line or
/// covering its last character.
#[must_use]
pub fn stamp_legend(line: &str, legend: &str) -> String {
    const OFFSET: usize = 2;

    let chars: Vec<char> = line.chars().collect();
    if legend.is_empty() || chars.len() <= OFFSET + 1 {
        return line.to_string();
    }
    let room = chars.len() - OFFSET - 1;
    let label: Vec<char> = legend.chars().take(room).collect();

    let mut stamped: String = chars[..OFFSET].iter().collect();
    stamped.extend(label.iter());
    stamped.extend(chars[OFFSET + label.len()..].iter());
    stamped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(lines: &mut Vec<String>, layer: Layer, sides: Sides, width: usize) {
        let marks = EdgeMarks::layer_default(layer);
        BoxLayer {
            layer,
            sides,
            marks: &marks,
            corner: None,
            width,
            legend: None,
        }
        .apply(lines);
    }

    #[test]
    fn padding_then_border_frames_content() {
        let mut lines = vec!["x".to_string()];
        draw(&mut lines, Layer::Padding, Sides::new(0, 1, 0, 1), 1);
        draw(&mut lines, Layer::Border, Sides::all(1), 3);
        draw(&mut lines, Layer::Margin, Sides::ZERO, 5);
        assert_eq!(lines, vec!["-----", "| x |", "-----"]);
    }

    #[test]
    fn vertical_padding_adds_blank_rows() {
        let mut lines = vec!["x".to_string()];
        draw(&mut lines, Layer::Padding, Sides::all(1), 1);
        draw(&mut lines, Layer::Border, Sides::all(1), 3);
        assert_eq!(lines, vec!["-----", "|   |", "| x |", "|   |", "-----"]);
    }

    #[test]
    fn lines_are_padded_to_box_width() {
        let mut lines = vec!["ab".to_string(), "abcd".to_string()];
        draw(&mut lines, Layer::Margin, Sides::new(0, 0, 0, 2), 4);
        assert_eq!(lines, vec!["  ab  ", "  abcd"]);
    }

    #[test]
    fn corners_replace_edge_ends() {
        let marks = EdgeMarks::layer_default(Layer::Border);
        let mut lines = vec!["ab".to_string()];
        BoxLayer {
            layer: Layer::Border,
            sides: Sides::all(1),
            marks: &marks,
            corner: Some("+"),
            width: 2,
            legend: None,
        }
        .apply(&mut lines);
        assert_eq!(lines, vec!["+--+", "|ab|", "+--+"]);
    }

    #[test]
    fn legend_is_stamped_into_top_border_only() {
        let marks = EdgeMarks::layer_default(Layer::Border);
        let mut lines = vec!["content".to_string()];
        BoxLayer {
            layer: Layer::Border,
            sides: Sides::all(1),
            marks: &marks,
            corner: None,
            width: 7,
            legend: Some("div"),
        }
        .apply(&mut lines);
        assert_eq!(lines[0], "--div----");
        assert_eq!(lines[2], "---------");
    }

    #[test]
    fn legend_is_ignored_outside_borders() {
        let marks = EdgeMarks::layer_default(Layer::Margin);
        let mut lines = vec!["x".to_string()];
        BoxLayer {
            layer: Layer::Margin,
            sides: Sides::new(1, 0, 0, 0),
            marks: &marks,
            corner: Some("+"),
            width: 3,
            legend: Some("label"),
        }
        .apply(&mut lines);
        assert_eq!(lines, vec!["   ", "x  "]);
    }

    #[test]
    fn stamp_legend_truncates_long_labels() {
        assert_eq!(stamp_legend("------", "fieldset"), "--fie-");
        assert_eq!(stamp_legend("+----+", "Info"), "+-Inf+");
        assert_eq!(stamp_legend("---", "x"), "---");
        assert_eq!(stamp_legend("------", ""), "------");
    }

    #[test]
    fn default_marks_follow_the_layer() {
        let marks = Marks::default();
        assert_eq!(marks.edges(Layer::Border), &EdgeMarks::new("-", "|"));
        assert_eq!(marks.edges(Layer::Padding).left, " ");
        assert_eq!(marks.edges(Layer::Margin).top, " ");
    }

    #[test]
    fn custom_marks_draw_every_edge() {
        let marks = EdgeMarks {
            top: "=".to_string(),
            ..EdgeMarks::new("~", "!")
        };
        let mut lines = vec!["ab".to_string()];
        BoxLayer {
            layer: Layer::Border,
            sides: Sides::all(1),
            marks: &marks,
            corner: None,
            width: 2,
            legend: None,
        }
        .apply(&mut lines);
        assert_eq!(lines, vec!["====", "!ab!", "~~~~"]);
    }
}
