//! Table coordination: row/column bookkeeping and column-width negotiation.
//!
//! A table renders its subtree twice. During the measuring pass every cell
//! reports its content width into the column registry; during the aligning
//! pass cells pad themselves to the registered width and rows zip their
//! cells side by side.

use std::collections::BTreeMap;

use crate::text::{display_width, pad_right};

/// Index of a table in the [`TableRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

/// Where a table is in its two-pass render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TablePhase {
    /// Cells report their widths.
    #[default]
    Measuring,
    /// Cells read the finalized column widths.
    Aligning,
    /// Both passes finished.
    Done,
}

/// Shared state of one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    rows: Vec<usize>,
    column_widths: BTreeMap<usize, usize>,
    generation: u32,
    phase: TablePhase,
}

impl TableState {
    /// Register a new row, returning its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(0);
        self.rows.len() - 1
    }

    /// Register a new cell in `row`, returning its column index.
    pub fn add_column(&mut self, row: usize) -> Option<usize> {
        let columns = self.rows.get_mut(row)?;
        *columns += 1;
        Some(*columns - 1)
    }

    /// Raise the width of `column` to at least `width`. Only takes effect
    /// while measuring.
    pub fn report_width(&mut self, column: usize, width: usize) {
        if self.phase != TablePhase::Measuring {
            log::trace!("ignoring width {width} for column {column} outside the measuring pass");
            return;
        }
        let current = self.column_widths.entry(column).or_insert(0);
        *current = (*current).max(width);
    }

    /// Registered width of `column`, zero when nothing was reported.
    #[must_use]
    pub fn column_width(&self, column: usize) -> usize {
        self.column_widths.get(&column).copied().unwrap_or(0)
    }

    /// Registered widths ordered by column.
    #[must_use]
    pub fn column_widths(&self) -> Vec<usize> {
        let columns = self.column_widths.keys().next_back().map_or(0, |last| last + 1);
        (0..columns).map(|column| self.column_width(column)).collect()
    }

    /// Cell count of every row.
    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Current pass number, incremented at the start of every pass.
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> TablePhase {
        self.phase
    }

    /// Start a new pass.
    pub fn begin_pass(&mut self, phase: TablePhase) {
        self.generation += 1;
        self.phase = phase;
        log::debug!("table pass {} ({phase:?})", self.generation);
        if phase == TablePhase::Aligning {
            log::debug!("column widths finalized: {:?}", self.column_widths());
        }
    }

    /// Mark both passes finished.
    pub fn finish(&mut self) {
        self.phase = TablePhase::Done;
        let mut counts = self.rows.iter().copied();
        if let Some(first) = counts.next() {
            if counts.any(|count| count != first) {
                log::debug!("ragged table rows: {:?}", self.rows);
            }
        }
    }
}

/// All tables seen by one render.
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    tables: Vec<TableState>,
}

impl TableRegistry {
    /// Allocate state for a new table.
    pub fn create(&mut self) -> TableId {
        self.tables.push(TableState::default());
        TableId(self.tables.len() - 1)
    }

    /// State of a table.
    #[must_use]
    pub fn get(&self, id: TableId) -> Option<&TableState> {
        self.tables.get(id.0)
    }

    /// Mutable state of a table.
    pub fn get_mut(&mut self, id: TableId) -> Option<&mut TableState> {
        self.tables.get_mut(id.0)
    }

    /// Registered width of a column, zero for unknown tables.
    #[must_use]
    pub fn column_width(&self, id: TableId, column: usize) -> usize {
        self.get(id).map_or(0, |table| table.column_width(column))
    }
}

/// Position of a cell and the last pass it reported its width in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLink {
    /// Owning table.
    pub table: TableId,
    /// Row index inside the table.
    pub row: usize,
    /// Column index inside the row.
    pub column: usize,
    /// Generation of the last width report.
    pub reported: Option<u32>,
}

impl CellLink {
    /// Report `width` for this cell's column unless it already did so in the
    /// table's current pass.
    pub fn report(&mut self, tables: &mut TableRegistry, width: usize) {
        let Some(table) = tables.get_mut(self.table) else { return };
        if self.reported == Some(table.generation()) {
            return;
        }
        table.report_width(self.column, width);
        self.reported = Some(table.generation());
    }
}

/// Lay rendered cells side by side.
///
/// Line `i` of every cell ends up on line `i` of the row. A cell shorter than
/// its neighbours is filled with blank lines of its own width. When a cell's
/// first character matches the character the row currently ends with, the
/// cell drops its first column on every line so shared borders are drawn once.
#[must_use]
pub fn zip_cells<S: AsRef<str>>(cells: &[S]) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut row_width = 0;

    for cell in cells {
        let segments: Vec<&str> = cell.as_ref().split('\n').collect();
        let cell_width = segments.iter().map(|s| display_width(s)).max().unwrap_or(0);

        let merge = match (lines.first(), segments.first()) {
            (Some(line), Some(segment)) => line.chars().last().is_some_and(|end| segment.starts_with(end)),
            _ => false,
        };

        if lines.len() < segments.len() {
            lines.resize(segments.len(), String::new());
        }

        for (i, line) in lines.iter_mut().enumerate() {
            let segment = segments
                .get(i)
                .map_or_else(|| " ".repeat(cell_width), |s| pad_right(s, cell_width));
            *line = pad_right(line, row_width);
            if merge {
                let mut rest = segment.chars();
                rest.next();
                line.push_str(rest.as_str());
            } else {
                line.push_str(&segment);
            }
        }

        row_width = lines.iter().map(|l| display_width(l)).max().unwrap_or(0);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_count_their_columns() {
        let mut table = TableState::default();
        let first = table.add_row();
        let second = table.add_row();
        assert_eq!((first, second), (0, 1));
        assert_eq!(table.add_column(first), Some(0));
        assert_eq!(table.add_column(first), Some(1));
        assert_eq!(table.add_column(second), Some(0));
        assert_eq!(table.add_column(5), None);
        assert_eq!(table.rows(), &[2, 1]);
    }

    #[test]
    fn widths_only_grow_while_measuring() {
        let mut table = TableState::default();
        table.begin_pass(TablePhase::Measuring);
        table.report_width(0, 3);
        table.report_width(0, 1);
        table.report_width(1, 2);
        assert_eq!(table.column_widths(), vec![3, 2]);

        table.begin_pass(TablePhase::Aligning);
        table.report_width(0, 9);
        assert_eq!(table.column_width(0), 3);
        assert_eq!(table.column_width(7), 0);
    }

    #[test]
    fn cells_report_once_per_generation() {
        let mut tables = TableRegistry::default();
        let id = tables.create();
        tables.get_mut(id).unwrap().begin_pass(TablePhase::Measuring);

        let mut cell = CellLink {
            table: id,
            row: 0,
            column: 0,
            reported: None,
        };
        cell.report(&mut tables, 2);
        cell.report(&mut tables, 5);
        assert_eq!(tables.column_width(id, 0), 2);
        assert_eq!(cell.reported, Some(1));

        tables.get_mut(id).unwrap().begin_pass(TablePhase::Measuring);
        cell.report(&mut tables, 5);
        assert_eq!(tables.column_width(id, 0), 5);
        assert_eq!(cell.reported, Some(2));
    }

    #[test]
    fn zip_merges_shared_padding() {
        let lines = zip_cells(&[" a   ", " bb "]);
        assert_eq!(lines, vec![" a   bb "]);
    }

    #[test]
    fn zip_merges_shared_borders() {
        let lines = zip_cells(&["+---+\n| a |\n+---+", "+--+\n|bb|\n+--+"]);
        assert_eq!(lines, vec!["+---+--+", "| a |bb|", "+---+--+"]);
    }

    #[test]
    fn zip_keeps_distinct_boundaries() {
        let lines = zip_cells(&["[a]", "(b)"]);
        assert_eq!(lines, vec!["[a](b)"]);
    }

    #[test]
    fn zip_fills_short_cells() {
        let lines = zip_cells(&["ab\ncd\nef", "x"]);
        assert_eq!(lines, vec!["abx", "cd ", "ef "]);

        let lines = zip_cells(&["x", "ab\ncd"]);
        assert_eq!(lines, vec!["xab", " cd"]);
    }

    #[test]
    fn zip_of_nothing_is_empty() {
        let lines = zip_cells::<&str>(&[]);
        assert!(lines.is_empty());
    }
}
