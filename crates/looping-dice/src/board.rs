//! Board model: a fixed-dimension grid of cells with wrapping line queries.
//!
//! Every index goes through `rem_euclid`, so callers may pass offsets that
//! run past either end of the board (bandaged run discovery walks below
//! zero, wide moves walk past the last line).

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cell::{Cell, Direction, Marker};
use crate::error::ConfigError;

/// Boards up to 6x6 are stored inline
pub type Cells = SmallVec<[Cell; 36]>;

/// Axis a move slides along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    pub fn other(self) -> Axis {
        match self {
            Axis::Row => Axis::Column,
            Axis::Column => Axis::Row,
        }
    }

    /// Marker that forbids cells from travelling along this axis
    pub fn locking_marker(self) -> Marker {
        match self {
            Axis::Row => Marker::Vertical,
            Axis::Column => Marker::Horizontal,
        }
    }

    /// Bond on a line that points at the next line (higher index)
    pub fn bond_toward_next(self) -> Direction {
        match self {
            Axis::Row => Direction::Down,
            Axis::Column => Direction::Right,
        }
    }

    /// Bond on a line that points at the previous line (lower index)
    pub fn bond_toward_prev(self) -> Direction {
        match self {
            Axis::Row => Direction::Up,
            Axis::Column => Direction::Left,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Axis::Row => 'R',
            Axis::Column => 'C',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "Row"),
            Axis::Column => write!(f, "Column"),
        }
    }
}

/// An R x C grid of cells, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Cells,
}

impl Board {
    pub fn new(
        rows: usize,
        cols: usize,
        cells: impl IntoIterator<Item = Cell>,
    ) -> Result<Self, ConfigError> {
        let cells: Cells = cells.into_iter().collect();
        if rows == 0 || cols == 0 || cells.len() != rows * cols {
            return Err(ConfigError::MalformedBoard);
        }
        Ok(Self { rows, cols, cells })
    }

    /// Build a board from a row-major nested literal
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, ConfigError> {
        let cols = rows.first().map_or(0, |r| r.len());
        if rows.iter().any(|r| r.len() != cols) {
            return Err(ConfigError::MalformedBoard);
        }
        let num_rows = rows.len();
        Self::new(num_rows, cols, rows.into_iter().flatten())
    }

    /// Build a board from legacy packed integers
    pub fn from_bits(rows: &[&[i32]]) -> Result<Self, ConfigError> {
        Self::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|&raw| Cell::from_bits(raw)).collect())
                .collect(),
        )
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of lines that move along `axis` (rows for Row, columns for Column)
    pub fn line_count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.rows,
            Axis::Column => self.cols,
        }
    }

    /// Number of cells in one line of `axis`
    pub fn line_len(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.cols,
            Axis::Column => self.rows,
        }
    }

    /// Normalize a possibly out-of-range line offset into `[0, line_count)`
    pub fn wrap_line(&self, axis: Axis, offset: isize) -> usize {
        offset.rem_euclid(self.line_count(axis) as isize) as usize
    }

    fn index(&self, row: isize, col: isize) -> usize {
        let row = row.rem_euclid(self.rows as isize) as usize;
        let col = col.rem_euclid(self.cols as isize) as usize;
        row * self.cols + col
    }

    fn line_index(&self, axis: Axis, line: isize, pos: isize) -> usize {
        match axis {
            Axis::Row => self.index(line, pos),
            Axis::Column => self.index(pos, line),
        }
    }

    /// Cell at (row, col), both wrapping
    pub fn cell(&self, row: isize, col: isize) -> Cell {
        self.cells[self.index(row, col)]
    }

    /// Cell at position `pos` of line `line` along `axis`, both wrapping
    pub fn line_cell(&self, axis: Axis, line: isize, pos: isize) -> Cell {
        self.cells[self.line_index(axis, line, pos)]
    }

    pub(crate) fn set_line_cell(&mut self, axis: Axis, line: isize, pos: isize, cell: Cell) {
        let idx = self.line_index(axis, line, pos);
        self.cells[idx] = cell;
    }

    /// Cells of a line in position order
    pub fn line(&self, axis: Axis, offset: isize) -> impl Iterator<Item = Cell> + '_ {
        let len = self.line_len(axis) as isize;
        (0..len).map(move |pos| self.line_cell(axis, offset, pos))
    }

    fn line_any(&self, axis: Axis, offset: isize, pred: impl Fn(&Cell) -> bool) -> bool {
        self.line(axis, offset).any(|c| pred(&c))
    }

    pub fn line_contains_enabler(&self, axis: Axis, offset: isize) -> bool {
        self.line_any(axis, offset, |c| c.has_marker(Marker::Enabler))
    }

    pub fn line_contains_fixed_cell(&self, axis: Axis, offset: isize) -> bool {
        self.line_any(axis, offset, Cell::is_fixed)
    }

    pub fn line_contains_lightning(&self, axis: Axis, offset: isize) -> bool {
        self.line_any(axis, offset, |c| c.has_marker(Marker::Lightning))
    }

    pub fn line_contains_bond(&self, axis: Axis, offset: isize, direction: Direction) -> bool {
        self.line_any(axis, offset, |c| c.has_bond(direction))
    }

    /// True if some cell in the line may not travel along `axis`.
    ///
    /// This is the test for both ARROWS validation and AXIS mode: a
    /// vertical-only cell locks its row, a horizontal-only cell locks its
    /// column.
    pub fn line_contains_axis_locked_cell(&self, axis: Axis, offset: isize) -> bool {
        let marker = axis.locking_marker();
        self.line_any(axis, offset, |c| c.has_marker(marker))
    }

    /// Position a slide in `forward` direction wraps around from
    pub fn leading_edge(&self, axis: Axis, forward: bool) -> isize {
        if forward {
            self.line_len(axis) as isize - 1
        } else {
            0
        }
    }

    /// True if the cell about to wrap around the board is fixed
    pub fn line_leading_edge_fixed(&self, axis: Axis, offset: isize, forward: bool) -> bool {
        self.line_cell(axis, offset, self.leading_edge(axis, forward)).is_fixed()
    }

    /// Rotate one line by a single cell, in place.
    ///
    /// Forward moves every cell toward the higher position and wraps the last
    /// cell to position 0.
    pub(crate) fn slide(&mut self, axis: Axis, offset: isize, forward: bool) {
        let len = self.line_len(axis) as isize;
        if forward {
            let wrapped = self.line_cell(axis, offset, len - 1);
            for pos in (1..len).rev() {
                let prev = self.line_cell(axis, offset, pos - 1);
                self.set_line_cell(axis, offset, pos, prev);
            }
            self.set_line_cell(axis, offset, 0, wrapped);
        } else {
            let wrapped = self.line_cell(axis, offset, 0);
            for pos in 0..len - 1 {
                let next = self.line_cell(axis, offset, pos + 1);
                self.set_line_cell(axis, offset, pos, next);
            }
            self.set_line_cell(axis, offset, len - 1, wrapped);
        }
    }

    /// True if both boards hold the same multiset of cells
    pub fn same_cells(&self, other: &Board) -> bool {
        let mut ours = self.cells.to_vec();
        let mut theirs = other.cells.to_vec();
        ours.sort_unstable();
        theirs.sort_unstable();
        ours == theirs
    }

    /// Number of positions whose cells differ
    pub fn diff(&self, other: &Board) -> usize {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .filter(|(a, b)| a != b)
            .count()
            + self.cells.len().abs_diff(other.cells.len())
    }

    /// Polynomial hash over the row-major cell sequence
    pub fn poly_hash(&self) -> u64 {
        self.cells.iter().fold(0u64, |h, cell| {
            h.wrapping_mul(31).wrapping_add(cell.bits() as u32 as u64)
        })
    }

    /// Row-major nested copy of the cells
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.cols).map(|r| r.to_vec()).collect()
    }
}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.poly_hash());
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.cols).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(Cell::to_string).collect();
            write!(f, "{}", line.join(","))?;
        }
        Ok(())
    }
}
