//! Move engine: pure simulation of every movement mode.
//!
//! All move functions take a board by reference and return a new board.
//! An illegal move is not an error: it returns an unchanged copy of the
//! input, because the search tries every candidate move at every state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Axis, Board};
use crate::error::ConfigError;
use crate::puzzle::{Mode, Rules, Validation};
use crate::validation::{
    carousel_lines, validate_carousel, validate_gear, validate_lightning, validate_wide,
};

/// A single move: slide line `index` of `axis` forward or backward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Move {
    pub axis: Axis,
    pub index: usize,
    pub forward: bool,
}

impl Move {
    pub fn new(axis: Axis, index: usize, forward: bool) -> Self {
        Self {
            axis,
            index,
            forward,
        }
    }

    pub fn row(index: usize, forward: bool) -> Self {
        Self::new(Axis::Row, index, forward)
    }

    pub fn col(index: usize, forward: bool) -> Self {
        Self::new(Axis::Column, index, forward)
    }

    /// The move that undoes this one
    pub fn inverse(self) -> Self {
        Self {
            forward: !self.forward,
            ..self
        }
    }

    /// Every candidate move on a board: rows first, each forward then backward
    pub fn all(rows: usize, cols: usize) -> impl Iterator<Item = Move> {
        let row_moves = (0..rows).flat_map(|r| [Move::row(r, true), Move::row(r, false)]);
        let col_moves = (0..cols).flat_map(|c| [Move::col(c, true), Move::col(c, false)]);
        row_moves.chain(col_moves)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.axis.letter(), self.index)?;
        if !self.forward {
            write!(f, "'")?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ConfigError;

    /// Parse `R2`, `C1'` and friends
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidMove(s.to_string());
        let s = s.trim();
        let (body, forward) = match s.strip_suffix('\'') {
            Some(body) => (body, false),
            None => (s, true),
        };
        let axis = match body.chars().next() {
            Some('R') | Some('r') => Axis::Row,
            Some('C') | Some('c') => Axis::Column,
            _ => return Err(invalid()),
        };
        let index = body[1..].parse().map_err(|_| invalid())?;
        Ok(Move::new(axis, index, forward))
    }
}

impl TryFrom<String> for Move {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Move> for String {
    fn from(mv: Move) -> String {
        mv.to_string()
    }
}

/// Render a path as comma-separated moves
pub fn format_path(path: &[Move]) -> String {
    path.iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a comma-separated path
pub fn parse_path(s: &str) -> Result<Vec<Move>, ConfigError> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

/// Slide `depth` adjacent lines starting at `offset`
pub fn wide_move(
    board: &Board,
    axis: Axis,
    offset: isize,
    forward: bool,
    validation: Validation,
    depth: usize,
) -> Board {
    let mut next = board.clone();
    if !validate_wide(board, axis, offset, forward, validation, depth) {
        return next;
    }
    for i in 0..depth as isize {
        next.slide(axis, offset + i, forward);
    }
    next
}

/// Slide the pivot line and counter-slide its neighbour
pub fn gear_move(
    board: &Board,
    axis: Axis,
    offset: isize,
    forward: bool,
    validation: Validation,
) -> Board {
    let mut next = board.clone();
    if !validate_gear(board, axis, offset, forward, validation) {
        return next;
    }
    next.slide(axis, offset, forward);
    next.slide(axis, offset + 1, !forward);
    next
}

/// Rotate two adjacent lines around the seam between them
pub fn carousel_move(
    board: &Board,
    axis: Axis,
    offset: isize,
    forward: bool,
    validation: Validation,
) -> Board {
    let mut next = board.clone();
    if !validate_carousel(board, axis, offset, forward, validation) {
        return next;
    }

    let (fwd_line, bwd_line) = carousel_lines(board, axis, offset, forward);
    let last = board.line_len(axis) as isize - 1;
    let fwd_end = board.line_cell(axis, fwd_line, last);
    let bwd_start = board.line_cell(axis, bwd_line, 0);

    next.slide(axis, fwd_line, true);
    next.set_line_cell(axis, fwd_line, 0, bwd_start);
    next.slide(axis, bwd_line, false);
    next.set_line_cell(axis, bwd_line, last, fwd_end);
    next
}

/// Find the bonded run containing `offset`, as (start line, depth).
///
/// Sweeps toward lower lines while the previous line is bonded toward us,
/// then toward higher lines while the next line is bonded back. Depth
/// never reaches the line count, so an all-bonded board still terminates.
pub fn bandaged_run(board: &Board, axis: Axis, offset: isize) -> (isize, usize) {
    let count = board.line_count(axis);
    let mut start = offset;
    let mut depth = 1;

    while depth < count && board.line_contains_bond(axis, start - 1, axis.bond_toward_next()) {
        depth += 1;
        start -= 1;
    }
    while depth < count
        && board.line_contains_bond(axis, start + depth as isize, axis.bond_toward_prev())
    {
        depth += 1;
    }

    (board.wrap_line(axis, start) as isize, depth)
}

/// Slide the whole bonded run containing `offset`
pub fn bandaged_move(
    board: &Board,
    axis: Axis,
    offset: isize,
    forward: bool,
    validation: Validation,
) -> Board {
    let (start, depth) = bandaged_run(board, axis, offset);
    wide_move(board, axis, start, forward, validation, depth)
}

/// Slide once, and once more if the line holds a lightning cell
pub fn lightning_move(
    board: &Board,
    axis: Axis,
    offset: isize,
    forward: bool,
    validation: Validation,
) -> Board {
    let mut next = board.clone();
    if !validate_lightning(board, axis, offset, forward, validation) {
        return next;
    }
    next.slide(axis, offset, forward);
    if next.line_contains_lightning(axis, offset) {
        next.slide(axis, offset, forward);
    }
    next
}

/// Slide only lines holding an enabler
pub fn enabler_move(board: &Board, axis: Axis, offset: isize, forward: bool) -> Board {
    let mut next = board.clone();
    if board.line_contains_enabler(axis, offset) {
        next.slide(axis, offset, forward);
    }
    next
}

/// Wide move that always refuses lines holding a fixed cell
pub fn static_move(
    board: &Board,
    axis: Axis,
    offset: isize,
    forward: bool,
    validation: Validation,
    depth: usize,
) -> Board {
    wide_move(board, axis, offset, forward, validation | Validation::STATIC, depth)
}

/// Slide only lines with no cell locked against this axis
pub fn axis_locked_move(board: &Board, axis: Axis, offset: isize, forward: bool) -> Board {
    let mut next = board.clone();
    if !board.line_contains_axis_locked_cell(axis, offset) {
        next.slide(axis, offset, forward);
    }
    next
}

/// Apply `mv` under the mode configured for its axis
pub fn apply(board: &Board, mv: Move, rules: &Rules) -> Board {
    let Move {
        axis,
        index,
        forward,
    } = mv;
    let offset = index as isize;
    let validation = rules.validation;

    match rules.mode(axis) {
        Mode::Wide(k) => wide_move(board, axis, offset, forward, validation, k as usize),
        Mode::Gear => gear_move(board, axis, offset, forward, validation),
        Mode::Carousel => carousel_move(board, axis, offset, forward, validation),
        Mode::Bandaged => bandaged_move(board, axis, offset, forward, validation),
        Mode::Lightning => lightning_move(board, axis, offset, forward, validation),
        Mode::Enabler => enabler_move(board, axis, offset, forward),
        Mode::Static(k) => static_move(board, axis, offset, forward, validation, k as usize),
        Mode::AxisLocked => axis_locked_move(board, axis, offset, forward),
    }
}

/// Apply a sequence of moves
pub fn replay(board: &Board, path: &[Move], rules: &Rules) -> Board {
    path.iter().fold(board.clone(), |b, &mv| apply(&b, mv, rules))
}

/// All `2 * (rows + cols)` candidate successors of a board
pub fn neighbors<'a>(
    board: &'a Board,
    rules: &'a Rules,
) -> impl Iterator<Item = (Move, Board)> + 'a {
    Move::all(board.rows(), board.cols()).map(move |mv| (mv, apply(board, mv, rules)))
}
