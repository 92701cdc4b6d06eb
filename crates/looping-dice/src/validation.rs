//! Legality checks for moves.
//!
//! Each validator answers "may this move happen?" for one mode family.
//! Every predicate active in the `Validation` mask can veto the move; a
//! vetoed move is simulated as a no-op by the caller.

use crate::board::{Axis, Board};
use crate::puzzle::Validation;

/// Check a move sliding `depth` adjacent lines starting at `offset`
pub fn validate_wide(
    board: &Board,
    axis: Axis,
    offset: isize,
    forward: bool,
    validation: Validation,
    depth: usize,
) -> bool {
    let lines = || (0..depth as isize).map(move |i| offset + i);

    if validation.contains(Validation::STATIC)
        && lines().any(|line| board.line_contains_fixed_cell(axis, line))
    {
        return false;
    }
    if validation.contains(Validation::ENABLER)
        && !lines().any(|line| board.line_contains_enabler(axis, line))
    {
        return false;
    }
    if validation.contains(Validation::DYNAMIC)
        && lines().any(|line| board.line_leading_edge_fixed(axis, line, forward))
    {
        return false;
    }
    if validation.contains(Validation::ARROWS)
        && lines().any(|line| board.line_contains_axis_locked_cell(axis, line))
    {
        return false;
    }
    true
}

/// Check a gear move: `offset` slides `forward`, `offset + 1` slides back
pub fn validate_gear(
    board: &Board,
    axis: Axis,
    offset: isize,
    forward: bool,
    validation: Validation,
) -> bool {
    let next = offset + 1;

    if validation.contains(Validation::STATIC)
        && (board.line_contains_fixed_cell(axis, offset)
            || board.line_contains_fixed_cell(axis, next))
    {
        return false;
    }
    if validation.contains(Validation::DYNAMIC)
        && (board.line_leading_edge_fixed(axis, offset, forward)
            || board.line_leading_edge_fixed(axis, next, !forward))
    {
        return false;
    }
    if validation.contains(Validation::ARROWS)
        && (board.line_contains_axis_locked_cell(axis, offset)
            || board.line_contains_axis_locked_cell(axis, next))
    {
        return false;
    }
    if validation.contains(Validation::ENABLER)
        && !board.line_contains_enabler(axis, offset)
        && !board.line_contains_enabler(axis, next)
    {
        return false;
    }
    true
}

/// The two lines taking part in a carousel move, as (forward, backward).
///
/// The forward line shifts toward higher positions and hands its last cell
/// to the backward line; the backward line shifts toward lower positions
/// and hands its first cell to the forward line.
pub fn carousel_lines(board: &Board, axis: Axis, offset: isize, forward: bool) -> (isize, isize) {
    let here = board.wrap_line(axis, offset) as isize;
    let next = board.wrap_line(axis, offset + 1) as isize;
    if forward {
        (here, next)
    } else {
        (next, here)
    }
}

/// Check a carousel move around the seam between `offset` and `offset + 1`
pub fn validate_carousel(
    board: &Board,
    axis: Axis,
    offset: isize,
    forward: bool,
    validation: Validation,
) -> bool {
    let next = offset + 1;

    if validation.contains(Validation::STATIC)
        && (board.line_contains_fixed_cell(axis, offset)
            || board.line_contains_fixed_cell(axis, next))
    {
        return false;
    }

    // Fixed cells may only be blocked at the seam that wraps around the board.
    if validation.contains(Validation::DYNAMIC)
        && board.wrap_line(axis, offset) == board.line_count(axis) - 1
    {
        let last_row = board.rows() as isize - 1;
        let last_col = board.cols() as isize - 1;
        let corners = if forward {
            [(0, 0), (last_row, last_col)]
        } else {
            [(0, last_col), (last_row, 0)]
        };
        if corners.iter().any(|&(r, c)| board.cell(r, c).is_fixed()) {
            return false;
        }
    }

    if validation.contains(Validation::ARROWS) {
        let (fwd_line, bwd_line) = carousel_lines(board, axis, offset, forward);
        let last = board.line_len(axis) as isize - 1;
        let across = axis.other().locking_marker();
        let along = axis.locking_marker();

        // The two seam cells change lines; the rest travel along their line.
        if board.line_cell(axis, bwd_line, 0).has_marker(across)
            || board.line_cell(axis, fwd_line, last).has_marker(across)
        {
            return false;
        }
        if (0..last).any(|pos| board.line_cell(axis, fwd_line, pos).has_marker(along))
            || (1..=last).any(|pos| board.line_cell(axis, bwd_line, pos).has_marker(along))
        {
            return false;
        }
    }

    if validation.contains(Validation::ENABLER)
        && !board.line_contains_enabler(axis, offset)
        && !board.line_contains_enabler(axis, next)
    {
        return false;
    }
    true
}

/// Check a lightning move, which may slide the line by two cells
pub fn validate_lightning(
    board: &Board,
    axis: Axis,
    offset: isize,
    forward: bool,
    validation: Validation,
) -> bool {
    if validation.contains(Validation::STATIC) && board.line_contains_fixed_cell(axis, offset) {
        return false;
    }
    if validation.contains(Validation::DYNAMIC) {
        let edge = board.leading_edge(axis, forward);
        let behind_edge = if forward { edge - 1 } else { edge + 1 };
        let double_step =
            board.line_len(axis) > 1 && board.line_contains_lightning(axis, offset);
        if board.line_cell(axis, offset, edge).is_fixed()
            || (double_step && board.line_cell(axis, offset, behind_edge).is_fixed())
        {
            return false;
        }
    }
    if validation.contains(Validation::ARROWS) && board.line_contains_axis_locked_cell(axis, offset)
    {
        return false;
    }
    if validation.contains(Validation::ENABLER) && !board.line_contains_enabler(axis, offset) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, Marker};

    fn fixed(value: i32) -> Cell {
        Cell::new(value).with_marker(Marker::Fixed)
    }

    // F 0,   1,   H 2
    // V 3,   4,   5
    //   6, E 7,   8
    fn mixed() -> Board {
        Board::from_rows(vec![
            vec![fixed(0), Cell::new(1), Cell::new(2).with_marker(Marker::Horizontal)],
            vec![Cell::new(3).with_marker(Marker::Vertical), Cell::new(4), Cell::new(5)],
            vec![Cell::new(6), Cell::new(7).with_marker(Marker::Enabler), Cell::new(8)],
        ])
        .unwrap()
    }

    #[test]
    fn test_wide_validations_compose() {
        // F 0, 1, 2
        // 3,   4, E 5
        let board = Board::from_rows(vec![
            vec![fixed(0), Cell::new(1), Cell::new(2)],
            vec![Cell::new(3), Cell::new(4), Cell::new(5).with_marker(Marker::Enabler)],
        ])
        .unwrap();

        assert!(validate_wide(&board, Axis::Row, 0, true, Validation::NONE, 1));
        assert!(!validate_wide(&board, Axis::Row, 0, true, Validation::STATIC, 1));
        assert!(validate_wide(&board, Axis::Row, 1, true, Validation::STATIC, 1));
        assert!(!validate_wide(&board, Axis::Row, 0, true, Validation::ENABLER, 1));

        let both = Validation::STATIC | Validation::ENABLER;
        assert!(validate_wide(&board, Axis::Row, 1, true, both, 1));
        // Two rows wide: the enabler is present but so is the fixed cell.
        assert!(!validate_wide(&board, Axis::Row, 0, true, both, 2));
        assert!(validate_wide(&board, Axis::Row, 0, true, Validation::ENABLER, 2));
    }

    #[test]
    fn test_wide_dynamic_checks_leading_edge() {
        let board = Board::from_rows(vec![
            vec![fixed(1), Cell::new(1), Cell::new(2)],
            vec![Cell::new(3), Cell::new(4), fixed(2)],
        ])
        .unwrap();

        assert!(validate_wide(&board, Axis::Row, 0, true, Validation::DYNAMIC, 1));
        assert!(!validate_wide(&board, Axis::Row, 0, false, Validation::DYNAMIC, 1));
        assert!(!validate_wide(&board, Axis::Row, 1, true, Validation::DYNAMIC, 1));
        assert!(validate_wide(&board, Axis::Column, 0, true, Validation::DYNAMIC, 1));
        assert!(!validate_wide(&board, Axis::Column, 0, false, Validation::DYNAMIC, 1));
        assert!(!validate_wide(&board, Axis::Column, 2, true, Validation::DYNAMIC, 1));
    }

    #[test]
    fn test_wide_arrows_wraps_past_last_line() {
        let board = Board::from_rows(vec![
            vec![
                Cell::new(0).with_marker(Marker::Horizontal),
                Cell::new(1),
                Cell::new(2),
                Cell::new(3),
            ],
            vec![Cell::new(4), Cell::new(5), Cell::new(6), Cell::new(7)],
            vec![
                Cell::new(8),
                Cell::new(9),
                Cell::new(10).with_marker(Marker::Vertical),
                Cell::new(11),
            ],
        ])
        .unwrap();

        assert!(validate_wide(&board, Axis::Row, 0, true, Validation::ARROWS, 2));
        assert!(!validate_wide(&board, Axis::Row, 1, true, Validation::ARROWS, 2));
        assert!(!validate_wide(&board, Axis::Row, 2, true, Validation::ARROWS, 2));
        assert!(validate_wide(&board, Axis::Column, 1, true, Validation::ARROWS, 2));
        assert!(!validate_wide(&board, Axis::Column, 0, true, Validation::ARROWS, 2));
        assert!(!validate_wide(&board, Axis::Column, 3, true, Validation::ARROWS, 2));
    }

    #[test]
    fn test_gear_dynamic_checks_opposite_edges() {
        // Row 1 has a fixed cell at its start; as the gear partner it
        // slides backward, so only the forward pivot direction is blocked.
        let board = Board::from_rows(vec![
            vec![Cell::new(0), Cell::new(1), Cell::new(2)],
            vec![fixed(3), Cell::new(4), Cell::new(5)],
        ])
        .unwrap();

        assert!(!validate_gear(&board, Axis::Row, 0, true, Validation::DYNAMIC));
        assert!(validate_gear(&board, Axis::Row, 0, false, Validation::DYNAMIC));
        assert!(!validate_gear(&board, Axis::Row, 1, false, Validation::DYNAMIC));
    }

    #[test]
    fn test_gear_static_arrows_enabler() {
        let board = mixed();

        let fixed_lines = Validation::STATIC;
        assert!(!validate_gear(&board, Axis::Row, 0, true, fixed_lines));
        assert!(validate_gear(&board, Axis::Row, 1, true, fixed_lines));
        assert!(!validate_gear(&board, Axis::Row, 2, false, fixed_lines));
        assert!(!validate_gear(&board, Axis::Column, 0, true, fixed_lines));
        assert!(validate_gear(&board, Axis::Column, 1, true, fixed_lines));
        assert!(!validate_gear(&board, Axis::Column, 2, true, fixed_lines));

        // The partner line counts too.
        let arrows = Validation::ARROWS;
        assert!(!validate_gear(&board, Axis::Row, 0, true, arrows));
        assert!(!validate_gear(&board, Axis::Row, 1, true, arrows));
        assert!(validate_gear(&board, Axis::Row, 2, true, arrows));
        assert!(validate_gear(&board, Axis::Column, 0, true, arrows));
        assert!(!validate_gear(&board, Axis::Column, 1, true, arrows));
        assert!(!validate_gear(&board, Axis::Column, 2, false, arrows));

        let enabler = Validation::ENABLER;
        assert!(!validate_gear(&board, Axis::Row, 0, true, enabler));
        assert!(validate_gear(&board, Axis::Row, 1, true, enabler));
        assert!(validate_gear(&board, Axis::Row, 2, true, enabler));
        assert!(validate_gear(&board, Axis::Column, 0, true, enabler));
        assert!(!validate_gear(&board, Axis::Column, 2, true, enabler));
    }

    #[test]
    fn test_carousel_static_and_enabler() {
        let board = mixed();

        let fixed_lines = Validation::STATIC;
        assert!(!validate_carousel(&board, Axis::Row, 0, true, fixed_lines));
        assert!(!validate_carousel(&board, Axis::Row, 0, false, fixed_lines));
        assert!(validate_carousel(&board, Axis::Row, 1, true, fixed_lines));
        assert!(!validate_carousel(&board, Axis::Row, 2, true, fixed_lines));
        assert!(validate_carousel(&board, Axis::Column, 1, false, fixed_lines));
        assert!(!validate_carousel(&board, Axis::Column, 2, false, fixed_lines));

        let enabler = Validation::ENABLER;
        assert!(!validate_carousel(&board, Axis::Row, 0, true, enabler));
        assert!(validate_carousel(&board, Axis::Row, 1, true, enabler));
        assert!(validate_carousel(&board, Axis::Row, 2, false, enabler));
        assert!(validate_carousel(&board, Axis::Column, 0, true, enabler));
        assert!(!validate_carousel(&board, Axis::Column, 2, true, enabler));
    }

    #[test]
    fn test_carousel_dynamic_corners() {
        let top_left = Board::from_rows(vec![
            vec![fixed(0), Cell::new(0), Cell::new(1), Cell::new(2)],
            vec![Cell::new(3), Cell::new(4), Cell::new(5), Cell::new(6)],
            vec![Cell::new(7), Cell::new(8), Cell::new(9), Cell::new(10)],
        ])
        .unwrap();
        let bottom_left = Board::from_rows(vec![
            vec![Cell::new(0), Cell::new(1), Cell::new(2), Cell::new(3)],
            vec![Cell::new(4), Cell::new(5), Cell::new(6), Cell::new(7)],
            vec![fixed(0), Cell::new(8), Cell::new(9), Cell::new(10)],
        ])
        .unwrap();

        let dynamic = Validation::DYNAMIC;
        assert!(validate_carousel(&top_left, Axis::Row, 0, true, dynamic));
        assert!(validate_carousel(&top_left, Axis::Row, 2, false, dynamic));
        assert!(!validate_carousel(&top_left, Axis::Row, 2, true, dynamic));
        assert!(!validate_carousel(&top_left, Axis::Column, 3, true, dynamic));
        assert!(validate_carousel(&top_left, Axis::Column, 3, false, dynamic));

        assert!(validate_carousel(&bottom_left, Axis::Row, 2, true, dynamic));
        assert!(!validate_carousel(&bottom_left, Axis::Row, 2, false, dynamic));
        assert!(!validate_carousel(&bottom_left, Axis::Column, 3, false, dynamic));
    }

    #[test]
    fn test_carousel_arrows() {
        let board = Board::from_rows(vec![
            vec![
                Cell::new(0),
                Cell::new(1),
                Cell::new(2),
                Cell::new(3).with_marker(Marker::Horizontal),
            ],
            vec![
                Cell::new(4).with_marker(Marker::Vertical),
                Cell::new(5),
                Cell::new(6),
                Cell::new(7),
            ],
            vec![
                Cell::new(8),
                Cell::new(9),
                Cell::new(10),
                Cell::new(11).with_marker(Marker::Vertical),
            ],
        ])
        .unwrap();

        let arrows = Validation::ARROWS;
        assert!(validate_carousel(&board, Axis::Row, 1, false, arrows));
        assert!(validate_carousel(&board, Axis::Row, 2, true, arrows));
        assert!(!validate_carousel(&board, Axis::Row, 0, true, arrows));
        assert!(!validate_carousel(&board, Axis::Row, 0, false, arrows));
        assert!(validate_carousel(&board, Axis::Column, 2, true, arrows));
        assert!(validate_carousel(&board, Axis::Column, 3, false, arrows));
        assert!(!validate_carousel(&board, Axis::Column, 2, false, arrows));
        assert!(!validate_carousel(&board, Axis::Column, 3, true, arrows));
    }

    #[test]
    fn test_lightning_checks_pivot_line_only() {
        let board = mixed();

        let fixed_lines = Validation::STATIC;
        assert!(!validate_lightning(&board, Axis::Row, 0, true, fixed_lines));
        assert!(validate_lightning(&board, Axis::Row, 1, true, fixed_lines));
        assert!(!validate_lightning(&board, Axis::Column, 0, false, fixed_lines));
        assert!(validate_lightning(&board, Axis::Column, 1, false, fixed_lines));

        let arrows = Validation::ARROWS;
        assert!(validate_lightning(&board, Axis::Row, 0, true, arrows));
        assert!(!validate_lightning(&board, Axis::Row, 1, true, arrows));
        assert!(validate_lightning(&board, Axis::Column, 0, true, arrows));
        assert!(!validate_lightning(&board, Axis::Column, 2, true, arrows));

        let enabler = Validation::ENABLER;
        assert!(!validate_lightning(&board, Axis::Row, 0, true, enabler));
        assert!(validate_lightning(&board, Axis::Row, 2, true, enabler));
        assert!(!validate_lightning(&board, Axis::Column, 0, true, enabler));
        assert!(validate_lightning(&board, Axis::Column, 1, true, enabler));
    }

    #[test]
    fn test_lightning_dynamic_looks_one_cell_further() {
        let with_bolt = Board::from_rows(vec![vec![
            Cell::new(1),
            Cell::new(2).with_marker(Marker::Lightning),
            fixed(3),
            Cell::new(4),
        ]])
        .unwrap();
        let without_bolt = Board::from_rows(vec![vec![
            Cell::new(1),
            Cell::new(2),
            fixed(3),
            Cell::new(4),
        ]])
        .unwrap();

        let dynamic = Validation::DYNAMIC;
        // A double step forward would push the fixed cell over the edge.
        assert!(!validate_lightning(&with_bolt, Axis::Row, 0, true, dynamic));
        assert!(validate_lightning(&with_bolt, Axis::Row, 0, false, dynamic));
        // A single step only looks at the edge itself.
        assert!(validate_lightning(&without_bolt, Axis::Row, 0, true, dynamic));
    }

    #[test]
    fn test_lightning_dynamic_edges() {
        let board = Board::from_rows(vec![
            vec![Cell::new(0), fixed(1), Cell::new(2), Cell::new(3), Cell::new(4)],
            vec![
                fixed(5),
                Cell::new(6).with_marker(Marker::Lightning),
                Cell::new(7),
                Cell::new(8),
                fixed(9),
            ],
            vec![
                Cell::new(10),
                Cell::new(11),
                Cell::new(12),
                Cell::new(13).with_marker(Marker::Lightning),
                Cell::new(14),
            ],
            vec![Cell::new(15), fixed(16), Cell::new(17), Cell::new(18), Cell::new(19)],
        ])
        .unwrap();

        let dynamic = Validation::DYNAMIC;
        assert!(validate_lightning(&board, Axis::Row, 0, true, dynamic));
        assert!(validate_lightning(&board, Axis::Row, 0, false, dynamic));
        assert!(!validate_lightning(&board, Axis::Row, 1, true, dynamic));
        assert!(!validate_lightning(&board, Axis::Row, 1, false, dynamic));
        assert!(validate_lightning(&board, Axis::Column, 3, true, dynamic));
        assert!(!validate_lightning(&board, Axis::Column, 1, true, dynamic));
    }
}
