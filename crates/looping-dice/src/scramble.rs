//! Random scrambling of a board.
//!
//! Moves are drawn uniformly from all `2 * (rows + cols)` candidates and
//! applied under the puzzle's rules; vetoed moves leave the board as is.

use log::debug;
use rand::Rng;

use crate::board::Board;
use crate::moves::{apply, Move};
use crate::puzzle::Rules;

/// Draw one candidate move uniformly at random
pub fn random_move<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Move {
    let pick = rng.gen_range(0..2 * (rows + cols));
    let forward = pick % 2 == 0;
    let line = pick / 2;
    if line < rows {
        Move::row(line, forward)
    } else {
        Move::col(line - rows, forward)
    }
}

/// Apply `moves` random moves to `board`
pub fn scramble<R: Rng + ?Sized>(board: &Board, rules: &Rules, moves: usize, rng: &mut R) -> Board {
    let mut current = board.clone();
    let mut vetoed = 0;
    for _ in 0..moves {
        let mv = random_move(board.rows(), board.cols(), rng);
        let next = apply(&current, mv, rules);
        if next == current {
            vetoed += 1;
        }
        current = next;
    }
    debug!("scrambled with {} moves, {} left the board unchanged", moves, vetoed);
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::board::Axis;
    use crate::puzzle::Mode;

    const UP: i32 = 1 << 9;
    const DOWN: i32 = 1 << 10;
    const LEFT: i32 = 1 << 11;
    const RIGHT: i32 = 1 << 12;

    fn bandaged_board() -> Board {
        Board::from_bits(&[
            &[1 | RIGHT, 1 | LEFT, 2, 2],
            &[1, 1, 2, 2],
            &[1, 1, 1, 1 | DOWN],
            &[1, 1, 1, 1 | UP],
        ])
        .unwrap()
    }

    #[test]
    fn test_random_move_covers_every_line() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut drawn = HashSet::new();
        for _ in 0..500 {
            let mv = random_move(2, 3, &mut rng);
            match mv.axis {
                Axis::Row => assert!(mv.index < 2),
                Axis::Column => assert!(mv.index < 3),
            }
            drawn.insert(mv);
        }
        assert_eq!(drawn.len(), 10);
    }

    #[test]
    fn test_scramble_is_reproducible() {
        let rules = Rules::new(Mode::Bandaged, Mode::Bandaged);
        let board = bandaged_board();

        let first = scramble(&board, &rules, 1000, &mut StdRng::seed_from_u64(42));
        let second = scramble(&board, &rules, 1000, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_scramble_conserves_cells() {
        let rules = Rules::new(Mode::Bandaged, Mode::Bandaged);
        let board = bandaged_board();
        let mut rng = StdRng::seed_from_u64(3);

        let scrambled = scramble(&board, &rules, 1000, &mut rng);
        assert!(scrambled.same_cells(&board));
        assert_eq!(scramble(&board, &rules, 0, &mut rng), board);
    }
}
