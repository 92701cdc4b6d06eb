//! Solver library for looping dice puzzles.
//!
//! A board is a torus of cells whose rows and columns slide cyclically.
//! This crate simulates the movement modes, enumerates reachable boards
//! and finds shortest move sequences between two boards.

pub mod board;
pub mod cell;
pub mod compat;
pub mod error;
pub mod moves;
pub mod puzzle;
pub mod scramble;
pub mod solver;
pub mod validation;

// Re-export main types
pub use board::{Axis, Board};
pub use cell::{Cell, Direction, Marker};
pub use compat::{is_compatible, mode_fits};
pub use error::{ConfigError, SearchError};
pub use moves::{apply, format_path, neighbors, parse_path, replay, Move};
pub use puzzle::{Mode, Puzzle, PuzzleConfig, Rules, Validation};
pub use scramble::scramble;
pub use solver::{solve, Discovery, Explorer, SearchConfig, Solution};
