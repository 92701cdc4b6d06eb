//! Error types for puzzle configuration and search.

use thiserror::Error;

use crate::board::Axis;
use crate::puzzle::Mode;

/// Startup failures. All of them are fatal and detected before any search.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Row mode {row} and column mode {col} are not compatible")]
    IncompatibleModes { row: Mode, col: Mode },

    #[error("{axis} mode {mode} affects more lines than the {available} available")]
    ModeTooWide {
        axis: Axis,
        mode: Mode,
        available: usize,
    },

    #[error("Initial and goal boards must contain the same cells")]
    ContentMismatch,

    #[error("Board must be a non-empty rectangular grid")]
    MalformedBoard,

    #[error("Goal board is {goal_rows}x{goal_cols} but initial board is {rows}x{cols}")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        goal_rows: usize,
        goal_cols: usize,
    },

    #[error("Invalid cell: {0:?}")]
    InvalidCell(String),

    #[error("Invalid mode: {0:?}")]
    InvalidMode(String),

    #[error("Invalid validation: {0:?}")]
    InvalidValidation(String),

    #[error("Invalid move: {0:?}")]
    InvalidMove(String),

    #[error("Puzzle has no goal board")]
    MissingGoal,

    #[error("Failed to parse puzzle JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read puzzle: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Process exit status for this failure kind
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::IncompatibleModes { .. } => 1,
            ConfigError::ModeTooWide {
                axis: Axis::Row, ..
            } => 2,
            ConfigError::ModeTooWide {
                axis: Axis::Column,
                ..
            } => 3,
            ConfigError::ContentMismatch => 4,
            _ => 5,
        }
    }
}

/// Search failures reported by the bidirectional solver
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Goal is unreachable: both frontiers were exhausted after {explored} states")]
    Unreachable { explored: usize },

    #[error("Search limit exceeded: {metric} reached {limit}")]
    LimitExceeded { metric: &'static str, limit: usize },
}

impl SearchError {
    pub fn exit_code(&self) -> i32 {
        6
    }
}
