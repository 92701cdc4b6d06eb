//! Puzzle configuration types.
//!
//! A puzzle file is JSON:
//!
//! ```json
//! {
//!   "rowMode": "GEAR",
//!   "colMode": "GEAR",
//!   "validation": "STATIC+DYNAMIC",
//!   "initial": [["1", "2 U"], [3, "F 4"]],
//!   "goal": [["2 U", "1"], [3, "F 4"]]
//! }
//! ```
//!
//! `PuzzleConfig::validate` runs the one-time startup checks and produces
//! an immutable `Puzzle`.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Axis, Board};
use crate::cell::Cell;
use crate::compat::{is_compatible, mode_fits};
use crate::error::ConfigError;

/// Movement rule for one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mode {
    /// Slides `k` adjacent lines together
    Wide(u8),
    /// Pivot line and the next line slide in opposite directions
    Gear,
    /// Two adjacent lines rotate around their shared seam
    Carousel,
    /// Bonded runs of lines slide together
    Bandaged,
    /// Lines holding a lightning cell slide twice
    Lightning,
    /// Only lines holding an enabler may slide
    Enabler,
    /// Like `Wide(k)` but lines holding a fixed cell never slide
    Static(u8),
    /// Lines holding a cell locked to the other axis never slide
    AxisLocked,
}

impl Mode {
    pub const BASIC: Mode = Mode::Wide(1);

    /// Modes that read cell bits globally and must be used on both axes
    pub fn requires_symmetry(self) -> bool {
        matches!(
            self,
            Mode::Bandaged | Mode::Lightning | Mode::Enabler | Mode::AxisLocked
        )
    }

    pub fn is_static(self) -> bool {
        matches!(self, Mode::Static(_))
    }

    /// Number of lines a single move slides, if fixed by the mode
    pub fn width(self) -> Option<usize> {
        match self {
            Mode::Wide(k) | Mode::Static(k) => Some(k as usize),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Wide(k) => write!(f, "WIDE_{}", k),
            Mode::Gear => write!(f, "GEAR"),
            Mode::Carousel => write!(f, "CAROUSEL"),
            Mode::Bandaged => write!(f, "BANDAGED"),
            Mode::Lightning => write!(f, "LIGHTNING"),
            Mode::Enabler => write!(f, "ENABLER"),
            Mode::Static(k) => write!(f, "STATIC_{}", k),
            Mode::AxisLocked => write!(f, "AXIS"),
        }
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        let width = |k: &str| match k.parse::<u8>() {
            Ok(k @ 1..=4) => Ok(k),
            _ => Err(ConfigError::InvalidMode(s.to_string())),
        };
        match name.as_str() {
            "BASIC" => Ok(Mode::BASIC),
            "GEAR" => Ok(Mode::Gear),
            "CAROUSEL" => Ok(Mode::Carousel),
            "BANDAGED" => Ok(Mode::Bandaged),
            "LIGHTNING" => Ok(Mode::Lightning),
            "ENABLER" => Ok(Mode::Enabler),
            "AXIS" | "AXIS_LOCKED" => Ok(Mode::AxisLocked),
            _ => {
                if let Some(k) = name.strip_prefix("WIDE_") {
                    Ok(Mode::Wide(width(k)?))
                } else if let Some(k) = name.strip_prefix("STATIC_") {
                    Ok(Mode::Static(width(k)?))
                } else {
                    Err(ConfigError::InvalidMode(s.to_string()))
                }
            }
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> String {
        mode.to_string()
    }
}

/// Bitmask of legality predicates layered on top of a mode.
///
/// Predicates compose: every active one may veto a move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Validation(u8);

impl Validation {
    pub const NONE: Validation = Validation(0);
    /// Axis-locked cells block lines moving against their axis
    pub const ARROWS: Validation = Validation(1);
    /// Fixed cells may not wrap around the board edge
    pub const DYNAMIC: Validation = Validation(2);
    /// Lines need an enabler cell to move
    pub const ENABLER: Validation = Validation(4);
    /// Lines holding a fixed cell never move
    pub const STATIC: Validation = Validation(8);

    const NAMED: [(Validation, &'static str); 4] = [
        (Validation::ARROWS, "ARROWS"),
        (Validation::DYNAMIC, "DYNAMIC"),
        (Validation::ENABLER, "ENABLER"),
        (Validation::STATIC, "STATIC"),
    ];

    pub fn contains(self, other: Validation) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for Validation {
    type Output = Validation;

    fn bitor(self, rhs: Validation) -> Validation {
        Validation(self.0 | rhs.0)
    }
}

impl BitOrAssign for Validation {
    fn bitor_assign(&mut self, rhs: Validation) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Validation {
    type Output = Validation;

    fn bitand(self, rhs: Validation) -> Validation {
        Validation(self.0 & rhs.0)
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Validation::NAMED
            .iter()
            .filter(|(v, _)| self.contains(*v))
            .map(|(_, name)| *name)
            .collect();
        if names.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", names.join("+"))
        }
    }
}

impl FromStr for Validation {
    type Err = ConfigError;

    /// Parse `NONE` or `+`/`|`-separated predicate names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut validation = Validation::NONE;
        for part in s.split(['+', '|']) {
            let part = part.trim().to_ascii_uppercase();
            if part == "NONE" || part.is_empty() {
                continue;
            }
            let (v, _) = Validation::NAMED
                .iter()
                .find(|(_, name)| *name == part)
                .ok_or_else(|| ConfigError::InvalidValidation(s.to_string()))?;
            validation |= *v;
        }
        Ok(validation)
    }
}

impl TryFrom<String> for Validation {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Validation> for String {
    fn from(validation: Validation) -> String {
        validation.to_string()
    }
}

/// Movement rules for one run, fixed for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rules {
    pub row_mode: Mode,
    pub col_mode: Mode,
    #[serde(default)]
    pub validation: Validation,
}

impl Rules {
    pub fn new(row_mode: Mode, col_mode: Mode) -> Self {
        Self {
            row_mode,
            col_mode,
            validation: Validation::NONE,
        }
    }

    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    pub fn mode(&self, axis: Axis) -> Mode {
        match axis {
            Axis::Row => self.row_mode,
            Axis::Column => self.col_mode,
        }
    }

    /// Check mode compatibility and that each mode fits the board
    pub fn check(&self, board: &Board) -> Result<(), ConfigError> {
        if !is_compatible(self.row_mode, self.col_mode) {
            return Err(ConfigError::IncompatibleModes {
                row: self.row_mode,
                col: self.col_mode,
            });
        }
        for axis in [Axis::Row, Axis::Column] {
            let available = board.line_count(axis);
            if !mode_fits(self.mode(axis), available) {
                return Err(ConfigError::ModeTooWide {
                    axis,
                    mode: self.mode(axis),
                    available,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.row_mode, self.col_mode, self.validation)
    }
}

/// Puzzle description as read from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleConfig {
    #[serde(flatten)]
    pub rules: Rules,
    pub initial: Vec<Vec<Cell>>,
    #[serde(default)]
    pub goal: Option<Vec<Vec<Cell>>>,
}

impl PuzzleConfig {
    /// Run the startup checks and build the boards
    pub fn validate(&self) -> Result<Puzzle, ConfigError> {
        let initial = Board::from_rows(self.initial.clone())?;
        self.rules.check(&initial)?;

        let goal = match &self.goal {
            Some(rows) => {
                let goal = Board::from_rows(rows.clone())?;
                if goal.rows() != initial.rows() || goal.cols() != initial.cols() {
                    return Err(ConfigError::DimensionMismatch {
                        rows: initial.rows(),
                        cols: initial.cols(),
                        goal_rows: goal.rows(),
                        goal_cols: goal.cols(),
                    });
                }
                if !initial.same_cells(&goal) {
                    return Err(ConfigError::ContentMismatch);
                }
                Some(goal)
            }
            None => None,
        };

        Ok(Puzzle {
            rules: self.rules,
            initial,
            goal,
        })
    }
}

/// A validated puzzle, ready to search
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub rules: Rules,
    pub initial: Board,
    pub goal: Option<Board>,
}

impl Puzzle {
    pub fn goal(&self) -> Result<&Board, ConfigError> {
        self.goal.as_ref().ok_or(ConfigError::MissingGoal)
    }
}
