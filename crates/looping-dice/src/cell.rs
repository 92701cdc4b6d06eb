//! Cell representation for looping dice boards.
//!
//! A cell is a face value plus two small flag sets: bonds to neighbouring
//! lines and behavioural markers. The legacy solver packed all of this into
//! a single integer; `Cell::from_bits` / `Cell::bits` keep that encoding
//! convertible so existing puzzle literals still load.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// Legacy flag bits.
const HORIZONTAL_BIT: i32 = 1 << 7;
const VERTICAL_BIT: i32 = 1 << 8;
const UP_BIT: i32 = 1 << 9;
const DOWN_BIT: i32 = 1 << 10;
const LEFT_BIT: i32 = 1 << 11;
const RIGHT_BIT: i32 = 1 << 12;
const LIGHTNING_BIT: i32 = 1 << 13;
const FIXED_BIT: i32 = 1 << 14;
const ENABLER_BIT: i32 = 1 << 15;

const FLAG_MASK: i32 = HORIZONTAL_BIT
    | VERTICAL_BIT
    | UP_BIT
    | DOWN_BIT
    | LEFT_BIT
    | RIGHT_BIT
    | LIGHTNING_BIT
    | FIXED_BIT
    | ENABLER_BIT;

/// Bond direction - a bonded cell is rigidly attached to the line on that side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn mask(self) -> u8 {
        match self {
            Direction::Up => 0b0001,
            Direction::Down => 0b0010,
            Direction::Left => 0b0100,
            Direction::Right => 0b1000,
        }
    }

    fn legacy_bit(self) -> i32 {
        match self {
            Direction::Up => UP_BIT,
            Direction::Down => DOWN_BIT,
            Direction::Left => LEFT_BIT,
            Direction::Right => RIGHT_BIT,
        }
    }

    fn letter(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

/// Behavioural marker carried by a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    /// Cell may only travel horizontally (blocks column movement)
    Horizontal,
    /// Cell may only travel vertically (blocks row movement)
    Vertical,
    /// Line containing this cell slides twice per move
    Lightning,
    /// Immovable anchor
    Fixed,
    /// Line containing this cell is allowed to move
    Enabler,
}

impl Marker {
    pub const ALL: [Marker; 5] = [
        Marker::Fixed,
        Marker::Enabler,
        Marker::Horizontal,
        Marker::Vertical,
        Marker::Lightning,
    ];

    fn mask(self) -> u8 {
        match self {
            Marker::Horizontal => 0b00001,
            Marker::Vertical => 0b00010,
            Marker::Lightning => 0b00100,
            Marker::Fixed => 0b01000,
            Marker::Enabler => 0b10000,
        }
    }

    fn legacy_bit(self) -> i32 {
        match self {
            Marker::Horizontal => HORIZONTAL_BIT,
            Marker::Vertical => VERTICAL_BIT,
            Marker::Lightning => LIGHTNING_BIT,
            Marker::Fixed => FIXED_BIT,
            Marker::Enabler => ENABLER_BIT,
        }
    }

    fn letter(self) -> char {
        match self {
            Marker::Horizontal => 'H',
            Marker::Vertical => 'V',
            Marker::Lightning => 'L',
            Marker::Fixed => 'F',
            Marker::Enabler => 'E',
        }
    }

    fn from_letter(letter: &str) -> Option<Marker> {
        match letter {
            "H" => Some(Marker::Horizontal),
            "V" => Some(Marker::Vertical),
            "L" => Some(Marker::Lightning),
            "F" => Some(Marker::Fixed),
            "E" => Some(Marker::Enabler),
            _ => None,
        }
    }
}

/// Set of bond directions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bonds(u8);

impl Bonds {
    pub const NONE: Bonds = Bonds(0);

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.mask() != 0
    }

    pub fn with(self, direction: Direction) -> Bonds {
        Bonds(self.0 | direction.mask())
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Direction> for Bonds {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter().fold(Bonds::NONE, Bonds::with)
    }
}

/// Set of cell markers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Markers(u8);

impl Markers {
    pub const NONE: Markers = Markers(0);

    pub fn contains(self, marker: Marker) -> bool {
        self.0 & marker.mask() != 0
    }

    pub fn with(self, marker: Marker) -> Markers {
        Markers(self.0 | marker.mask())
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Marker> {
        Marker::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl FromIterator<Marker> for Markers {
    fn from_iter<I: IntoIterator<Item = Marker>>(iter: I) -> Self {
        iter.into_iter().fold(Markers::NONE, Markers::with)
    }
}

/// A single board cell
///
/// Serialized as its text notation; deserialized from either the text
/// notation or a raw legacy integer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "CellLiteral", into = "String")]
pub struct Cell {
    pub value: i32,
    pub bonds: Bonds,
    pub markers: Markers,
}

impl Cell {
    pub fn new(value: i32) -> Self {
        Self {
            value,
            bonds: Bonds::NONE,
            markers: Markers::NONE,
        }
    }

    pub fn with_bond(mut self, direction: Direction) -> Self {
        self.bonds = self.bonds.with(direction);
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers = self.markers.with(marker);
        self
    }

    pub fn has_bond(&self, direction: Direction) -> bool {
        self.bonds.contains(direction)
    }

    pub fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(marker)
    }

    pub fn is_fixed(&self) -> bool {
        self.has_marker(Marker::Fixed)
    }

    /// True if `value` packs into the legacy encoding without touching a flag bit
    pub fn fits_legacy(value: i32) -> bool {
        value >= 0 && value & FLAG_MASK == 0
    }

    /// Decode the legacy packed-integer encoding
    pub fn from_bits(raw: i32) -> Self {
        let bonds = Direction::ALL
            .into_iter()
            .filter(|d| raw & d.legacy_bit() != 0)
            .collect();
        let markers = Marker::ALL
            .into_iter()
            .filter(|m| raw & m.legacy_bit() != 0)
            .collect();
        Self {
            value: raw & !FLAG_MASK,
            bonds,
            markers,
        }
    }

    /// Encode into the legacy packed-integer form.
    ///
    /// Lossy when the value fails `fits_legacy`; such cells only come from
    /// `Cell::new`, never from the text notation.
    pub fn bits(&self) -> i32 {
        let bonds = self.bonds.iter().fold(0, |acc, d| acc | d.legacy_bit());
        let markers = self.markers.iter().fold(0, |acc, m| acc | m.legacy_bit());
        self.value | bonds | markers
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens: Vec<String> = self.markers.iter().map(|m| m.letter().to_string()).collect();
        if !self.bonds.is_empty() {
            tokens.push("B".to_string());
        }
        tokens.push(self.value.to_string());
        tokens.extend(self.bonds.iter().map(|d| d.letter().to_string()));
        write!(f, "{}", tokens.join(" "))
    }
}

impl FromStr for Cell {
    type Err = ConfigError;

    /// Parse `[markers] value [bonds]`, e.g. `F 3`, `L 1`, `B 0 U R`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidCell(s.to_string());
        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(invalid());
        }

        // A lone enabler letter stands for an enabler with value 0.
        if tokens == ["E"] {
            return Ok(Cell::new(0).with_marker(Marker::Enabler));
        }

        let value_pos = tokens
            .iter()
            .position(|t| t.parse::<i32>().is_ok())
            .ok_or_else(invalid)?;

        let value: i32 = tokens[value_pos].parse().map_err(|_| invalid())?;
        if !Cell::fits_legacy(value) {
            return Err(invalid());
        }

        let mut cell = Cell::new(value);
        for token in &tokens[..value_pos] {
            if *token == "B" {
                continue;
            }
            let marker = Marker::from_letter(token).ok_or_else(invalid)?;
            cell = cell.with_marker(marker);
        }
        for token in &tokens[value_pos + 1..] {
            let direction = match *token {
                "U" => Direction::Up,
                "D" => Direction::Down,
                "L" => Direction::Left,
                "R" => Direction::Right,
                _ => return Err(invalid()),
            };
            cell = cell.with_bond(direction);
        }
        Ok(cell)
    }
}

/// Accepted JSON shapes for a cell
#[derive(Deserialize)]
#[serde(untagged)]
enum CellLiteral {
    Bits(i32),
    Text(String),
}

impl TryFrom<CellLiteral> for Cell {
    type Error = ConfigError;

    fn try_from(literal: CellLiteral) -> Result<Self, Self::Error> {
        match literal {
            CellLiteral::Bits(raw) => Ok(Cell::from_bits(raw)),
            CellLiteral::Text(text) => text.parse(),
        }
    }
}

impl From<Cell> for String {
    fn from(cell: Cell) -> String {
        cell.to_string()
    }
}
