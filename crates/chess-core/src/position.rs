//! Board coordinates.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing a square name like "e4".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParsePositionError {
    #[error("invalid square '{0}': expected a file letter and a rank digit")]
    InvalidLength(String),

    #[error("invalid file '{0}': expected 'a'-'h'")]
    InvalidFile(char),

    #[error("invalid rank '{0}': expected '1'-'8'")]
    InvalidRank(char),
}

/// A square on the board as a (row, col) pair.
///
/// Row 0 is White's back rank (rank 1) and rows increase towards Black.
/// Col 0 is the a-file. Coordinates are signed so that move generators can
/// form offsets past the edge; such positions are never valid board squares
/// and [`Position::offset`] refuses to produce them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    /// Creates a position. The result may be off the board.
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Position { row, col }
    }

    /// Returns true if both coordinates lie within the 8x8 board.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.row >= 0 && self.row < 8 && self.col >= 0 && self.col < 8
    }

    /// Returns the square `(dr, dc)` away, or `None` if it leaves the board.
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let target = Position::new(self.row.wrapping_add(dr), self.col.wrapping_add(dc));
        if target.is_valid() {
            Some(target)
        } else {
            None
        }
    }

    /// Iterates over all 64 valid squares, row by row starting at a1.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..8).flat_map(|row| (0..8).map(move |col| Position::new(row, col)))
    }

    /// Parses a square from coordinate notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Returns the coordinate notation for this square, e.g. "e4".
    ///
    /// Off-board positions have no name and render as "??".
    pub fn to_algebraic(self) -> String {
        if !self.is_valid() {
            return "??".to_string();
        }
        let file = (b'a' + self.col as u8) as char;
        let rank = (b'1' + self.row as u8) as char;
        format!("{}{}", file, rank)
    }

    // Squares referenced by the castling rules.
    pub const A1: Position = Position::new(0, 0);
    pub const C1: Position = Position::new(0, 2);
    pub const D1: Position = Position::new(0, 3);
    pub const E1: Position = Position::new(0, 4);
    pub const F1: Position = Position::new(0, 5);
    pub const G1: Position = Position::new(0, 6);
    pub const H1: Position = Position::new(0, 7);
    pub const A8: Position = Position::new(7, 0);
    pub const C8: Position = Position::new(7, 2);
    pub const D8: Position = Position::new(7, 3);
    pub const E8: Position = Position::new(7, 4);
    pub const F8: Position = Position::new(7, 5);
    pub const G8: Position = Position::new(7, 6);
    pub const H8: Position = Position::new(7, 7);
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParsePositionError::InvalidLength(s.to_string()));
        };
        let col = match file.to_ascii_lowercase() {
            c @ 'a'..='h' => (c as u8 - b'a') as i8,
            _ => return Err(ParsePositionError::InvalidFile(file)),
        };
        let row = match rank {
            c @ '1'..='8' => (c as u8 - b'1') as i8,
            _ => return Err(ParsePositionError::InvalidRank(rank)),
        };
        Ok(Position::new(row, col))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "Position({})", self.to_algebraic())
        } else {
            write!(f, "Position(row {}, col {})", self.row, self.col)
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
