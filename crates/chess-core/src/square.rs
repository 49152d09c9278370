//! Board square representation.

use crate::NotationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the board.
pub const BOARD_LENGTH: u8 = 8;

/// A square on the board, addressed by row and column.
///
/// Row 0 is the Top team's back row; column 0 is file `a`. In notation the
/// rank digit counts from the Bottom side, so row 0 is rank 8 and row 7 is
/// rank 1:
/// - (0, 0) = a8, (0, 7) = h8
/// - (7, 0) = a1, (7, 7) = h1
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a square, returning `None` when it falls outside the board.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_LENGTH && col < BOARD_LENGTH {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// Creates a square from signed coordinates, as produced by offset math.
    #[inline]
    pub const fn from_signed(row: i8, col: i8) -> Option<Self> {
        if row < 0 || col < 0 {
            return None;
        }
        Self::new(row as u8, col as u8)
    }

    /// Creates a square from its dense index (`row * 8 + col`).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < BOARD_LENGTH * BOARD_LENGTH {
            Some(Square {
                row: index / BOARD_LENGTH,
                col: index % BOARD_LENGTH,
            })
        } else {
            None
        }
    }

    /// Returns the square displaced by the given deltas, if still on the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::from_signed(self.row as i8 + d_row, self.col as i8 + d_col)
    }

    /// Returns the row (0-7).
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0-7).
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the dense index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.row * BOARD_LENGTH + self.col
    }

    /// Returns true if both squares have the same diagonal color.
    #[inline]
    pub const fn same_color(self, other: Square) -> bool {
        (self.row + self.col) % 2 == (other.row + other.col) % 2
    }

    /// Parses a square from notation (e.g., "e4").
    pub const fn from_notation(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if file < b'a' || file >= b'a' + BOARD_LENGTH {
            return None;
        }
        if rank < b'1' || rank >= b'1' + BOARD_LENGTH {
            return None;
        }
        Self::new(BOARD_LENGTH - (rank - b'0'), file - b'a')
    }

    /// Returns the notation for this square.
    pub fn to_notation(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }

    /// Returns the file letter ('a'-'h').
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    /// Returns the rank digit ('1'-'8').
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'0' + BOARD_LENGTH - self.row) as char
    }

    /// Iterates over every square, row by row.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_LENGTH * BOARD_LENGTH).filter_map(Square::from_index)
    }
}

impl TryFrom<String> for Square {
    type Error = NotationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Square::from_notation(&value).ok_or(NotationError::InvalidSquare(value))
    }
}

impl From<Square> for String {
    fn from(value: Square) -> Self {
        value.to_notation()
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_notation())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}
