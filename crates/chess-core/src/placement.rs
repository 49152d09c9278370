//! Piece placement text, FEN style.
//!
//! Rows are listed from row 0 to row 7 separated by `/`; digits skip empty
//! squares. Lowercase letters are Top pieces and uppercase letters Bottom
//! pieces, so the standard layout reads exactly like a FEN placement field.

use crate::square::BOARD_LENGTH;
use crate::{PieceKind, Square, Team};
use thiserror::Error;

/// Errors that can occur when parsing placement text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid placement: expected 8 rows, got {0}")]
    InvalidRowCount(usize),

    #[error("invalid character '{0}' in row {1}")]
    InvalidCharacter(char, usize),

    #[error("row {0} has {1} squares, expected 8")]
    InvalidRowLength(usize, u32),
}

/// One piece named by placement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedPiece {
    pub kind: PieceKind,
    pub team: Team,
    pub square: Square,
}

/// Parsed placement text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Placement {
    pieces: Vec<PlacedPiece>,
}

impl Placement {
    /// Placement of the standard starting layout.
    pub const STANDARD: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    /// Placement of an empty board.
    pub const EMPTY: &'static str = "8/8/8/8/8/8/8/8";

    /// Parses placement text.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = text.trim().split('/').collect();
        if rows.len() != BOARD_LENGTH as usize {
            return Err(LayoutError::InvalidRowCount(rows.len()));
        }

        let mut pieces = Vec::new();
        for (row, row_text) in rows.iter().enumerate() {
            let mut col = 0u32;
            for c in row_text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip;
                    continue;
                }
                let (kind, team) =
                    PieceKind::from_char(c).ok_or(LayoutError::InvalidCharacter(c, row))?;
                let square = Square::new(row as u8, col as u8)
                    .ok_or(LayoutError::InvalidRowLength(row, col + 1))?;
                pieces.push(PlacedPiece { kind, team, square });
                col += 1;
            }
            if col != BOARD_LENGTH as u32 {
                return Err(LayoutError::InvalidRowLength(row, col));
            }
        }

        Ok(Placement { pieces })
    }

    /// Returns the parsed pieces in reading order.
    pub fn pieces(&self) -> &[PlacedPiece] {
        &self.pieces
    }

    /// Renders pieces back to placement text.
    pub fn render<I>(pieces: I) -> String
    where
        I: IntoIterator<Item = PlacedPiece>,
    {
        let mut grid = [[None::<char>; BOARD_LENGTH as usize]; BOARD_LENGTH as usize];
        for p in pieces {
            grid[p.square.row() as usize][p.square.col() as usize] = Some(p.kind.to_char(p.team));
        }

        let mut rows = Vec::with_capacity(BOARD_LENGTH as usize);
        for cells in grid.iter() {
            let mut text = String::new();
            let mut empty = 0;
            for cell in cells {
                match cell {
                    Some(c) => {
                        if empty > 0 {
                            text.push_str(&empty.to_string());
                            empty = 0;
                        }
                        text.push(*c);
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                text.push_str(&empty.to_string());
            }
            rows.push(text);
        }
        rows.join("/")
    }
}
