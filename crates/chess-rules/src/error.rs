use chess_core::{CastleSide, Square};
use thiserror::Error;

/// Reasons a board operation is rejected. A rejected operation leaves the
/// board unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("a pawn is awaiting promotion")]
    PromotionPending,
    #[error("no pawn is awaiting promotion")]
    NoPromotionPending,
    #[error("no piece is selected")]
    NoSelection,
    #[error("no piece on {0}")]
    EmptySquare(Square),
    #[error("the piece on {0} does not belong to the side to move")]
    WrongTurn(Square),
    #[error("illegal action from {from} to {to}")]
    IllegalAction { from: Square, to: Square },
    #[error("action from {from} to {to} lacks a required effect")]
    IncompleteAction { from: Square, to: Square },
    #[error("expected a piece on {0}")]
    MissingPiece(Square),
    #[error("castling {0} is unavailable")]
    CastlingUnavailable(CastleSide),
    #[error("({row}, {col}) is off the board")]
    OutOfBounds { row: u8, col: u8 },
    #[error("{0} is already occupied")]
    Occupied(Square),
}
