//! Rules engine for two-player chess.
//!
//! This crate provides:
//! - [`Board`] - complete game state and the select / attempt / promote
//!   state machine
//! - [`Piece`] - a piece with its cached move and attack sets
//! - [`Action`] and [`Effect`] - proposed transitions and their deferred
//!   side effects
//! - [`Rule`] - the legality rules each piece is evaluated against
//! - Check, checkmate, stalemate and insufficient-material detection
//!
//! # Architecture
//!
//! Each piece kind carries an ordered rule list. Ordinary rules (movement,
//! blocking, capture, king safety) must all hold for an action to be legal.
//! Superior rules (castling, en passant, promotion) allow an action on their
//! own and rewrite its effects. Effects are only executed once the action
//! is committed.
//!
//! # Example
//!
//! ```
//! use chess_rules::{Board, GameStatus};
//! use chess_core::Square;
//!
//! let mut board = Board::standard(false);
//! let e2 = Square::from_notation("e2").unwrap();
//! let e4 = Square::from_notation("e4").unwrap();
//!
//! board.select(e2).unwrap();
//! board.attempt(e4).unwrap();
//! assert!(board.is_top_turn());
//! assert_eq!(board.status(), GameStatus::Normal);
//! ```

mod action;
mod board;
mod error;
pub mod geometry;
mod piece;
pub mod rules;
mod setup;
mod status;

pub use action::{Action, ActionKind, Effect, Plan};
pub use board::{Board, GameType};
pub use error::BoardError;
pub use piece::{Piece, PieceState};
pub use rules::{Evaluation, Rule, Verdict};
pub use setup::{shuffled_back_row, STANDARD_BACK_ROW};
pub use status::GameStatus;
