//! Core types for the chess rules engine.
//!
//! This crate provides the value types shared by the engine and its callers:
//! - [`Team`], [`PieceKind`], [`Promotion`] and [`CastleSide`]
//! - [`Square`] and [`SquareSet`] for board coordinates
//! - [`MoveRecord`] for exchanging committed actions
//! - [`Placement`] for describing boards as text

mod kind;
mod placement;
mod record;
mod square;
mod square_set;
mod team;

pub use kind::{CastleSide, PieceKind, Promotion};
pub use placement::{LayoutError, PlacedPiece, Placement};
pub use record::{MoveRecord, NotationError};
pub use square::{Square, BOARD_LENGTH};
pub use square_set::{SquareSet, SquareSetIter};
pub use team::Team;
