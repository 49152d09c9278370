//! The authoritative board of one game.
//!
//! A [`Session`] serializes every mutation through a single lock, so local
//! input and records arriving from a remote peer never interleave. Replayed
//! records are validated on a copy of the board and only swapped in once the
//! whole record went through.

use crate::config::{ConfigError, SessionConfig};
use chess_core::{CastleSide, MoveRecord, NotationError, PieceKind, Promotion, Square};
use chess_rules::{Board, BoardError, GameStatus};
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while replaying a move record.
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("invalid move record: {0}")]
    Notation(#[from] NotationError),
    #[error("invalid move record json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("record rejected: {0}")]
    Board(#[from] BoardError),
    #[error("{0} reaches the last row but names no promotion")]
    MissingPromotion(MoveRecord),
    #[error("{0} names a promotion but does not reach the last row")]
    UnexpectedPromotion(MoveRecord),
}

/// A game in progress.
#[derive(Debug)]
pub struct Session {
    board: Mutex<Board>,
    config: SessionConfig,
}

impl Session {
    /// Starts a session with a board built from `config`.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        let board = config.build_board()?;
        info!(game_type = ?config.game_type, top_first = config.top_first, "session started");
        Ok(Session {
            board: Mutex::new(board),
            config,
        })
    }

    /// Starts a session on an existing board.
    pub fn from_board(board: Board) -> Self {
        let config = SessionConfig {
            game_type: board.game_type(),
            top_first: board.top_first(),
            ..SessionConfig::default()
        };
        Session {
            board: Mutex::new(board),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // Every mutation completes or leaves the board as it was, so a poisoned
    // lock still guards a consistent board.
    fn lock(&self) -> MutexGuard<'_, Board> {
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the current board.
    pub fn with_board<T>(&self, f: impl FnOnce(&Board) -> T) -> T {
        f(&self.lock())
    }

    pub fn select(&self, square: Square) -> Result<(), BoardError> {
        self.lock().select(square)
    }

    pub fn attempt(&self, target: Square) -> Result<(), BoardError> {
        self.lock().attempt(target)
    }

    /// Selects the piece on `from` and attempts `to` under one lock, so no
    /// other caller can change the selection in between.
    pub fn play(&self, from: Square, to: Square) -> Result<(), BoardError> {
        let mut board = self.lock();
        board.select(from)?;
        board.attempt(to)
    }

    pub fn castle(&self, side: CastleSide) -> Result<(), BoardError> {
        self.lock().castle(side)
    }

    pub fn promote(&self, choice: Promotion) -> Result<(), BoardError> {
        self.lock().promote(choice)
    }

    pub fn status(&self) -> GameStatus {
        self.lock().status()
    }

    /// Returns a deep copy of the board.
    pub fn snapshot(&self) -> Board {
        self.lock().deep_copy()
    }

    /// Replaces the board with `snapshot`.
    pub fn restore(&self, snapshot: Board) {
        self.lock().restore(snapshot);
    }

    /// Throws the game away and sets up a fresh board from the configuration.
    pub fn reset(&self) -> Result<(), ConfigError> {
        let board = self.config.build_board()?;
        *self.lock() = board;
        info!("session reset");
        Ok(())
    }

    /// Record of the last committed action.
    pub fn last_record(&self) -> Option<MoveRecord> {
        self.lock().last_record()
    }

    /// JSON of the last committed action, for sending to a peer.
    pub fn last_record_json(&self) -> Result<Option<String>, ReplayError> {
        Ok(self
            .last_record()
            .map(|record| serde_json::to_string(&record))
            .transpose()?)
    }

    /// Applies a record received from a peer. Nothing changes unless the
    /// whole record applies, including its promotion.
    pub fn apply_record(&self, record: &MoveRecord) -> Result<(), ReplayError> {
        let mut board = self.lock();
        let mut trial = board.deep_copy();
        match replay(&mut trial, record) {
            Ok(()) => {
                board.restore(trial);
                info!(record = %record, turn = board.turn(), "applied record");
                Ok(())
            }
            Err(e) => {
                warn!(record = %record, error = %e, "rejected record");
                Err(e)
            }
        }
    }

    /// Parses a JSON record and applies it.
    pub fn apply_json(&self, json: &str) -> Result<(), ReplayError> {
        let record: MoveRecord = serde_json::from_str(json)?;
        self.apply_record(&record)
    }

    /// Parses a compact record such as `e7e8q` and applies it.
    pub fn apply_compact(&self, text: &str) -> Result<(), ReplayError> {
        let record = MoveRecord::parse(text)?;
        self.apply_record(&record)
    }
}

/// Plays `record` on `board`. A promotion character is required exactly when
/// the move puts a pawn on its last row. May leave `board` half-updated on
/// error; callers work on a copy.
pub fn replay(board: &mut Board, record: &MoveRecord) -> Result<(), ReplayError> {
    if board.is_promoting() {
        return Err(BoardError::PromotionPending.into());
    }

    if let Some(side) = castling_side(board, record) {
        let mut castled = board.deep_copy();
        let lands = castled.castle(side).is_ok()
            && castled.last_action().map(|a| a.target()) == Some(record.to);
        if lands {
            if record.promotion.is_some() {
                return Err(ReplayError::UnexpectedPromotion(*record));
            }
            board.restore(castled);
            return Ok(());
        }
    }

    board.select(record.from)?;
    board.attempt(record.to)?;
    if board.is_promoting() {
        let choice = record
            .promotion
            .ok_or(ReplayError::MissingPromotion(*record))?;
        board.promote(choice)?;
    } else if record.promotion.is_some() {
        return Err(ReplayError::UnexpectedPromotion(*record));
    }
    Ok(())
}

/// The castling side a record could describe: an unmoved king of the side
/// to move heading for column 2 or 6 of its own row.
fn castling_side(board: &Board, record: &MoveRecord) -> Option<CastleSide> {
    let king = board.piece_at(record.from)?;
    if king.kind() != PieceKind::King
        || king.has_moved()
        || king.team() != board.side_to_move()
        || record.to.row() != record.from.row()
    {
        return None;
    }
    [CastleSide::Kingside, CastleSide::Queenside]
        .into_iter()
        .find(|side| side.king_destination_col() == record.to.col())
}
