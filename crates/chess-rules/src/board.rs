//! Board state and the turn state machine.
//!
//! The [`Board`] owns every piece, the action history and the transient
//! selection and promotion state. All player-facing operations go through it:
//!
//! 1. [`Board::select`] picks one of the side-to-move's pieces.
//! 2. [`Board::attempt`] (or [`Board::castle`]) proposes an action for the
//!    selected piece; the piece's rules decide, and an allowed action is
//!    committed and the turn advances.
//! 3. When a pawn reaches its farthest row the board waits for
//!    [`Board::promote`] before anything else may happen.
//!
//! Rejected operations return a [`BoardError`] and leave the board untouched.

use crate::action::{Action, ActionKind, Effect, Plan};
use crate::error::BoardError;
use crate::piece::{Piece, PieceState};
use crate::rules;
use crate::status::GameStatus;
use chess_core::{
    CastleSide, MoveRecord, PieceKind, Placement, Promotion, Square, SquareSet, Team,
};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use tracing::{debug, trace};

/// Variant of the starting layout; affects how castling targets are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    /// The classical layout; the castling king moves exactly two columns.
    #[default]
    Standard,
    /// A randomized back row; the castling king always lands on column 2 or 6.
    Shuffled,
}

/// The complete game state.
#[derive(Debug, Clone, Default)]
pub struct Board {
    pub(crate) pieces: Vec<Piece>,
    pub(crate) turn: u32,
    pub(crate) top_first: bool,
    pub(crate) game_type: GameType,
    selected: Option<Square>,
    promotion: Option<Square>,
    pub(crate) history: Vec<Action>,
    /// Status of the side to move, keyed by the turn it was computed for.
    pub(crate) status: Cell<Option<(u32, GameStatus)>>,
}

impl Board {
    /// Creates an empty board on which the Bottom team moves first.
    pub fn new() -> Self {
        Self::default()
    }

    // --- turn state ---

    /// Number of committed actions.
    #[inline]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Returns true if the Top team made the first move.
    #[inline]
    pub fn top_first(&self) -> bool {
        self.top_first
    }

    #[inline]
    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    /// Overrides the game type without touching the pieces.
    pub fn set_game_type(&mut self, game_type: GameType) {
        self.game_type = game_type;
        self.invalidate();
    }

    /// Returns true if the Top team is to move.
    #[inline]
    pub fn is_top_turn(&self) -> bool {
        (self.turn % 2 == 0) == self.top_first
    }

    /// The team to move.
    #[inline]
    pub fn side_to_move(&self) -> Team {
        if self.is_top_turn() {
            Team::Top
        } else {
            Team::Bottom
        }
    }

    /// Returns true while a pawn waits for [`Board::promote`].
    #[inline]
    pub fn is_promoting(&self) -> bool {
        self.promotion.is_some()
    }

    /// Square of the pawn awaiting promotion.
    #[inline]
    pub fn pending_promotion(&self) -> Option<Square> {
        self.promotion
    }

    /// The currently selected piece.
    pub fn selected(&self) -> Option<&Piece> {
        self.selected.and_then(|sq| self.piece_at(sq))
    }

    // --- piece queries ---

    /// All live pieces, in no particular order.
    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Live pieces of one team.
    pub fn pieces_of(&self, team: Team) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.team() == team)
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.is_at(square))
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.pieces.iter().any(|p| p.is_at(square))
    }

    /// The king of `team`, if it is on the board.
    pub fn king_of(&self, team: Team) -> Option<&Piece> {
        self.pieces_of(team).find(|p| p.kind() == PieceKind::King)
    }

    fn index_at(&self, square: Square) -> Option<usize> {
        self.pieces.iter().position(|p| p.is_at(square))
    }

    /// The outermost rook of `team` on the king's row toward `side`.
    pub(crate) fn castling_rook(&self, team: Team, king: Square, side: CastleSide) -> Option<&Piece> {
        let rooks = self.pieces_of(team).filter(|p| {
            p.kind() == PieceKind::Rook
                && p.square().row() == king.row()
                && match side {
                    CastleSide::Kingside => p.square().col() > king.col(),
                    CastleSide::Queenside => p.square().col() < king.col(),
                }
        });
        match side {
            CastleSide::Kingside => rooks.max_by_key(|p| p.square().col()),
            CastleSide::Queenside => rooks.min_by_key(|p| p.square().col()),
        }
    }

    // --- history ---

    /// Committed actions, oldest first.
    #[inline]
    pub fn history(&self) -> &[Action] {
        &self.history
    }

    #[inline]
    pub fn last_action(&self) -> Option<&Action> {
        self.history.last()
    }

    /// Wire record of the last committed action, including its promotion
    /// choice once resolved.
    pub fn last_record(&self) -> Option<MoveRecord> {
        self.last_action().map(Action::record)
    }

    // --- snapshots ---

    /// Returns an independent copy of the complete state.
    pub fn deep_copy(&self) -> Board {
        self.clone()
    }

    /// Replaces the complete state with `snapshot`.
    pub fn restore(&mut self, snapshot: Board) {
        *self = snapshot;
    }

    /// A copy that carries only what rule evaluation needs: pieces, turn and
    /// the last action.
    pub(crate) fn scratch(&self) -> Board {
        Board {
            pieces: self.pieces.clone(),
            turn: self.turn,
            top_first: self.top_first,
            game_type: self.game_type,
            selected: None,
            promotion: None,
            history: self.history.last().cloned().into_iter().collect(),
            status: Cell::new(None),
        }
    }

    /// Returns true if `team`'s king would be safe after `effects` executed.
    pub(crate) fn is_safe_after(&self, team: Team, effects: &[Effect]) -> bool {
        let mut scratch = self.scratch();
        scratch.apply(&Plan::fold(effects));
        !scratch.is_king_in_check(team)
    }

    // --- player operations ---

    /// Selects the piece on `square` for the next [`Board::attempt`].
    ///
    /// # Errors
    ///
    /// Fails while a promotion is pending, if the square is empty, or if the
    /// piece belongs to the side not to move.
    pub fn select(&mut self, square: Square) -> Result<(), BoardError> {
        if self.is_promoting() {
            return Err(BoardError::PromotionPending);
        }
        let side = self.side_to_move();
        let index = self.index_at(square).ok_or(BoardError::EmptySquare(square))?;
        if self.pieces[index].team() != side {
            return Err(BoardError::WrongTurn(square));
        }

        self.clear_selection();
        self.pieces[index].set_state(PieceState::Selected);
        self.selected = Some(square);
        trace!(square = %square, "selected");
        Ok(())
    }

    /// [`Board::select`] by raw coordinates.
    pub fn select_at(&mut self, row: u8, col: u8) -> Result<(), BoardError> {
        let square = Square::new(row, col).ok_or(BoardError::OutOfBounds { row, col })?;
        self.select(square)
    }

    /// Attempts to move or attack with the selected piece.
    ///
    /// The action is an attack if `target` is occupied and a move otherwise.
    /// On success the action is committed, the turn advances and the
    /// selection is cleared; on failure nothing changes.
    pub fn attempt(&mut self, target: Square) -> Result<(), BoardError> {
        if self.is_promoting() {
            return Err(BoardError::PromotionPending);
        }
        let from = self.selected.ok_or(BoardError::NoSelection)?;
        let piece = self.piece_at(from).ok_or(BoardError::MissingPiece(from))?;
        if piece.team() != self.side_to_move() {
            return Err(BoardError::WrongTurn(from));
        }

        let mut action = Action::toward(piece, target, self.is_occupied(target));
        if !rules::is_allowed(self, &mut action) {
            trace!(from = %from, to = %target, "action rejected");
            return Err(BoardError::IllegalAction { from, to: target });
        }
        self.commit(action)
    }

    /// [`Board::attempt`] by raw coordinates.
    pub fn attempt_at(&mut self, row: u8, col: u8) -> Result<(), BoardError> {
        let square = Square::new(row, col).ok_or(BoardError::OutOfBounds { row, col })?;
        self.attempt(square)
    }

    /// Castles the side to move's king toward `side`. Needs no selection.
    pub fn castle(&mut self, side: CastleSide) -> Result<(), BoardError> {
        if self.is_promoting() {
            return Err(BoardError::PromotionPending);
        }
        let king = self
            .king_of(self.side_to_move())
            .ok_or(BoardError::CastlingUnavailable(side))?;
        let target = self
            .castling_target(king.square(), side)
            .ok_or(BoardError::CastlingUnavailable(side))?;

        let mut action = Action::new(king, target, ActionKind::Castling(side));
        if !rules::is_allowed(self, &mut action) {
            trace!(side = %side, "castling rejected");
            return Err(BoardError::CastlingUnavailable(side));
        }
        self.commit(action)
    }

    /// Where the king at `king` lands when castling toward `side`.
    pub(crate) fn castling_target(&self, king: Square, side: CastleSide) -> Option<Square> {
        match self.game_type {
            GameType::Standard => king.offset(0, 2 * side.direction()),
            GameType::Shuffled => Square::new(king.row(), side.king_destination_col()),
        }
    }

    /// Replaces the pawn awaiting promotion with a piece of the chosen kind.
    pub fn promote(&mut self, choice: Promotion) -> Result<(), BoardError> {
        let square = self.promotion.ok_or(BoardError::NoPromotionPending)?;
        let index = self.index_at(square).ok_or(BoardError::MissingPiece(square))?;
        let team = self.pieces[index].team();
        let promoted = Piece::new(choice.kind(), team, square).moved();
        let mut pawn = std::mem::replace(&mut self.pieces[index], promoted);
        pawn.set_state(PieceState::Promoted);
        debug!(pawn = %pawn, kind = %choice.kind(), "promoted");

        self.promotion = None;
        if let Some(last) = self.history.last_mut() {
            last.set_promotion(choice);
        }
        self.invalidate();
        Ok(())
    }

    /// Commits an allowed action: executes its effects, records it and
    /// advances the turn.
    fn commit(&mut self, mut action: Action) -> Result<(), BoardError> {
        if !action.is_complete() {
            return Err(BoardError::IncompleteAction {
                from: action.origin(),
                to: action.target(),
            });
        }

        let plan = Plan::fold(action.effects());
        self.apply(&plan);
        self.clear_selection();
        action.set_note(plan.note);
        if plan.await_promotion {
            self.promotion = Some(action.target());
        }

        debug!(turn = self.turn, action = %action, "committed");
        self.history.push(action);
        self.turn += 1;
        self.invalidate();
        Ok(())
    }

    /// Executes a plan. Captures go first; relocations are then resolved
    /// against the pieces standing on their origins before any of them
    /// moves, so a king and rook may trade places. A piece still standing on
    /// a relocation target is removed.
    pub(crate) fn apply(&mut self, plan: &Plan) {
        for &square in &plan.captures {
            if let Some(index) = self.index_at(square) {
                let mut captured = self.pieces.remove(index);
                captured.set_state(PieceState::Captured);
                trace!(piece = %captured, "captured");
            }
        }

        let moving: Vec<(usize, Square)> = plan
            .relocations
            .iter()
            .filter_map(|&(from, to)| self.index_at(from).map(|index| (index, to)))
            .collect();
        let displaced: Vec<usize> = self
            .pieces
            .iter()
            .enumerate()
            .filter(|(index, piece)| {
                !moving.iter().any(|(m, _)| m == index)
                    && moving.iter().any(|(_, to)| piece.is_at(*to))
            })
            .map(|(index, _)| index)
            .collect();

        for &(index, to) in &moving {
            self.pieces[index].relocate(to);
        }
        if !displaced.is_empty() {
            let mut index = 0;
            self.pieces.retain(|_| {
                let keep = !displaced.contains(&index);
                index += 1;
                keep
            });
        }
    }

    fn clear_selection(&mut self) {
        for piece in self.pieces.iter_mut() {
            if piece.state() == PieceState::Selected {
                piece.set_state(PieceState::Alive);
            }
        }
        self.selected = None;
    }

    pub(crate) fn invalidate(&self) {
        self.status.set(None);
    }

    // --- forced operations ---

    /// Moves a piece without consulting any rule and without advancing the
    /// turn. Whatever stood on `to` is removed.
    pub fn force_move(&mut self, from: Square, to: Square) -> Result<(), BoardError> {
        if !self.is_occupied(from) {
            return Err(BoardError::EmptySquare(from));
        }
        if from == to {
            return Ok(());
        }

        self.apply(&Plan {
            relocations: vec![(from, to)],
            ..Plan::default()
        });
        if self.selected == Some(from) {
            self.selected = Some(to);
        } else if self.selected == Some(to) {
            self.selected = None;
        }
        if self.promotion == Some(from) {
            self.promotion = Some(to);
        }
        debug!(from = %from, to = %to, "forced move");
        self.invalidate();
        Ok(())
    }

    /// Removes the piece on `square` without consulting any rule and without
    /// advancing the turn.
    pub fn force_capture(&mut self, square: Square) -> Option<Piece> {
        let index = self.index_at(square)?;
        let mut piece = self.pieces.remove(index);
        piece.set_state(PieceState::Captured);
        if self.selected == Some(square) {
            self.selected = None;
        }
        if self.promotion == Some(square) {
            self.promotion = None;
        }
        debug!(piece = %piece, "forced capture");
        self.invalidate();
        Some(piece)
    }

    /// Puts a piece on an empty square. Pawns off their starting row count
    /// as moved, as they do in placement text.
    pub fn place(&mut self, kind: PieceKind, team: Team, square: Square) -> Result<(), BoardError> {
        if self.is_occupied(square) {
            return Err(BoardError::Occupied(square));
        }
        self.pieces.push(Piece::placed_on(kind, team, square));
        self.invalidate();
        Ok(())
    }

    // --- derived queries ---

    /// Squares the piece on `square` may legally act on right now, ignoring
    /// whose turn it is. Castling is not included.
    pub fn legal_targets(&self, square: Square) -> SquareSet {
        let Some(piece) = self.piece_at(square) else {
            return SquareSet::EMPTY;
        };
        (piece.possible_moves() | piece.possible_attacks())
            .iter()
            .filter(|&to| {
                let mut action = Action::toward(piece, to, self.is_occupied(to));
                rules::is_allowed(self, &mut action) && action.is_complete()
            })
            .collect()
    }

    /// Returns true if any piece of `team` has a legal move or attack.
    pub fn has_legal_action(&self, team: Team) -> bool {
        self.pieces_of(team)
            .any(|p| !self.legal_targets(p.square()).is_empty())
    }

    /// Placement text of the current pieces.
    pub fn placement(&self) -> String {
        Placement::render(self.pieces.iter().map(Piece::placed))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..chess_core::BOARD_LENGTH {
            for col in 0..chess_core::BOARD_LENGTH {
                let c = Square::new(row, col)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', |p| p.kind().to_char(p.team()));
                write!(f, "{}", c)?;
                if col < chess_core::BOARD_LENGTH - 1 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "{} to move", self.side_to_move())
    }
}
