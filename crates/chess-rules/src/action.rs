//! Actions and the effects attached to them.
//!
//! An [`Action`] describes one attempted transition: a snapshot of the acting
//! piece, a target square and a category. While rules evaluate it they attach
//! [`Effect`]s; the board executes those effects only once the action has been
//! allowed, folding them into a single [`Plan`].

use crate::piece::Piece;
use chess_core::{CastleSide, MoveRecord, Promotion, Square};

/// Category of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Relocation onto an empty square.
    Move,
    /// Capture of the piece on the target square.
    Attack,
    /// King and rook relocation toward the given side.
    Castling(CastleSide),
}

/// A deferred side effect, executed when the action commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Remove the piece standing on the square.
    Capture(Square),
    /// Move the piece standing on `from` to `to`.
    Relocate { from: Square, to: Square },
    /// Put the board in awaiting-promotion state for the piece on the target.
    AwaitPromotion,
    /// Attach a human-readable note to the action.
    Annotate(&'static str),
}

/// An attempted state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    piece: Piece,
    target: Square,
    kind: ActionKind,
    effects: Vec<Effect>,
    note: Option<&'static str>,
    promotion: Option<Promotion>,
}

impl Action {
    /// Creates an action for `piece`, seeded with the default effects of its
    /// category. The piece is copied, so later changes to the real piece do
    /// not alter what the action describes.
    pub fn new(piece: &Piece, target: Square, kind: ActionKind) -> Self {
        let from = piece.square();
        let effects = match kind {
            ActionKind::Move | ActionKind::Castling(_) => {
                vec![Effect::Relocate { from, to: target }]
            }
            ActionKind::Attack => vec![
                Effect::Capture(target),
                Effect::Relocate { from, to: target },
            ],
        };
        Action {
            piece: piece.clone(),
            target,
            kind,
            effects,
            note: None,
            promotion: None,
        }
    }

    /// Creates a move or attack depending on whether `target` is occupied.
    pub fn toward(piece: &Piece, target: Square, occupied: bool) -> Self {
        let kind = if occupied {
            ActionKind::Attack
        } else {
            ActionKind::Move
        };
        Self::new(piece, target, kind)
    }

    /// The acting piece as it was when the action was proposed.
    #[inline]
    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    /// The square the piece stood on when the action was proposed.
    #[inline]
    pub fn origin(&self) -> Square {
        self.piece.square()
    }

    #[inline]
    pub fn target(&self) -> Square {
        self.target
    }

    #[inline]
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    #[inline]
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// The note set by a committed effect, e.g. "Castling" or "En Passant".
    #[inline]
    pub fn note(&self) -> Option<&'static str> {
        self.note
    }

    /// The promotion choice that resolved this action, if it promoted a pawn.
    #[inline]
    pub fn promotion(&self) -> Option<Promotion> {
        self.promotion
    }

    /// Inserts an effect ahead of all others.
    pub fn push_front(&mut self, effect: Effect) {
        self.effects.insert(0, effect);
    }

    /// Appends an effect after all others.
    pub fn push_back(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Drops every attached effect.
    pub fn clear_effects(&mut self) {
        self.effects.clear();
    }

    /// Drops all capture effects.
    pub fn clear_captures(&mut self) {
        self.effects.retain(|e| !matches!(e, Effect::Capture(_)));
    }

    /// Returns true if the effects cover what the category requires: a move
    /// relocates the acting piece, an attack also captures, and castling
    /// relocates both king and rook.
    pub fn is_complete(&self) -> bool {
        let origin = self.origin();
        let relocates_piece = self
            .effects
            .iter()
            .any(|e| matches!(e, Effect::Relocate { from, .. } if *from == origin));
        let relocations = self
            .effects
            .iter()
            .filter(|e| matches!(e, Effect::Relocate { .. }))
            .count();
        let captures = self
            .effects
            .iter()
            .any(|e| matches!(e, Effect::Capture(_)));

        match self.kind {
            ActionKind::Move => relocates_piece,
            ActionKind::Attack => relocates_piece && captures,
            ActionKind::Castling(_) => relocates_piece && relocations >= 2,
        }
    }

    /// Returns the wire record of this action.
    pub fn record(&self) -> MoveRecord {
        let record = MoveRecord::new(self.origin(), self.target);
        match self.promotion {
            Some(p) => record.with_promotion(p),
            None => record,
        }
    }

    pub(crate) fn set_note(&mut self, note: Option<&'static str>) {
        if note.is_some() {
            self.note = note;
        }
    }

    pub(crate) fn set_promotion(&mut self, promotion: Promotion) {
        self.promotion = Some(promotion);
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:?} {} {}",
            self.piece.kind(),
            self.kind,
            self.origin(),
            self.target
        )?;
        if let Some(note) = self.note {
            write!(f, " {}", note)?;
        }
        Ok(())
    }
}

/// The effects of an action folded into the changes they make.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub captures: Vec<Square>,
    pub relocations: Vec<(Square, Square)>,
    pub await_promotion: bool,
    pub note: Option<&'static str>,
}

impl Plan {
    /// Folds effects in order; a later note replaces an earlier one.
    pub fn fold(effects: &[Effect]) -> Self {
        effects.iter().fold(Plan::default(), |mut plan, effect| {
            match *effect {
                Effect::Capture(sq) => plan.captures.push(sq),
                Effect::Relocate { from, to } => plan.relocations.push((from, to)),
                Effect::AwaitPromotion => plan.await_promotion = true,
                Effect::Annotate(note) => plan.note = Some(note),
            }
            plan
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{PieceKind, Team};

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn default_effects_per_kind() {
        let rook = Piece::new(PieceKind::Rook, Team::Top, sq(0, 0));

        let mv = Action::new(&rook, sq(3, 0), ActionKind::Move);
        assert_eq!(
            mv.effects(),
            &[Effect::Relocate {
                from: sq(0, 0),
                to: sq(3, 0)
            }]
        );
        assert!(mv.is_complete());

        let attack = Action::new(&rook, sq(3, 0), ActionKind::Attack);
        assert_eq!(attack.effects()[0], Effect::Capture(sq(3, 0)));
        assert!(attack.is_complete());
    }

    #[test]
    fn snapshot_is_independent() {
        let mut pawn = Piece::new(PieceKind::Pawn, Team::Top, sq(1, 1));
        let action = Action::new(&pawn, sq(2, 1), ActionKind::Move);
        pawn.relocate(sq(3, 1));
        assert_eq!(action.origin(), sq(1, 1));
        assert!(!action.piece().has_moved());
    }

    #[test]
    fn attack_without_capture_is_incomplete() {
        let queen = Piece::new(PieceKind::Queen, Team::Top, sq(7, 7));
        let mut attack = Action::new(&queen, sq(7, 6), ActionKind::Attack);
        attack.clear_captures();
        assert!(!attack.is_complete());
    }

    #[test]
    fn castling_needs_two_relocations() {
        let king = Piece::new(PieceKind::King, Team::Bottom, sq(7, 4));
        let mut castle = Action::new(&king, sq(7, 6), ActionKind::Castling(CastleSide::Kingside));
        assert!(!castle.is_complete());
        castle.push_back(Effect::Relocate {
            from: sq(7, 7),
            to: sq(7, 5),
        });
        assert!(castle.is_complete());
    }

    #[test]
    fn effect_slots_are_ordered() {
        let pawn = Piece::new(PieceKind::Pawn, Team::Bottom, sq(3, 1));
        let mut action = Action::new(&pawn, sq(2, 0), ActionKind::Move);
        action.push_front(Effect::Capture(sq(3, 0)));
        action.push_back(Effect::Annotate("En Passant"));
        assert_eq!(action.effects()[0], Effect::Capture(sq(3, 0)));
        assert_eq!(action.effects()[2], Effect::Annotate("En Passant"));

        let plan = Plan::fold(action.effects());
        assert_eq!(plan.captures, vec![sq(3, 0)]);
        assert_eq!(plan.relocations, vec![(sq(3, 1), sq(2, 0))]);
        assert_eq!(plan.note, Some("En Passant"));
        assert!(!plan.await_promotion);
    }

    #[test]
    fn record_carries_promotion() {
        let pawn = Piece::new(PieceKind::Pawn, Team::Bottom, sq(1, 4));
        let mut action = Action::new(&pawn, sq(0, 4), ActionKind::Move);
        assert_eq!(action.record().to_compact(), "e7e8");
        action.set_promotion(Promotion::Queen);
        assert_eq!(action.record().to_compact(), "e7e8q");
    }
}
