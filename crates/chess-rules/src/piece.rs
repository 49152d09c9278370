//! Pieces on the board.

use crate::geometry::{self, Reach};
use crate::rules::{self, Rule};
use chess_core::{PieceKind, PlacedPiece, Square, SquareSet, Team};

/// Lifecycle state of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PieceState {
    #[default]
    Alive,
    Selected,
    Captured,
    Promoted,
}

/// A piece with its cached reach.
///
/// The move and attack sets always describe the piece's current square and
/// move history: [`Piece::relocate`] is the only way to change the square and
/// it recomputes both sets before returning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    team: Team,
    square: Square,
    has_moved: bool,
    state: PieceState,
    reach: Reach,
    rules: &'static [Rule],
}

impl Piece {
    /// Creates an unmoved piece.
    pub fn new(kind: PieceKind, team: Team, square: Square) -> Self {
        Piece {
            kind,
            team,
            square,
            has_moved: false,
            state: PieceState::Alive,
            reach: geometry::reach(kind, team, square, false),
            rules: rules::for_kind(kind),
        }
    }

    /// Creates a piece dropped onto the board outside of play. A pawn away
    /// from its starting row has lost its double step.
    pub fn placed_on(kind: PieceKind, team: Team, square: Square) -> Self {
        let piece = Piece::new(kind, team, square);
        if kind == PieceKind::Pawn && square.row() != team.pawn_row() {
            piece.moved()
        } else {
            piece
        }
    }

    /// Returns the same piece flagged as already moved.
    pub fn moved(mut self) -> Self {
        self.has_moved = true;
        self.recompute();
        self
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn team(&self) -> Team {
        self.team
    }

    #[inline]
    pub fn square(&self) -> Square {
        self.square
    }

    #[inline]
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    #[inline]
    pub fn state(&self) -> PieceState {
        self.state
    }

    /// Squares this piece may move to, ignoring occupancy and king safety.
    #[inline]
    pub fn possible_moves(&self) -> SquareSet {
        self.reach.moves
    }

    /// Squares this piece may attack, ignoring occupancy and king safety.
    #[inline]
    pub fn possible_attacks(&self) -> SquareSet {
        self.reach.attacks
    }

    /// The rules evaluated for this piece, in order.
    #[inline]
    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Returns true if the piece stands on `square`.
    #[inline]
    pub fn is_at(&self, square: Square) -> bool {
        self.square == square
    }

    /// Moves the piece and recomputes its reach. A relocation onto its own
    /// square still counts as a move; shuffled castling can leave the king
    /// where it stood.
    pub fn relocate(&mut self, to: Square) {
        self.square = to;
        self.has_moved = true;
        self.recompute();
    }

    pub(crate) fn set_state(&mut self, state: PieceState) {
        self.state = state;
    }

    /// Returns the placement description of this piece.
    pub fn placed(&self) -> PlacedPiece {
        PlacedPiece {
            kind: self.kind,
            team: self.team,
            square: self.square,
        }
    }

    fn recompute(&mut self) {
        self.reach = geometry::reach(self.kind, self.team, self.square, self.has_moved);
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.team, self.kind, self.square)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn relocation_recomputes_reach() {
        let mut pawn = Piece::new(PieceKind::Pawn, Team::Bottom, sq(6, 4));
        assert!(!pawn.has_moved());
        assert_eq!(pawn.possible_moves().len(), 2);

        pawn.relocate(sq(5, 4));
        assert!(pawn.has_moved());
        assert_eq!(pawn.possible_moves().len(), 1);
        assert!(pawn.possible_moves().contains(sq(4, 4)));
        assert!(pawn.possible_attacks().contains(sq(4, 3)));
    }

    #[test]
    fn relocating_in_place_is_a_move() {
        let mut rook = Piece::new(PieceKind::Rook, Team::Top, sq(0, 0));
        rook.relocate(sq(0, 0));
        assert!(rook.has_moved());
        assert!(rook.is_at(sq(0, 0)));
    }

    #[test]
    fn moved_flag_shrinks_pawn_reach() {
        let pawn = Piece::new(PieceKind::Pawn, Team::Top, sq(1, 0)).moved();
        assert!(pawn.has_moved());
        assert_eq!(pawn.possible_moves().len(), 1);
    }

    #[test]
    fn rules_follow_kind() {
        let knight = Piece::new(PieceKind::Knight, Team::Top, sq(0, 1));
        assert!(!knight.rules().contains(&Rule::NoOverlap));

        let king = Piece::new(PieceKind::King, Team::Top, sq(0, 4));
        assert!(king.rules().contains(&Rule::Castling));

        let pawn = Piece::new(PieceKind::Pawn, Team::Top, sq(1, 4));
        assert!(pawn.rules().contains(&Rule::EnPassant));
        assert!(pawn.rules().contains(&Rule::PawnPromotion));
        assert!(pawn.rules().contains(&Rule::NoOverlap));
    }

    #[test]
    fn display() {
        let queen = Piece::new(PieceKind::Queen, Team::Bottom, sq(7, 3));
        assert_eq!(queen.to_string(), "Bottom Queen d1");
        assert_eq!(queen.state(), PieceState::Alive);
    }
}
