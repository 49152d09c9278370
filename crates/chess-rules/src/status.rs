//! Check, checkmate, stalemate and draw detection.

use crate::action::{Action, ActionKind};
use crate::board::Board;
use crate::piece::Piece;
use crate::rules::{self, Evaluation, Rule, Verdict};
use chess_core::{PieceKind, Square, Team};
use serde::{Deserialize, Serialize};

/// Status of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Normal,
    Check,
    Checkmate,
    Stalemate,
    Draw,
}

impl GameStatus {
    /// Returns true if no further actions can be played.
    pub const fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Draw)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GameStatus::Normal => "normal",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::Draw => "draw",
        };
        f.write_str(s)
    }
}

impl Board {
    /// Returns true if any piece of the team opposing `defender` threatens
    /// `square`.
    ///
    /// An empty square is treated as if a `defender` piece stood on it. A
    /// defending pawn that just double-stepped onto `square` is also
    /// threatened by enemy pawns able to take it en passant.
    pub fn is_square_under_attack(&self, square: Square, defender: Team) -> bool {
        let threatened = self.pieces_of(defender.opposite()).any(|attacker| {
            let mut action = Action::new(attacker, square, ActionKind::Attack);
            rules::threatens(self, &mut action)
        });
        threatened || self.en_passant_threat(square, defender)
    }

    fn en_passant_threat(&self, square: Square, defender: Team) -> bool {
        let defended_pawn = self
            .piece_at(square)
            .is_some_and(|p| p.kind() == PieceKind::Pawn && p.team() == defender);
        if !defended_pawn {
            return false;
        }

        self.pieces_of(defender.opposite())
            .filter(|p| p.kind() == PieceKind::Pawn)
            .any(|pawn| {
                square
                    .offset(pawn.team().forward(), 0)
                    .is_some_and(|behind| {
                        let mut action = Action::new(pawn, behind, ActionKind::Move);
                        Rule::EnPassant.evaluate(self, &mut action, Evaluation::Threat)
                            == Verdict::Passed
                    })
            })
    }

    /// Returns true if `team`'s king is under attack. A board without that
    /// king is never in check.
    pub fn is_king_in_check(&self, team: Team) -> bool {
        self.king_of(team)
            .is_some_and(|king| self.is_square_under_attack(king.square(), team))
    }

    /// Returns true if `team` is in check and nothing can resolve it.
    pub fn is_checkmate(&self, team: Team) -> bool {
        let Some(king) = self.king_of(team) else {
            return false;
        };
        if !self.is_square_under_attack(king.square(), team) {
            return false;
        }

        // Capturing a checking piece is the cheapest way out; try it first.
        let king_square = king.square();
        let checkers: Vec<Square> = self
            .pieces_of(team.opposite())
            .filter(|p| {
                let mut action = Action::new(p, king_square, ActionKind::Attack);
                rules::threatens(self, &mut action)
            })
            .map(Piece::square)
            .collect();
        if checkers.iter().any(|&sq| self.can_capture(sq, team)) {
            return false;
        }

        !self.has_legal_action(team)
    }

    fn can_capture(&self, square: Square, team: Team) -> bool {
        self.pieces_of(team).any(|p| {
            let mut action = Action::new(p, square, ActionKind::Attack);
            rules::is_allowed(self, &mut action) && action.is_complete()
        })
    }

    /// Returns true if `team` is not in check but has no legal action.
    pub fn is_stalemate(&self, team: Team) -> bool {
        !self.is_king_in_check(team) && !self.has_legal_action(team)
    }

    /// Returns true if neither side has enough material to checkmate: king
    /// against king, king and one minor piece against king, or king and
    /// bishop against king and bishop with both bishops on one square color.
    pub fn is_draw(&self) -> bool {
        let others: Vec<&Piece> = self
            .pieces()
            .iter()
            .filter(|p| p.kind() != PieceKind::King)
            .collect();
        match others.as_slice() {
            [] => true,
            [piece] => piece.kind().is_minor(),
            [a, b] => {
                a.kind() == PieceKind::Bishop
                    && b.kind() == PieceKind::Bishop
                    && a.team() != b.team()
                    && a.square().same_color(b.square())
            }
            _ => false,
        }
    }

    /// Status of `team`, computed from scratch.
    pub fn status_of(&self, team: Team) -> GameStatus {
        if self.is_king_in_check(team) {
            if self.is_checkmate(team) {
                GameStatus::Checkmate
            } else {
                GameStatus::Check
            }
        } else if !self.has_legal_action(team) {
            GameStatus::Stalemate
        } else if self.is_draw() {
            GameStatus::Draw
        } else {
            GameStatus::Normal
        }
    }

    /// Status of the side to move. Cached until the board next changes.
    pub fn status(&self) -> GameStatus {
        if let Some((turn, status)) = self.status.get() {
            if turn == self.turn {
                return status;
            }
        }
        let status = self.status_of(self.side_to_move());
        self.status.set(Some((self.turn, status)));
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_notation(s).unwrap()
    }

    #[test]
    fn opening_squares() {
        let board = Board::standard(false);
        assert!(!board.is_square_under_attack(sq("e3"), Team::Bottom));
        assert!(board.is_square_under_attack(sq("e6"), Team::Bottom));
        assert!(board.is_square_under_attack(sq("f3"), Team::Top));
        assert!(!board.is_square_under_attack(sq("e4"), Team::Top));
        assert_eq!(board.status(), GameStatus::Normal);
    }

    #[test]
    fn pinned_piece_still_gives_check() {
        // The top knight on d6 is pinned by the rook on d1 but still checks e4.
        let board = Board::from_placement("3k4/8/3n4/8/4K3/8/8/3R4", false).unwrap();
        assert!(board.is_king_in_check(Team::Bottom));
        assert_eq!(board.status(), GameStatus::Check);
    }

    #[test]
    fn missing_king_is_never_in_check() {
        let board = Board::from_placement("8/8/8/8/8/8/8/R7", false).unwrap();
        assert!(!board.is_king_in_check(Team::Bottom));
        assert!(!board.is_checkmate(Team::Bottom));
    }

    #[test]
    fn en_passant_counts_as_a_threat() {
        let mut board = Board::from_placement("4k3/3p4/8/4P3/8/8/8/4K3", true).unwrap();
        board.select(sq("d7")).unwrap();
        board.attempt(sq("d5")).unwrap();
        assert!(board.is_square_under_attack(sq("d5"), Team::Top));
    }

    #[test]
    fn insufficient_material() {
        let cases = [
            ("4k3/8/8/8/8/8/8/4K3", true),
            ("4k3/8/8/8/8/8/8/3NK3", true),
            ("4k3/8/8/8/8/8/8/3BK3", true),
            ("4kb2/8/8/8/8/8/8/2B1K3", true),
            ("4k1b1/8/8/8/8/8/8/2B1K3", false),
            ("4k3/8/8/8/8/8/8/3RK3", false),
            ("4k3/8/8/8/8/8/4P3/4K3", false),
            ("4k3/8/8/8/8/8/8/2NNK3", false),
        ];
        for (placement, draw) in cases {
            let board = Board::from_placement(placement, false).unwrap();
            assert_eq!(board.is_draw(), draw, "{}", placement);
        }
    }

    #[test]
    fn status_cache_follows_changes() {
        let mut board = Board::from_placement("4k3/8/8/8/8/8/8/R3K3", false).unwrap();
        assert_eq!(board.status(), GameStatus::Normal);
        board.force_capture(sq("a1"));
        assert_eq!(board.status(), GameStatus::Draw);
        assert!(board.status().is_over());
    }
}
