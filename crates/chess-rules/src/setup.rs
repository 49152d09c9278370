//! Starting layouts.

use crate::board::{Board, GameType};
use crate::piece::Piece;
use chess_core::{LayoutError, PieceKind, Placement, Square, Team, BOARD_LENGTH};
use rand::Rng;
use tracing::debug;

/// Back row of the standard layout, column 0 first.
pub const STANDARD_BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// Creates a board with no pieces.
    pub fn empty(top_first: bool) -> Self {
        let mut board = Board::new();
        board.setup_empty(top_first);
        board
    }

    /// Creates a board with the standard starting layout.
    pub fn standard(top_first: bool) -> Self {
        let mut board = Board::new();
        board.setup_standard(top_first);
        board
    }

    /// Creates a board with a randomized back row.
    pub fn shuffled<R: Rng + ?Sized>(top_first: bool, rng: &mut R) -> Self {
        let mut board = Board::new();
        board.setup_shuffled(top_first, rng);
        board
    }

    /// Creates a board from placement text.
    pub fn from_placement(text: &str, top_first: bool) -> Result<Self, LayoutError> {
        let mut board = Board::new();
        board.setup_placement(text, top_first)?;
        Ok(board)
    }

    /// Removes every piece and resets turn, history and transient state.
    pub fn setup_empty(&mut self, top_first: bool) {
        let mut board = Board::default();
        board.top_first = top_first;
        *self = board;
    }

    pub fn setup_standard(&mut self, top_first: bool) {
        self.setup_empty(top_first);
        self.fill(&STANDARD_BACK_ROW);
        debug!(top_first, "standard layout");
    }

    /// Sets up a randomized back row, mirrored for both teams: bishops on
    /// opposite square colors and the king between the two rooks.
    pub fn setup_shuffled<R: Rng + ?Sized>(&mut self, top_first: bool, rng: &mut R) {
        let back_row = shuffled_back_row(rng);
        self.setup_empty(top_first);
        self.game_type = GameType::Shuffled;
        self.fill(&back_row);
        debug!(top_first, ?back_row, "shuffled layout");
    }

    /// Sets up the pieces named by placement text. Pawns off their starting
    /// row count as moved; every other piece starts unmoved.
    pub fn setup_placement(&mut self, text: &str, top_first: bool) -> Result<(), LayoutError> {
        let placement = Placement::parse(text)?;
        self.setup_empty(top_first);
        for placed in placement.pieces() {
            self.pieces
                .push(Piece::placed_on(placed.kind, placed.team, placed.square));
        }
        Ok(())
    }

    fn fill(&mut self, back_row: &[PieceKind; 8]) {
        for team in Team::ALL {
            for col in 0..BOARD_LENGTH {
                let squares = (
                    Square::new(team.back_row(), col),
                    Square::new(team.pawn_row(), col),
                );
                if let (Some(back), Some(front)) = squares {
                    self.pieces.push(Piece::new(back_row[col as usize], team, back));
                    self.pieces.push(Piece::new(PieceKind::Pawn, team, front));
                }
            }
        }
    }
}

/// Draws a back row: one bishop on each square color, then queen and knights
/// on random free columns, and the remaining three columns filled rook, king,
/// rook from left to right.
pub fn shuffled_back_row<R: Rng + ?Sized>(rng: &mut R) -> [PieceKind; 8] {
    let mut row: [Option<PieceKind>; 8] = [None; 8];
    row[rng.gen_range(0..4) * 2] = Some(PieceKind::Bishop);
    row[rng.gen_range(0..4) * 2 + 1] = Some(PieceKind::Bishop);

    for kind in [PieceKind::Queen, PieceKind::Knight, PieceKind::Knight] {
        let free: Vec<usize> = (0..8).filter(|&col| row[col].is_none()).collect();
        let col = free[rng.gen_range(0..free.len())];
        row[col] = Some(kind);
    }

    let mut rest = [PieceKind::Rook, PieceKind::King, PieceKind::Rook].into_iter();
    for slot in row.iter_mut().filter(|slot| slot.is_none()) {
        *slot = rest.next();
    }
    row.map(|slot| slot.unwrap_or(PieceKind::Rook))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn standard_layout() {
        let board = Board::standard(false);
        assert_eq!(board.pieces().len(), 32);
        assert_eq!(board.placement(), Placement::STANDARD);
        assert_eq!(board.game_type(), GameType::Standard);
        assert!(board.pieces().iter().all(|p| !p.has_moved()));
    }

    #[test]
    fn empty_layout_keeps_order_flag() {
        let board = Board::empty(true);
        assert!(board.pieces().is_empty());
        assert!(board.is_top_turn());
    }

    #[test]
    fn shuffled_rows_are_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let row = shuffled_back_row(&mut rng);
            let cols = |kind: PieceKind| -> Vec<usize> {
                (0..8).filter(|&c| row[c] == kind).collect()
            };

            let bishops = cols(PieceKind::Bishop);
            assert_eq!(bishops.len(), 2);
            assert_ne!(bishops[0] % 2, bishops[1] % 2);

            let rooks = cols(PieceKind::Rook);
            let king = cols(PieceKind::King);
            assert_eq!(rooks.len(), 2);
            assert_eq!(king.len(), 1);
            assert!(rooks[0] < king[0] && king[0] < rooks[1]);
            assert_eq!(cols(PieceKind::Knight).len(), 2);
            assert_eq!(cols(PieceKind::Queen).len(), 1);
        }
    }

    #[test]
    fn shuffled_board_mirrors_teams() {
        let mut rng = StdRng::seed_from_u64(42);
        let board = Board::shuffled(false, &mut rng);
        assert_eq!(board.game_type(), GameType::Shuffled);
        assert_eq!(board.pieces().len(), 32);
        for col in 0..8 {
            let top = board.piece_at(Square::new(0, col).unwrap()).unwrap();
            let bottom = board.piece_at(Square::new(7, col).unwrap()).unwrap();
            assert_eq!(top.kind(), bottom.kind());
            assert_eq!(top.team(), Team::Top);
            assert_eq!(bottom.team(), Team::Bottom);
        }
    }

    #[test]
    fn placement_marks_advanced_pawns() {
        let board = Board::from_placement("4k3/8/8/4p3/8/8/3P4/4K3", false).unwrap();
        assert!(board.piece_at(Square::new(3, 4).unwrap()).unwrap().has_moved());
        assert!(!board.piece_at(Square::new(6, 3).unwrap()).unwrap().has_moved());
        assert!(!board.piece_at(Square::new(7, 4).unwrap()).unwrap().has_moved());
    }

    #[test]
    fn bad_placement_is_rejected() {
        assert!(Board::from_placement("8/8/8", false).is_err());
        assert!(Board::from_placement("8/8/8/8/8/8/8/7x", false).is_err());
    }
}
