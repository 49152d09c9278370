//! Property tests over geometry and random legal play.

use chess_core::{PieceKind, Promotion, Square, Team, BOARD_LENGTH};
use chess_rules::geometry::{between, reach};
use chess_rules::Board;
use proptest::prelude::*;

fn any_square() -> impl Strategy<Value = Square> {
    (0..BOARD_LENGTH, 0..BOARD_LENGTH).prop_map(|(row, col)| Square::new(row, col).unwrap())
}

fn any_kind() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

fn any_team() -> impl Strategy<Value = Team> {
    prop::sample::select(Team::ALL.to_vec())
}

/// Every legal (from, to) pair of the side to move, in a stable order.
fn legal_pairs(board: &Board) -> Vec<(Square, Square)> {
    let mut pairs: Vec<(Square, Square)> = board
        .pieces_of(board.side_to_move())
        .flat_map(|p| {
            let from = p.square();
            board.legal_targets(from).iter().map(move |to| (from, to))
        })
        .collect();
    pairs.sort();
    pairs
}

/// Plays one legal action chosen by `choice`; returns false when none exist.
fn play_one(board: &mut Board, choice: usize) -> bool {
    let pairs = legal_pairs(board);
    if pairs.is_empty() {
        return false;
    }
    let (from, to) = pairs[choice % pairs.len()];
    board.select(from).unwrap();
    board.attempt(to).unwrap();
    if board.is_promoting() {
        board.promote(Promotion::ALL[choice % Promotion::ALL.len()]).unwrap();
    }
    true
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reach_never_includes_origin(
        kind in any_kind(),
        team in any_team(),
        from in any_square(),
        moved in any::<bool>(),
    ) {
        let r = reach(kind, team, from, moved);
        prop_assert!(!r.moves.contains(from));
        prop_assert!(!r.attacks.contains(from));
        if kind != PieceKind::Pawn {
            prop_assert_eq!(r.moves, r.attacks);
        }
    }

    #[test]
    fn between_excludes_endpoints(from in any_square(), to in any_square()) {
        if let Some(path) = between(from, to) {
            prop_assert!(!path.contains(from));
            prop_assert!(!path.contains(to));
            let d_row = from.row().abs_diff(to.row()) as usize;
            let d_col = from.col().abs_diff(to.col()) as usize;
            prop_assert_eq!(path.len(), d_row.max(d_col).saturating_sub(1));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn random_play_never_exposes_a_king(choices in prop::collection::vec(any::<usize>(), 1..24)) {
        let mut board = Board::standard(false);
        for choice in choices {
            let mover = board.side_to_move();
            let king_targets = legal_pairs(&board)
                .into_iter()
                .filter(|&(_, to)| board.piece_at(to).is_some_and(|p| p.kind() == PieceKind::King))
                .count();
            prop_assert_eq!(king_targets, 0);
            if !play_one(&mut board, choice) {
                break;
            }
            prop_assert!(!board.is_king_in_check(mover));
            prop_assert_eq!(board.history().len() as u32, board.turn());
            prop_assert_eq!(board.pieces().iter().filter(|p| p.kind() == PieceKind::King).count(), 2);
        }
    }

    #[test]
    fn deep_copy_matches_original(choices in prop::collection::vec(any::<usize>(), 0..12)) {
        let mut board = Board::standard(true);
        for choice in choices {
            if !play_one(&mut board, choice) {
                break;
            }
        }

        let copy = board.deep_copy();
        prop_assert_eq!(copy.placement(), board.placement());
        prop_assert_eq!(copy.history(), board.history());
        prop_assert_eq!(copy.turn(), board.turn());
        prop_assert_eq!(copy.status(), board.status());

        let mut restored = Board::new();
        restored.restore(copy);
        prop_assert_eq!(restored.legal_targets(Square::new(7, 6).unwrap()), board.legal_targets(Square::new(7, 6).unwrap()));
    }
}
