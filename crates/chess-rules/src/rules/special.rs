//! Superior rules: en passant, castling and promotion.

use super::{Evaluation, Rule, Verdict};
use crate::action::{Action, ActionKind, Effect};
use crate::board::{Board, GameType};
use chess_core::{PieceKind, Square};

pub(super) fn en_passant(board: &Board, action: &mut Action, eval: Evaluation) -> Verdict {
    if action.kind() != ActionKind::Move {
        return Verdict::Invalid;
    }
    let piece = action.piece();
    let (team, from, target) = (piece.team(), piece.square(), action.target());
    if piece.kind() != PieceKind::Pawn {
        return Verdict::Invalid;
    }

    let Some(last) = board.last_action() else {
        return Verdict::NotPassed;
    };
    let last_piece = last.piece();
    if last.kind() != ActionKind::Move
        || last_piece.kind() != PieceKind::Pawn
        || last_piece.team() == team
        || last.origin().row().abs_diff(last.target().row()) != 2
    {
        return Verdict::NotPassed;
    }

    let bypassed = last.target();
    if bypassed.row() != from.row() || bypassed.col() != target.col() {
        return Verdict::NotPassed;
    }
    let diagonal = [1, -1]
        .into_iter()
        .any(|d_col| from.offset(team.forward(), d_col) == Some(target));
    if !diagonal || board.is_occupied(target) {
        return Verdict::NotPassed;
    }
    let victim_present = board
        .piece_at(bypassed)
        .is_some_and(|p| p.kind() == PieceKind::Pawn && p.team() != team);
    if !victim_present {
        return Verdict::NotPassed;
    }

    if eval == Evaluation::Commit {
        let mut effects = Vec::with_capacity(action.effects().len() + 1);
        effects.push(Effect::Capture(bypassed));
        effects.extend_from_slice(action.effects());
        if !board.is_safe_after(team, &effects) {
            return Verdict::NotPassed;
        }
    }

    action.push_front(Effect::Capture(bypassed));
    action.push_back(Effect::Annotate("En Passant"));
    Verdict::Passed
}

pub(super) fn castling(board: &Board, action: &mut Action) -> Verdict {
    let ActionKind::Castling(side) = action.kind() else {
        return Verdict::Invalid;
    };
    let king = action.piece();
    if king.kind() != PieceKind::King {
        return Verdict::Invalid;
    }
    let (team, king_from, king_moved) = (king.team(), king.square(), king.has_moved());

    let Some(rook) = board.castling_rook(team, king_from, side) else {
        return Verdict::Invalid;
    };
    let (rook_from, rook_moved) = (rook.square(), rook.has_moved());
    if king_moved || rook_moved || rook_from.row() != king_from.row() {
        return Verdict::NotPassed;
    }

    let row = king_from.row();
    let king_to = action.target();
    if king_to.row() != row {
        return Verdict::NotPassed;
    }
    let placed = match board.game_type() {
        GameType::Standard => {
            king_to.col() as i8 - king_from.col() as i8 == 2 * side.direction()
        }
        GameType::Shuffled => king_to.col() == side.king_destination_col(),
    };
    if !placed {
        return Verdict::NotPassed;
    }
    let Some(rook_to) = king_to.offset(0, -side.direction()) else {
        return Verdict::NotPassed;
    };

    let cols = [king_from.col(), rook_from.col(), king_to.col(), rook_to.col()];
    let (lo, hi) = (cols.iter().min(), cols.iter().max());
    let (Some(&lo), Some(&hi)) = (lo, hi) else {
        return Verdict::NotPassed;
    };
    let blocked = (lo..=hi)
        .filter_map(|col| Square::new(row, col))
        .any(|sq| sq != king_from && sq != rook_from && board.is_occupied(sq));
    if blocked {
        return Verdict::NotPassed;
    }

    let (first, last) = (king_from.col().min(king_to.col()), king_from.col().max(king_to.col()));
    let attacked = (first..=last)
        .filter_map(|col| Square::new(row, col))
        .any(|sq| board.is_square_under_attack(sq, team));
    if attacked {
        return Verdict::NotPassed;
    }

    action.clear_effects();
    action.push_back(Effect::Relocate {
        from: king_from,
        to: king_to,
    });
    action.push_front(Effect::Relocate {
        from: rook_from,
        to: rook_to,
    });
    action.push_back(Effect::Annotate("Castling"));
    Verdict::Passed
}

pub(super) fn pawn_promotion(board: &Board, action: &mut Action) -> Verdict {
    let piece = action.piece();
    if piece.kind() != PieceKind::Pawn {
        return Verdict::Invalid;
    }
    let team = piece.team();
    let underlying = match action.kind() {
        ActionKind::Move => Rule::Movement,
        ActionKind::Attack => Rule::Attack,
        ActionKind::Castling(_) => return Verdict::Invalid,
    };
    if action.target().row() != team.farthest_row() {
        return Verdict::NotPassed;
    }
    if underlying.evaluate(board, action, Evaluation::Commit) != Verdict::Passed {
        return Verdict::NotPassed;
    }
    if Rule::NoOverlap.evaluate(board, action, Evaluation::Commit) != Verdict::Passed {
        return Verdict::NotPassed;
    }
    let targets_king = board
        .piece_at(action.target())
        .is_some_and(|p| p.kind() == PieceKind::King);
    if targets_king || !board.is_safe_after(team, action.effects()) {
        return Verdict::NotPassed;
    }

    action.push_back(Effect::AwaitPromotion);
    Verdict::Passed
}
