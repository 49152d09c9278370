//! Rules every piece is checked against.

use super::{Evaluation, Verdict};
use crate::action::{Action, ActionKind};
use crate::board::Board;
use crate::geometry;
use chess_core::PieceKind;

fn verdict(passed: bool) -> Verdict {
    if passed {
        Verdict::Passed
    } else {
        Verdict::NotPassed
    }
}

pub(super) fn movement(board: &Board, action: &Action) -> Verdict {
    match action.kind() {
        ActionKind::Attack => Verdict::Invalid,
        // Castling is only ever allowed by its own rule.
        ActionKind::Castling(_) => Verdict::NotPassed,
        ActionKind::Move => {
            let target = action.target();
            verdict(action.piece().possible_moves().contains(target) && !board.is_occupied(target))
        }
    }
}

pub(super) fn no_overlap(board: &Board, action: &Action) -> Verdict {
    match geometry::between(action.origin(), action.target()) {
        Some(path) => verdict(!path.iter().any(|sq| board.is_occupied(sq))),
        None => Verdict::Passed,
    }
}

pub(super) fn attack(board: &Board, action: &Action, eval: Evaluation) -> Verdict {
    if action.kind() != ActionKind::Attack {
        return Verdict::Invalid;
    }
    let piece = action.piece();
    let target = action.target();
    if !piece.possible_attacks().contains(target) {
        return Verdict::NotPassed;
    }

    match board.piece_at(target) {
        Some(occupant) => verdict(occupant.team() != piece.team()),
        None => verdict(eval == Evaluation::Threat),
    }
}

pub(super) fn no_change(action: &Action) -> Verdict {
    verdict(action.target() != action.origin())
}

pub(super) fn no_check(board: &Board, action: &Action, eval: Evaluation) -> Verdict {
    if eval == Evaluation::Threat {
        return Verdict::Invalid;
    }
    if let ActionKind::Castling(_) = action.kind() {
        return Verdict::Invalid;
    }
    verdict(board.is_safe_after(action.piece().team(), action.effects()))
}

pub(super) fn king_invulnerability(board: &Board, action: &mut Action, eval: Evaluation) -> Verdict {
    if eval == Evaluation::Threat || action.kind() != ActionKind::Attack {
        return Verdict::Invalid;
    }

    let team = action.piece().team();
    let targets_king = board
        .piece_at(action.target())
        .is_some_and(|p| p.kind() == PieceKind::King && p.team() != team);
    if targets_king {
        tracing::debug!(action = %action, "attack on a king, dropping the capture");
        action.clear_captures();
    }
    Verdict::Passed
}
