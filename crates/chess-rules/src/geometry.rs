//! Pseudo-legal destination geometry for every piece kind.
//!
//! Each kind derives two square sets from its own square, team and move
//! history: the squares it may move to and the squares it may attack. Board
//! occupancy is ignored here; rays only stop at the board edge. Blocking,
//! captures and king safety are the business of the rules.

use chess_core::{PieceKind, Square, SquareSet, Team};

/// Knight jump offsets: (row delta, col delta).
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
];

/// King step offsets: (row delta, col delta).
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Orthogonal ray directions.
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Diagonal ray directions.
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Destination sets of one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reach {
    /// Squares the piece may move to.
    pub moves: SquareSet,
    /// Squares the piece may attack.
    pub attacks: SquareSet,
}

/// Computes the reach of a piece of `kind` standing on `from`.
pub fn reach(kind: PieceKind, team: Team, from: Square, has_moved: bool) -> Reach {
    match kind {
        PieceKind::Pawn => pawn_reach(team, from, has_moved),
        PieceKind::Knight => symmetric(offsets(from, &KNIGHT_OFFSETS)),
        PieceKind::King => symmetric(offsets(from, &KING_OFFSETS)),
        PieceKind::Rook => symmetric(rays(from, &ROOK_DIRECTIONS)),
        PieceKind::Bishop => symmetric(rays(from, &BISHOP_DIRECTIONS)),
        PieceKind::Queen => symmetric(rays(from, &ROOK_DIRECTIONS) | rays(from, &BISHOP_DIRECTIONS)),
    }
}

fn symmetric(squares: SquareSet) -> Reach {
    Reach {
        moves: squares,
        attacks: squares,
    }
}

fn offsets(from: Square, deltas: &[(i8, i8)]) -> SquareSet {
    let mut set = SquareSet::EMPTY;
    for &(d_row, d_col) in deltas {
        set.insert_opt(from.offset(d_row, d_col));
    }
    set
}

fn rays(from: Square, directions: &[(i8, i8)]) -> SquareSet {
    let mut set = SquareSet::EMPTY;
    for &(d_row, d_col) in directions {
        let mut current = from;
        while let Some(next) = current.offset(d_row, d_col) {
            set.insert(next);
            current = next;
        }
    }
    set
}

fn pawn_reach(team: Team, from: Square, has_moved: bool) -> Reach {
    let forward = team.forward();
    let mut moves = SquareSet::EMPTY;
    moves.insert_opt(from.offset(forward, 0));
    if !has_moved {
        moves.insert_opt(from.offset(2 * forward, 0));
    }

    let mut attacks = SquareSet::EMPTY;
    attacks.insert_opt(from.offset(forward, 1));
    attacks.insert_opt(from.offset(forward, -1));

    Reach { moves, attacks }
}

/// Returns the squares strictly between `from` and `to` when both lie on one
/// rank, file or diagonal; `None` otherwise.
pub fn between(from: Square, to: Square) -> Option<SquareSet> {
    let d_row = to.row() as i8 - from.row() as i8;
    let d_col = to.col() as i8 - from.col() as i8;
    if d_row == 0 && d_col == 0 {
        return Some(SquareSet::EMPTY);
    }
    if d_row != 0 && d_col != 0 && d_row.abs() != d_col.abs() {
        return None;
    }

    let step = (d_row.signum(), d_col.signum());
    let mut set = SquareSet::EMPTY;
    let mut current = from;
    while let Some(next) = current.offset(step.0, step.1) {
        if next == to {
            break;
        }
        set.insert(next);
        current = next;
    }
    Some(set)
}
