//! Rule evaluation.
//!
//! Every piece carries an ordered list of [`Rule`]s chosen by its kind. A rule
//! looks at the board and a proposed [`Action`] and returns a [`Verdict`].
//! Superior rules describe special moves (castling, en passant, promotion):
//! when one passes, the action is allowed outright and the effects it attached
//! replace whatever the ordinary rules would have done. Otherwise the action
//! is allowed only if no ordinary rule returns [`Verdict::NotPassed`].

mod ordinary;
mod special;

use crate::action::Action;
use crate::board::Board;
use chess_core::PieceKind;

/// Outcome of one rule for one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The rule's concern is satisfied.
    Passed,
    /// The rule's concern is violated.
    NotPassed,
    /// The rule does not apply to this action's category.
    Invalid,
}

/// Why a rule is being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Evaluation {
    /// The action may be committed.
    Commit,
    /// Only asking whether the piece threatens the target square. An empty
    /// target counts as a defender standing there, and king safety of the
    /// attacker is ignored: a pinned piece still gives check.
    Threat,
}

/// A single legality rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Moves land on an empty square of the piece's move set.
    Movement,
    /// Nothing stands between origin and target on a shared line.
    NoOverlap,
    /// Attacks land on an enemy piece in the piece's attack set.
    Attack,
    /// The target differs from the origin.
    NoChange,
    /// The action does not leave the mover's own king under attack.
    NoCheck,
    /// Attacks on a king never remove it.
    KingInvulnerability,
    /// Pawn capture of a pawn that just double-stepped past.
    EnPassant,
    /// King and rook relocation.
    Castling,
    /// Pawn reaching its farthest row.
    PawnPromotion,
}

static BASE_RULES: [Rule; 6] = [
    Rule::Movement,
    Rule::NoOverlap,
    Rule::Attack,
    Rule::NoChange,
    Rule::NoCheck,
    Rule::KingInvulnerability,
];

static KNIGHT_RULES: [Rule; 5] = [
    Rule::Movement,
    Rule::Attack,
    Rule::NoChange,
    Rule::NoCheck,
    Rule::KingInvulnerability,
];

static PAWN_RULES: [Rule; 8] = [
    Rule::Movement,
    Rule::NoOverlap,
    Rule::Attack,
    Rule::NoChange,
    Rule::NoCheck,
    Rule::KingInvulnerability,
    Rule::EnPassant,
    Rule::PawnPromotion,
];

static KING_RULES: [Rule; 7] = [
    Rule::Movement,
    Rule::NoOverlap,
    Rule::Attack,
    Rule::NoChange,
    Rule::NoCheck,
    Rule::KingInvulnerability,
    Rule::Castling,
];

/// Returns the rules a piece of `kind` is evaluated against.
pub fn for_kind(kind: PieceKind) -> &'static [Rule] {
    match kind {
        PieceKind::Pawn => &PAWN_RULES,
        PieceKind::Knight => &KNIGHT_RULES,
        PieceKind::King => &KING_RULES,
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => &BASE_RULES,
    }
}

impl Rule {
    /// Returns true for rules that override all ordinary rules when passed.
    #[inline]
    pub const fn is_superior(self) -> bool {
        matches!(self, Rule::EnPassant | Rule::Castling | Rule::PawnPromotion)
    }

    /// Evaluates this rule for an action about to be committed. May attach
    /// effects to the action.
    pub fn check(self, board: &Board, action: &mut Action) -> Verdict {
        self.evaluate(board, action, Evaluation::Commit)
    }

    /// Evaluates this rule in the given mode.
    pub fn evaluate(self, board: &Board, action: &mut Action, eval: Evaluation) -> Verdict {
        match self {
            Rule::Movement => ordinary::movement(board, action),
            Rule::NoOverlap => ordinary::no_overlap(board, action),
            Rule::Attack => ordinary::attack(board, action, eval),
            Rule::NoChange => ordinary::no_change(action),
            Rule::NoCheck => ordinary::no_check(board, action, eval),
            Rule::KingInvulnerability => ordinary::king_invulnerability(board, action, eval),
            Rule::EnPassant => special::en_passant(board, action, eval),
            Rule::Castling => special::castling(board, action),
            Rule::PawnPromotion => special::pawn_promotion(board, action),
        }
    }
}

/// Decides whether the acting piece may perform `action`.
///
/// A passing superior rule allows the action unconditionally; otherwise every
/// ordinary rule must pass or be invalid for the action.
pub fn is_allowed(board: &Board, action: &mut Action) -> bool {
    let rules = action.piece().rules();

    if rules
        .iter()
        .filter(|rule| rule.is_superior())
        .any(|rule| rule.evaluate(board, action, Evaluation::Commit) == Verdict::Passed)
    {
        return true;
    }

    rules
        .iter()
        .filter(|rule| !rule.is_superior())
        .all(|rule| rule.evaluate(board, action, Evaluation::Commit) != Verdict::NotPassed)
}

/// Decides whether the acting piece threatens the action's target.
pub(crate) fn threatens(board: &Board, action: &mut Action) -> bool {
    let rules = action.piece().rules();
    rules
        .iter()
        .filter(|rule| !rule.is_superior())
        .all(|rule| rule.evaluate(board, action, Evaluation::Threat) != Verdict::NotPassed)
}
