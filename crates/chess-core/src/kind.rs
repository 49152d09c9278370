//! Piece kinds and promotion choices.

use crate::{NotationError, Team};
use serde::{Deserialize, Serialize};

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Returns the index of this kind (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the placement character for this kind on the given team.
    ///
    /// Top pieces are lowercase, Bottom pieces uppercase.
    pub const fn to_char(self, team: Team) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match team {
            Team::Top => c,
            Team::Bottom => c.to_ascii_uppercase(),
        }
    }

    /// Parses a placement character into a kind and team.
    pub const fn from_char(c: char) -> Option<(PieceKind, Team)> {
        let team = if c.is_ascii_uppercase() {
            Team::Bottom
        } else {
            Team::Top
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, team))
    }

    /// Returns true for pieces that slide along rays (bishop, rook, queen).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Returns true for the minor pieces (knight, bishop).
    #[inline]
    pub const fn is_minor(self) -> bool {
        matches!(self, PieceKind::Knight | PieceKind::Bishop)
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// The kinds a pawn may be promoted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    /// All promotion choices, strongest first.
    pub const ALL: [Promotion; 4] = [
        Promotion::Queen,
        Promotion::Rook,
        Promotion::Bishop,
        Promotion::Knight,
    ];

    /// Returns the piece kind this choice converts to.
    #[inline]
    pub const fn kind(self) -> PieceKind {
        match self {
            Promotion::Queen => PieceKind::Queen,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Knight => PieceKind::Knight,
        }
    }

    /// Returns the single-character wire code (lowercase).
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            Promotion::Queen => 'q',
            Promotion::Rook => 'r',
            Promotion::Bishop => 'b',
            Promotion::Knight => 'n',
        }
    }

    /// Parses a wire code, accepting either case.
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'q' => Some(Promotion::Queen),
            'r' => Some(Promotion::Rook),
            'b' => Some(Promotion::Bishop),
            'n' => Some(Promotion::Knight),
            _ => None,
        }
    }
}

impl TryFrom<String> for Promotion {
    type Error = NotationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Promotion::from_char(c).ok_or(NotationError::InvalidPromotion(c)),
            _ => Err(NotationError::InvalidLength(value.len())),
        }
    }
}

impl From<Promotion> for String {
    fn from(value: Promotion) -> Self {
        value.to_char().to_string()
    }
}

impl std::fmt::Display for Promotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind())
    }
}

/// The side of the king a castling move goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// Returns the column the king lands on after castling to this side.
    #[inline]
    pub const fn king_destination_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    /// Returns the column delta pointing from the king toward this side.
    #[inline]
    pub const fn direction(self) -> i8 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }
}

impl std::fmt::Display for CastleSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CastleSide::Kingside => write!(f, "O-O"),
            CastleSide::Queenside => write!(f, "O-O-O"),
        }
    }
}
