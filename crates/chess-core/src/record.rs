//! Wire record of a committed action.

use crate::{Promotion, Square};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when parsing squares, promotions or records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid square: '{0}'")]
    InvalidSquare(String),

    #[error("invalid promotion character: '{0}'")]
    InvalidPromotion(char),

    #[error("invalid length: {0}")]
    InvalidLength(usize),
}

/// A committed action as exchanged with a remote peer.
///
/// Holds the source square, the destination square and, if the action put a
/// pawn on its farthest row, the promotion choice that resolved it. Castling
/// is recorded as the king's own relocation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<Promotion>,
}

impl MoveRecord {
    /// Creates a record without a promotion.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        MoveRecord {
            from,
            to,
            promotion: None,
        }
    }

    /// Returns the same record carrying a promotion choice.
    #[inline]
    pub const fn with_promotion(self, promotion: Promotion) -> Self {
        MoveRecord {
            promotion: Some(promotion),
            ..self
        }
    }

    /// Returns the compact notation for this record (e.g., "e2e4", "e7e8q").
    pub fn to_compact(self) -> String {
        match self.promotion {
            Some(p) => format!("{}{}{}", self.from, self.to, p.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Parses a record from compact notation.
    pub fn parse(s: &str) -> Result<Self, NotationError> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return Err(NotationError::InvalidLength(s.len()));
        }
        let from = Square::from_notation(&s[0..2])
            .ok_or_else(|| NotationError::InvalidSquare(s[0..2].to_string()))?;
        let to = Square::from_notation(&s[2..4])
            .ok_or_else(|| NotationError::InvalidSquare(s[2..4].to_string()))?;
        let promotion = match s[4..].chars().next() {
            Some(c) => Some(Promotion::from_char(c).ok_or(NotationError::InvalidPromotion(c))?),
            None => None,
        };
        Ok(MoveRecord {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Debug for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveRecord({})", self.to_compact())
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_compact())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_notation(s).unwrap()
    }

    #[test]
    fn compact_notation() {
        let m = MoveRecord::new(sq("e2"), sq("e4"));
        assert_eq!(m.to_compact(), "e2e4");

        let promo = MoveRecord::new(sq("e7"), sq("e8")).with_promotion(Promotion::Queen);
        assert_eq!(promo.to_compact(), "e7e8q");
        assert_eq!(format!("{:?}", promo), "MoveRecord(e7e8q)");
    }

    #[test]
    fn parse_compact() {
        let m = MoveRecord::parse("e2e4").unwrap();
        assert_eq!(m.from, sq("e2"));
        assert_eq!(m.to, sq("e4"));
        assert_eq!(m.promotion, None);

        let promo = MoveRecord::parse("a2a1N").unwrap();
        assert_eq!(promo.promotion, Some(Promotion::Knight));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(
            MoveRecord::parse("e2"),
            Err(NotationError::InvalidLength(2))
        );
        assert_eq!(
            MoveRecord::parse("e2e4qq"),
            Err(NotationError::InvalidLength(6))
        );
        assert_eq!(
            MoveRecord::parse("e2e9"),
            Err(NotationError::InvalidSquare("e9".to_string()))
        );
        assert_eq!(
            MoveRecord::parse("e7e8k"),
            Err(NotationError::InvalidPromotion('k'))
        );
    }

    #[test]
    fn json_shape() {
        let m = MoveRecord::new(sq("g1"), sq("f3"));
        assert_eq!(
            serde_json::to_string(&m).unwrap(),
            r#"{"from":"g1","to":"f3"}"#
        );

        let promo: MoveRecord =
            serde_json::from_str(r#"{"from":"b7","to":"b8","promotion":"r"}"#).unwrap();
        assert_eq!(promo.promotion, Some(Promotion::Rook));

        assert!(serde_json::from_str::<MoveRecord>(r#"{"from":"b7","to":"b9"}"#).is_err());
    }
}
