//! Team representation.

use crate::square::BOARD_LENGTH;

/// The two sides of the board.
///
/// Top and bottom name the starting sides, not a score. Top starts on rows 0
/// and 1 and advances toward higher rows; Bottom starts on rows 6 and 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Team {
    Top = 0,
    Bottom = 1,
}

impl Team {
    /// Both teams in order.
    pub const ALL: [Team; 2] = [Team::Top, Team::Bottom];

    /// Returns the opposing team.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Team::Top => Team::Bottom,
            Team::Bottom => Team::Top,
        }
    }

    /// Returns the index (0 for Top, 1 for Bottom).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the row delta of a forward pawn step (+1 for Top, -1 for Bottom).
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Team::Top => 1,
            Team::Bottom => -1,
        }
    }

    /// Returns the row holding this team's major pieces at setup.
    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Team::Top => 0,
            Team::Bottom => BOARD_LENGTH - 1,
        }
    }

    /// Returns the row holding this team's pawns at setup.
    #[inline]
    pub const fn pawn_row(self) -> u8 {
        match self {
            Team::Top => 1,
            Team::Bottom => BOARD_LENGTH - 2,
        }
    }

    /// Returns the row a pawn of this team promotes on.
    #[inline]
    pub const fn farthest_row(self) -> u8 {
        self.opposite().back_row()
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::Top => write!(f, "Top"),
            Team::Bottom => write!(f, "Bottom"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_team() {
        assert_eq!(Team::Top.opposite(), Team::Bottom);
        assert_eq!(Team::Bottom.opposite(), Team::Top);
    }

    #[test]
    fn forward_direction() {
        assert_eq!(Team::Top.forward(), 1);
        assert_eq!(Team::Bottom.forward(), -1);
    }

    #[test]
    fn rows() {
        assert_eq!(Team::Top.back_row(), 0);
        assert_eq!(Team::Top.pawn_row(), 1);
        assert_eq!(Team::Top.farthest_row(), 7);
        assert_eq!(Team::Bottom.back_row(), 7);
        assert_eq!(Team::Bottom.pawn_row(), 6);
        assert_eq!(Team::Bottom.farthest_row(), 0);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Team::Top), "Top");
        assert_eq!(format!("{}", Team::Bottom), "Bottom");
    }
}
