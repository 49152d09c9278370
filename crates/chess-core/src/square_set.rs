//! Square set representation.
//!
//! A square set is a 64-bit integer where each bit marks one square of the
//! board, indexed by [`Square::index`].

use crate::Square;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// A set of board squares.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u64);

impl SquareSet {
    /// Empty set.
    pub const EMPTY: SquareSet = SquareSet(0);

    /// Every square of the board.
    pub const FULL: SquareSet = SquareSet(!0);

    /// Creates a set holding a single square.
    #[inline]
    pub const fn from_square(sq: Square) -> Self {
        SquareSet(1u64 << sq.index())
    }

    /// Returns true if the set is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of squares in the set.
    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if the given square is in the set.
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & (1u64 << sq.index())) != 0
    }

    /// Adds the given square.
    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.index();
    }

    /// Adds the square if it exists; convenient with offset math.
    #[inline]
    pub fn insert_opt(&mut self, sq: Option<Square>) {
        if let Some(sq) = sq {
            self.insert(sq);
        }
    }

    /// Removes the given square.
    #[inline]
    pub fn remove(&mut self, sq: Square) {
        self.0 &= !(1u64 << sq.index());
    }

    /// Removes and returns the lowest-indexed square.
    #[inline]
    pub fn pop_first(&mut self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            let index = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1;
            Square::from_index(index)
        }
    }

    /// Iterates over the squares in index order.
    #[inline]
    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self)
    }
}

impl BitAnd for SquareSet {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        SquareSet(self.0 & rhs.0)
    }
}

impl BitOr for SquareSet {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        SquareSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for SquareSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        let mut set = SquareSet::EMPTY;
        for sq in iter {
            set.insert(sq);
        }
        set
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the squares of a [`SquareSet`].
pub struct SquareSetIter(SquareSet);

impl Iterator for SquareSetIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_first()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.len();
        (count, Some(count))
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        SquareSetIter(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn insert_contains_remove() {
        let mut set = SquareSet::EMPTY;
        assert!(set.is_empty());
        set.insert(sq(2, 3));
        set.insert_opt(sq(0, 0).offset(-1, 0));
        assert!(set.contains(sq(2, 3)));
        assert_eq!(set.len(), 1);
        set.remove(sq(2, 3));
        assert!(set.is_empty());
    }

    #[test]
    fn iterates_in_index_order() {
        let set: SquareSet = [sq(7, 7), sq(0, 1), sq(3, 0)].into_iter().collect();
        let squares: Vec<Square> = set.iter().collect();
        assert_eq!(squares, vec![sq(0, 1), sq(3, 0), sq(7, 7)]);
        assert_eq!(SquareSet::FULL.len(), 64);
    }

    #[test]
    fn union_and_intersection() {
        let a = SquareSet::from_square(sq(1, 1));
        let b = SquareSet::from_square(sq(2, 2));
        assert_eq!((a | b).len(), 2);
        assert!((a & b).is_empty());
    }
}
