//! An 81-bit set of grid cells.
//!
//! [`BitIndex`] splits the grid into three bands of three rows and stores each
//! band in the low 27 bits of a `u32`. Union, intersection and the size of an
//! intersection are then three word operations each, which is what the
//! aligned-set search uses to intersect excluder sets on every step.
//!
//! # Examples
//!
//! ```
//! use aligned_core::{BitIndex, Position};
//!
//! let a = BitIndex::peers(Position::new(0, 0));
//! let b = BitIndex::peers(Position::new(8, 0));
//!
//! // The two corners of row 0 share the other seven cells of that row.
//! assert_eq!(a.intersection_len(b), 7);
//! ```

use std::{
    fmt,
    iter::FusedIterator,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub},
};

use crate::Position;

const WORD_MASK: u32 = (1 << 27) - 1;

/// A set of grid cells as three 27-bit words.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BitIndex {
    words: [u32; 3],
}

static PEERS: [BitIndex; 81] = {
    let mut peers = [BitIndex::EMPTY; 81];
    let mut i = 0;
    while i < 81 {
        let pos = Position::ALL[i];
        let mut j = 0;
        while j < 81 {
            let other = Position::ALL[j];
            if i != j
                && (pos.x() == other.x()
                    || pos.y() == other.y()
                    || pos.box_index() == other.box_index())
            {
                peers[i] = peers[i].with(other);
            }
            j += 1;
        }
        i += 1;
    }
    peers
};

impl BitIndex {
    /// The empty set.
    pub const EMPTY: Self = Self { words: [0; 3] };
    /// The set of all 81 cells.
    pub const FULL: Self = Self {
        words: [WORD_MASK; 3],
    };

    #[inline]
    const fn locate(pos: Position) -> (usize, u32) {
        let index = pos.index();
        (index / 27, 1 << (index % 27))
    }

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a set containing a single cell.
    #[must_use]
    pub const fn from_elem(pos: Position) -> Self {
        Self::EMPTY.with(pos)
    }

    /// Returns a copy of `self` with `pos` added.
    #[must_use]
    pub const fn with(self, pos: Position) -> Self {
        let (word, bit) = Self::locate(pos);
        let mut words = self.words;
        words[word] |= bit;
        Self { words }
    }

    /// Returns the siblings of `pos`: the 20 other cells in its row, column
    /// and box.
    #[must_use]
    #[inline]
    pub fn peers(pos: Position) -> Self {
        PEERS[pos.index()]
    }

    /// Adds a cell. Returns `true` if it was not already present.
    #[inline]
    pub fn insert(&mut self, pos: Position) -> bool {
        let (word, bit) = Self::locate(pos);
        let added = self.words[word] & bit == 0;
        self.words[word] |= bit;
        added
    }

    /// Removes a cell. Returns `true` if it was present.
    #[inline]
    pub fn remove(&mut self, pos: Position) -> bool {
        let (word, bit) = Self::locate(pos);
        let removed = self.words[word] & bit != 0;
        self.words[word] &= !bit;
        removed
    }

    /// Returns `true` if the set contains `pos`.
    #[must_use]
    #[inline]
    pub const fn contains(self, pos: Position) -> bool {
        let (word, bit) = Self::locate(pos);
        self.words[word] & bit != 0
    }

    /// Returns the number of cells in the set.
    #[must_use]
    #[inline]
    pub const fn len(self) -> usize {
        (self.words[0].count_ones() + self.words[1].count_ones() + self.words[2].count_ones())
            as usize
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.words[0] | self.words[1] | self.words[2] == 0
    }

    /// Returns the number of cells in both sets, without building the
    /// intersection.
    #[must_use]
    #[inline]
    pub const fn intersection_len(self, other: Self) -> usize {
        ((self.words[0] & other.words[0]).count_ones()
            + (self.words[1] & other.words[1]).count_ones()
            + (self.words[2] & other.words[2]).count_ones()) as usize
    }

    /// Returns the union of two sets.
    #[must_use]
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self {
            words: [
                self.words[0] | other.words[0],
                self.words[1] | other.words[1],
                self.words[2] | other.words[2],
            ],
        }
    }

    /// Returns the intersection of two sets.
    #[must_use]
    #[inline]
    pub const fn intersection(self, other: Self) -> Self {
        Self {
            words: [
                self.words[0] & other.words[0],
                self.words[1] & other.words[1],
                self.words[2] & other.words[2],
            ],
        }
    }

    /// Returns the cells of `self` that are not in `other`.
    #[must_use]
    #[inline]
    pub const fn difference(self, other: Self) -> Self {
        Self {
            words: [
                self.words[0] & !other.words[0],
                self.words[1] & !other.words[1],
                self.words[2] & !other.words[2],
            ],
        }
    }

    /// Returns `true` if every cell of `self` is in `other`.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.difference(other).is_empty()
    }

    /// Returns the lowest-indexed cell.
    #[must_use]
    pub fn first(self) -> Option<Position> {
        self.iter().next()
    }

    /// Returns an iterator over the cells in grid index order.
    #[must_use]
    pub const fn iter(self) -> BitIndexIter {
        BitIndexIter {
            words: self.words,
            word: 0,
        }
    }
}

impl fmt::Debug for BitIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl BitOr for BitIndex {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for BitIndex {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl BitAnd for BitIndex {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl BitAndAssign for BitIndex {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = self.intersection(rhs);
    }
}

impl Sub for BitIndex {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.difference(rhs)
    }
}

impl FromIterator<Position> for BitIndex {
    fn from_iter<T: IntoIterator<Item = Position>>(iter: T) -> Self {
        let mut set = Self::new();
        for pos in iter {
            set.insert(pos);
        }
        set
    }
}

impl IntoIterator for BitIndex {
    type Item = Position;
    type IntoIter = BitIndexIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the cells of a [`BitIndex`] in grid index order.
#[derive(Debug, Clone)]
pub struct BitIndexIter {
    words: [u32; 3],
    word: usize,
}

impl Iterator for BitIndexIter {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        while self.word < 3 {
            let bits = self.words[self.word];
            if bits == 0 {
                self.word += 1;
                continue;
            }
            self.words[self.word] = bits & (bits - 1);
            #[expect(clippy::cast_possible_truncation)]
            let index = (self.word * 27) as u8 + bits.trailing_zeros() as u8;
            return Some(Position::from_index(index));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Words before `self.word` are already drained to zero.
        let len = self
            .words
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum::<usize>();
        (len, Some(len))
    }
}

impl ExactSizeIterator for BitIndexIter {}
impl FusedIterator for BitIndexIter {}
