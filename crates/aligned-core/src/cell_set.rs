//! An insertion-ordered set of cells with O(1) membership.
//!
//! [`CellSet`] keeps its members on an intrusive doubly linked list threaded
//! through two 81-entry index arrays, so adding and removing never allocate.
//! Membership is answered from a 9x9 presence matrix, and a [`BitIndex`] view
//! is kept up to date on every mutation for the callers that need to
//! intersect sets.
//!
//! # Examples
//!
//! ```
//! use aligned_core::{CellSet, Position};
//!
//! let mut set = CellSet::new();
//! set.add(Position::new(8, 8));
//! set.add(Position::new(0, 0));
//!
//! assert!(set.contains(Position::new(0, 0)));
//! // Iteration follows insertion order, the bit view follows grid order.
//! assert_eq!(set.iter().next(), Some(Position::new(8, 8)));
//! assert_eq!(set.bits().first(), Some(Position::new(0, 0)));
//! ```

use std::fmt;

use crate::{BitIndex, Position};

const NIL: u8 = u8::MAX;

/// A set of cells with O(1) `add`, `remove` and `contains`.
#[derive(Clone)]
pub struct CellSet {
    present: [[bool; 9]; 9],
    prev: [u8; 81],
    next: [u8; 81],
    head: u8,
    tail: u8,
    len: usize,
    bits: BitIndex,
}

impl Default for CellSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CellSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            present: [[false; 9]; 9],
            prev: [NIL; 81],
            next: [NIL; 81],
            head: NIL,
            tail: NIL,
            len: 0,
            bits: BitIndex::EMPTY,
        }
    }

    #[inline]
    fn slot(pos: Position) -> u8 {
        #[expect(clippy::cast_possible_truncation)]
        let index = pos.index() as u8;
        index
    }

    /// Returns `true` if the set contains `pos`.
    #[must_use]
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.present[usize::from(pos.y())][usize::from(pos.x())]
    }

    /// Adds a cell at the end of the iteration order.
    ///
    /// Returns `true` if the cell was not already present.
    pub fn add(&mut self, pos: Position) -> bool {
        if self.contains(pos) {
            return false;
        }
        let slot = Self::slot(pos);
        self.present[usize::from(pos.y())][usize::from(pos.x())] = true;
        self.prev[usize::from(slot)] = self.tail;
        self.next[usize::from(slot)] = NIL;
        if self.tail == NIL {
            self.head = slot;
        } else {
            self.next[usize::from(self.tail)] = slot;
        }
        self.tail = slot;
        self.len += 1;
        self.bits.insert(pos);
        true
    }

    /// Removes a cell. Returns `true` if it was present.
    pub fn remove(&mut self, pos: Position) -> bool {
        if !self.contains(pos) {
            return false;
        }
        let slot = usize::from(Self::slot(pos));
        let (prev, next) = (self.prev[slot], self.next[slot]);
        if prev == NIL {
            self.head = next;
        } else {
            self.next[usize::from(prev)] = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.prev[usize::from(next)] = prev;
        }
        self.prev[slot] = NIL;
        self.next[slot] = NIL;
        self.present[usize::from(pos.y())][usize::from(pos.x())] = false;
        self.len -= 1;
        self.bits.remove(pos);
        true
    }

    /// Removes every cell. Runs in time proportional to the current length.
    pub fn clear(&mut self) {
        let mut slot = self.head;
        while slot != NIL {
            let pos = Position::from_index(slot);
            let next = self.next[usize::from(slot)];
            self.present[usize::from(pos.y())][usize::from(pos.x())] = false;
            self.prev[usize::from(slot)] = NIL;
            self.next[usize::from(slot)] = NIL;
            slot = next;
        }
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
        self.bits = BitIndex::EMPTY;
    }

    /// Returns the number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the [`BitIndex`] view of this set.
    #[must_use]
    #[inline]
    pub fn bits(&self) -> BitIndex {
        self.bits
    }

    /// Returns an iterator over the cells in insertion order.
    #[must_use]
    pub fn iter(&self) -> CellSetIter<'_> {
        CellSetIter {
            set: self,
            slot: self.head,
            remaining: self.len,
        }
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl PartialEq for CellSet {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl Eq for CellSet {}

impl Extend<Position> for CellSet {
    fn extend<T: IntoIterator<Item = Position>>(&mut self, iter: T) {
        for pos in iter {
            self.add(pos);
        }
    }
}

impl FromIterator<Position> for CellSet {
    fn from_iter<T: IntoIterator<Item = Position>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a CellSet {
    type Item = Position;
    type IntoIter = CellSetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`CellSet`] in insertion order.
#[derive(Debug, Clone)]
pub struct CellSetIter<'a> {
    set: &'a CellSet,
    slot: u8,
    remaining: usize,
}

impl Iterator for CellSetIter<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.slot == NIL {
            return None;
        }
        let pos = Position::from_index(self.slot);
        self.slot = self.set.next[usize::from(self.slot)];
        self.remaining -= 1;
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for CellSetIter<'_> {}
