//! A set of digits 1-9, used for a cell's remaining candidates ("maybes").
//!
//! # Examples
//!
//! ```
//! use aligned_core::{Digit, DigitSet};
//!
//! let a = DigitSet::from_iter([Digit::D1, Digit::D2, Digit::D3]);
//! let b = DigitSet::from_iter([Digit::D2, Digit::D3, Digit::D4]);
//!
//! assert_eq!((a | b).len(), 4);
//! assert_eq!(a & b, DigitSet::from_iter([Digit::D2, Digit::D3]));
//! assert_eq!(a.difference(b), DigitSet::from_elem(Digit::D1));
//! ```

use std::{
    fmt,
    iter::FusedIterator,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not},
};

use crate::Digit;

/// A set of digits 1-9 backed by a `u16`.
///
/// Bit `n` represents digit `n + 1`. All operations are branch-free bit
/// manipulations, which is what the combinatorial searches in the solver
/// rely on.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DigitSet {
    bits: u16,
}

impl DigitSet {
    const MASK: u16 = 0x1ff;

    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };
    /// The set containing all nine digits.
    pub const FULL: Self = Self { bits: Self::MASK };

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a set from its raw bit representation.
    ///
    /// Bits above bit 8 are ignored.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self {
            bits: bits & Self::MASK,
        }
    }

    /// Creates a set containing a single digit.
    #[must_use]
    pub const fn from_elem(digit: Digit) -> Self {
        Self { bits: digit.bit() }
    }

    /// Returns the raw bit representation.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.bits
    }

    /// Returns the number of digits in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if the set contains no digits.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns `true` if the set contains `digit`.
    #[must_use]
    pub const fn contains(self, digit: Digit) -> bool {
        self.bits & digit.bit() != 0
    }

    /// Adds a digit. Returns `true` if it was not already present.
    pub fn insert(&mut self, digit: Digit) -> bool {
        let added = !self.contains(digit);
        self.bits |= digit.bit();
        added
    }

    /// Removes a digit. Returns `true` if it was present.
    pub fn remove(&mut self, digit: Digit) -> bool {
        let removed = self.contains(digit);
        self.bits &= !digit.bit();
        removed
    }

    /// Returns the smallest digit in the set.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn first(self) -> Option<Digit> {
        if self.bits == 0 {
            None
        } else {
            Some(Digit::from_value(self.bits.trailing_zeros() as u8 + 1))
        }
    }

    /// Returns the only digit of a single-element set.
    #[must_use]
    pub const fn as_single(self) -> Option<Digit> {
        if self.bits.count_ones() == 1 {
            self.first()
        } else {
            None
        }
    }

    /// Returns the union of two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Returns the intersection of two sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self {
            bits: self.bits & other.bits,
        }
    }

    /// Returns the digits of `self` that are not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self {
            bits: self.bits & !other.bits,
        }
    }

    /// Returns `true` if every digit of `self` is also in `other`.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.bits & !other.bits == 0
    }

    /// Returns `true` if every digit of `other` is also in `self`.
    #[must_use]
    pub const fn is_superset(self, other: Self) -> bool {
        other.is_subset(self)
    }

    /// Returns an iterator over the digits in ascending order.
    #[must_use]
    pub const fn iter(self) -> DigitSetIter {
        DigitSetIter { bits: self.bits }
    }
}

impl fmt::Debug for DigitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Digit::value)).finish()
    }
}

impl fmt::Display for DigitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in *self {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

impl BitOr for DigitSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for DigitSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl BitAnd for DigitSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl BitAndAssign for DigitSet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits &= rhs.bits;
    }
}

impl Not for DigitSet {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_bits(!self.bits)
    }
}

impl FromIterator<Digit> for DigitSet {
    fn from_iter<T: IntoIterator<Item = Digit>>(iter: T) -> Self {
        let mut set = Self::new();
        for digit in iter {
            set.insert(digit);
        }
        set
    }
}

impl IntoIterator for DigitSet {
    type Item = Digit;
    type IntoIter = DigitSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the digits of a [`DigitSet`], in ascending order.
#[derive(Debug, Clone)]
pub struct DigitSetIter {
    bits: u16,
}

impl Iterator for DigitSetIter {
    type Item = Digit;

    fn next(&mut self) -> Option<Digit> {
        let digit = DigitSet::from_bits(self.bits).first()?;
        self.bits &= self.bits - 1;
        Some(digit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for DigitSetIter {}
impl FusedIterator for DigitSetIter {}
