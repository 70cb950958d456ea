//! The 9x9 grid: placed values plus remaining candidates for every cell.
//!
//! [`Grid`] is the read-only view the solving techniques consult. The caller
//! owns it, places values and removes candidates; techniques only read the
//! maybes and report what may be removed.
//!
//! # Examples
//!
//! ```
//! use aligned_core::{Digit, Grid, Position};
//!
//! let grid: Grid = "
//!     53_ _7_ ___
//!     6__ 195 ___
//!     _98 ___ _6_
//!     8__ _6_ __3
//!     4__ 8_3 __1
//!     7__ _2_ __6
//!     _6_ ___ 28_
//!     ___ 419 __5
//!     ___ _8_ _79
//! "
//! .parse()?;
//!
//! assert_eq!(grid.value(Position::new(0, 0)), Some(Digit::D5));
//! assert!(grid.maybes(Position::new(0, 0)).is_empty());
//! assert!(!grid.maybes(Position::new(2, 0)).contains(Digit::D5));
//! # Ok::<(), aligned_core::ParseGridError>(())
//! ```

use std::{fmt, str::FromStr};

use crate::{BitIndex, Digit, DigitSet, House, Position};

/// Error returned when a grid contains a contradiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConsistencyError {
    /// An empty cell has no remaining candidates.
    #[display("cell {_0} has no remaining candidates")]
    NoCandidates(#[error(not(source))] Position),
    /// The same digit is placed twice in one house.
    #[display("digit {digit} is placed twice in {house:?}")]
    DuplicateValue {
        /// The house containing the duplicate.
        house: House,
        /// The duplicated digit.
        digit: Digit,
    },
}

/// Error returned when parsing a grid string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseGridError {
    /// The string contains a character that is neither a digit, an empty-cell
    /// marker nor whitespace.
    #[display("invalid character {ch:?} at cell {cell}")]
    InvalidCharacter {
        /// The offending character.
        ch: char,
        /// Zero-based index of the cell being read.
        cell: usize,
    },
    /// The string does not describe exactly 81 cells.
    #[display("expected 81 cells, found {_0}")]
    WrongCellCount(#[error(not(source))] usize),
}

/// Placed values and candidate sets for all 81 cells.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    values: [Option<Digit>; 81],
    maybes: [DigitSet; 81],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Creates a grid with no placed values and every candidate available.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: [None; 81],
            maybes: [DigitSet::FULL; 81],
        }
    }

    /// Places a digit: the cell loses all its maybes and the digit is removed
    /// from the maybes of every sibling.
    pub fn place(&mut self, pos: Position, digit: Digit) {
        self.values[pos.index()] = Some(digit);
        self.maybes[pos.index()] = DigitSet::EMPTY;
        for peer in BitIndex::peers(pos) {
            self.maybes[peer.index()].remove(digit);
        }
    }

    /// Returns the placed value of a cell, if any.
    #[must_use]
    #[inline]
    pub fn value(&self, pos: Position) -> Option<Digit> {
        self.values[pos.index()]
    }

    /// Returns the remaining candidates of a cell.
    #[must_use]
    #[inline]
    pub fn maybes(&self, pos: Position) -> DigitSet {
        self.maybes[pos.index()]
    }

    /// Replaces the candidates of a cell.
    ///
    /// This is meant for building specific candidate states; it does not
    /// touch siblings.
    pub fn set_maybes(&mut self, pos: Position, maybes: DigitSet) {
        self.maybes[pos.index()] = maybes;
    }

    /// Removes a candidate from a cell. Returns `true` if it was present.
    pub fn remove_candidate(&mut self, pos: Position, digit: Digit) -> bool {
        self.maybes[pos.index()].remove(digit)
    }

    /// Returns `true` if the cell has no placed value.
    #[must_use]
    #[inline]
    pub fn is_empty_cell(&self, pos: Position) -> bool {
        self.values[pos.index()].is_none()
    }

    /// Returns every cell without a placed value.
    #[must_use]
    pub fn empty_cells(&self) -> BitIndex {
        Position::ALL
            .into_iter()
            .filter(|&pos| self.is_empty_cell(pos))
            .collect()
    }

    /// Returns `true` if two distinct cells share a row, column or box.
    #[must_use]
    #[inline]
    pub fn sees(&self, a: Position, b: Position) -> bool {
        BitIndex::peers(a).contains(b)
    }

    /// Checks the grid for contradictions.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError`] if an empty cell has no candidates or a
    /// digit is placed twice in a house.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        for pos in Position::ALL {
            if self.is_empty_cell(pos) && self.maybes(pos).is_empty() {
                return Err(ConsistencyError::NoCandidates(pos));
            }
        }
        for house in House::ALL {
            let mut seen = DigitSet::EMPTY;
            for pos in house.positions() {
                if let Some(digit) = self.value(pos)
                    && !seen.insert(digit)
                {
                    return Err(ConsistencyError::DuplicateValue { house, digit });
                }
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    /// Parses 81 cells in row-major order.
    ///
    /// Digits `1`-`9` are givens; `.`, `_` and `0` are empty cells; whitespace
    /// is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut grid = Self::new();
        let mut cell = 0;
        for ch in s.chars() {
            if ch.is_whitespace() {
                continue;
            }
            let value = match ch {
                '.' | '_' | '0' => None,
                '1'..='9' => ch.to_digit(10),
                _ => return Err(ParseGridError::InvalidCharacter { ch, cell }),
            };
            if cell < 81
                && let Some(value) = value
            {
                #[expect(clippy::cast_possible_truncation)]
                let digit = Digit::from_value(value as u8);
                grid.place(Position::ALL[cell], digit);
            }
            cell += 1;
        }
        if cell != 81 {
            return Err(ParseGridError::WrongCellCount(cell));
        }
        Ok(grid)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {{")?;
        for y in 0..9 {
            write!(f, "   ")?;
            for x in 0..9 {
                let pos = Position::new(x, y);
                match self.value(pos) {
                    Some(digit) => write!(f, " {digit:>9}")?,
                    None => write!(f, " {:>9}", self.maybes(pos).to_string())?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pos in Position::ALL {
            match self.value(pos) {
                Some(digit) => write!(f, "{digit}")?,
                None => write!(f, ".")?,
            }
        }
        Ok(())
    }
}
