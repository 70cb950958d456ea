//! Cell positions on the 9x9 grid.

use std::fmt;

/// A cell position, stored as a row-major grid index in the range 0-80.
///
/// `x` is the column (0-8, left to right) and `y` is the row (0-8, top to
/// bottom). Ordering follows the grid index, which is the order in which the
/// solver enumerates cells.
///
/// # Examples
///
/// ```
/// use aligned_core::Position;
///
/// let pos = Position::new(4, 2);
/// assert_eq!(pos.index(), 22);
/// assert_eq!(pos.box_index(), 1);
/// assert_eq!(Position::from_index(22), pos);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    index: u8,
}

impl Position {
    /// All 81 positions in grid index order.
    pub const ALL: [Self; 81] = {
        let mut all = [Self { index: 0 }; 81];
        let mut i = 0;
        while i < 81 {
            all[i as usize] = Self { index: i };
            i += 1;
        }
        all
    };

    /// Creates a position from column `x` and row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is not in the range 0-8.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        assert!(x < 9 && y < 9, "coordinates must be 0-8");
        Self { index: y * 9 + x }
    }

    /// Creates a position from a grid index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in the range 0-80.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        assert!(index < 81, "grid index must be 0-80");
        Self { index }
    }

    /// Creates a position from a box index and a cell index within the box.
    ///
    /// Both indices run left to right, top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if either index is not in the range 0-8.
    #[must_use]
    pub const fn from_box(box_index: u8, i: u8) -> Self {
        assert!(box_index < 9 && i < 9, "box indices must be 0-8");
        let x = (box_index % 3) * 3 + i % 3;
        let y = (box_index / 3) * 3 + i / 3;
        Self::new(x, y)
    }

    /// Returns the grid index (0-80).
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Returns the column (0-8).
    #[must_use]
    pub const fn x(self) -> u8 {
        self.index % 9
    }

    /// Returns the row (0-8).
    #[must_use]
    pub const fn y(self) -> u8 {
        self.index / 9
    }

    /// Returns the box index (0-8).
    #[must_use]
    pub const fn box_index(self) -> u8 {
        (self.y() / 3) * 3 + self.x() / 3
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

/// Formats the position as a `R#C#` cell reference (one-based).
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}C{}", self.y() + 1, self.x() + 1)
    }
}
