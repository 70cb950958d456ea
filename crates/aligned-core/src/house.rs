//! Rows, columns and boxes.

use crate::{BitIndex, Position};

/// A sudoku house (row, column, or 3×3 box).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum House {
    /// A row identified by its y coordinate (0-8).
    Row {
        /// Row index (0-8).
        y: u8,
    },
    /// A column identified by its x coordinate (0-8).
    Column {
        /// Column index (0-8).
        x: u8,
    },
    /// A 3×3 box identified by its index (0-8, left to right, top to bottom).
    Box {
        /// Box index (0-8).
        index: u8,
    },
}

static HOUSE_POSITIONS: [BitIndex; 27] = {
    let mut positions = [BitIndex::EMPTY; 27];
    let mut i = 0;
    while i < 81 {
        let pos = Position::ALL[i];
        positions[pos.y() as usize] = positions[pos.y() as usize].with(pos);
        positions[9 + pos.x() as usize] = positions[9 + pos.x() as usize].with(pos);
        positions[18 + pos.box_index() as usize] =
            positions[18 + pos.box_index() as usize].with(pos);
        i += 1;
    }
    positions
};

impl House {
    /// All houses in row, column, box order.
    pub const ALL: [Self; 27] = {
        let mut all = [Self::Row { y: 0 }; 27];
        let mut i = 0;
        while i < 9 {
            all[i as usize] = Self::Row { y: i };
            all[i as usize + 9] = Self::Column { x: i };
            all[i as usize + 18] = Self::Box { index: i };
            i += 1;
        }
        all
    };

    /// Returns the position of this house in [`House::ALL`] (0-26).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            House::Row { y } => y as usize,
            House::Column { x } => 9 + x as usize,
            House::Box { index } => 18 + index as usize,
        }
    }

    /// Returns the nine cells of this house.
    #[must_use]
    pub fn positions(self) -> BitIndex {
        HOUSE_POSITIONS[self.index()]
    }

    /// Returns the three houses containing `pos`, in row, column, box order.
    #[must_use]
    pub const fn containing(pos: Position) -> [Self; 3] {
        [
            Self::Row { y: pos.y() },
            Self::Column { x: pos.x() },
            Self::Box {
                index: pos.box_index(),
            },
        ]
    }
}
