//! Grid data model for the aligned-set exclusion engine.
//!
//! This crate holds the small, copyable building blocks that the solving
//! techniques in `aligned-solver` operate on. Nothing here knows about
//! techniques; it only models cells, their remaining candidate values
//! ("maybes") and the sibling relation between cells.
//!
//! # Overview
//!
//! 1. **Values**
//!    - [`digit`]: Type-safe sudoku digits 1-9
//!    - [`digit_set`]: A 9-bit set of digits, used as a cell's maybes
//!
//! 2. **Cells and regions**
//!    - [`position`]: Grid index 0-80 with row/column/box accessors
//!    - [`house`]: Rows, columns and boxes
//!
//! 3. **Cell sets**
//!    - [`bit_index`]: An 81-bit set of cells with O(1) size queries
//!    - [`cell_set`]: An insertion-ordered set of cells with O(1) membership
//!
//! 4. **The grid**
//!    - [`grid`]: Placed values plus maybes for all 81 cells
//!
//! # Examples
//!
//! ```
//! use aligned_core::{Digit, Grid, Position};
//!
//! let mut grid = Grid::new();
//! grid.place(Position::new(4, 4), Digit::D5);
//!
//! // 5 is no longer possible anywhere in column 4
//! assert!(!grid.maybes(Position::new(4, 0)).contains(Digit::D5));
//! ```

pub mod bit_index;
pub mod cell_set;
pub mod digit;
pub mod digit_set;
pub mod grid;
pub mod house;
pub mod position;

pub use self::{
    bit_index::BitIndex,
    cell_set::CellSet,
    digit::Digit,
    digit_set::DigitSet,
    grid::{ConsistencyError, Grid, ParseGridError},
    house::House,
    position::Position,
};
