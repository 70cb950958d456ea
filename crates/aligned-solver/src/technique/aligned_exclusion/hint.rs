use aligned_core::{BitIndex, Digit, DigitSet, Position};

use crate::{
    BoxedTechniqueStep, ConditionCells, ConditionDigitCells, TechniqueApplication, TechniqueStep,
};

/// Why a combo of an aligned set cannot be the solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Rejection {
    /// Two sibling cells of the set would hold the same value.
    #[display("{first} and {second} would hold the same value")]
    Collision {
        /// The earlier cell of the pair.
        first: Position,
        /// The later cell of the pair.
        second: Position,
    },
    /// The combo uses up every maybe of this excluder cell.
    #[display("{_0} would have no value left")]
    Excluder(Position),
}

/// A rejected combo: one presumed value per aligned cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedCombo {
    values: Vec<(Position, Digit)>,
    reason: Rejection,
}

impl RejectedCombo {
    pub(crate) fn new(values: Vec<(Position, Digit)>, reason: Rejection) -> Self {
        Self { values, reason }
    }

    /// Returns the presumed value of every aligned cell, in set order.
    #[must_use]
    pub fn values(&self) -> &[(Position, Digit)] {
        &self.values
    }

    /// Returns the reason the combo was rejected.
    #[must_use]
    pub fn reason(&self) -> Rejection {
        self.reason
    }
}

/// An aligned exclusion: maybes of an aligned set that appear in no allowed
/// combo.
#[derive(Debug, Clone)]
pub struct AlignedExclusionHint {
    name: &'static str,
    cells: Vec<Position>,
    eliminations: Vec<(Position, DigitSet)>,
    excluders: Vec<(Position, DigitSet)>,
    rejections: Vec<RejectedCombo>,
}

impl AlignedExclusionHint {
    pub(crate) fn new(
        name: &'static str,
        cells: Vec<Position>,
        eliminations: Vec<(Position, DigitSet)>,
        excluders: Vec<(Position, DigitSet)>,
        rejections: Vec<RejectedCombo>,
    ) -> Self {
        Self {
            name,
            cells,
            eliminations,
            excluders,
            rejections,
        }
    }

    /// Returns the cells of the aligned set.
    #[must_use]
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Returns the eliminated maybes of every cell that loses at least one.
    #[must_use]
    pub fn eliminations(&self) -> &[(Position, DigitSet)] {
        &self.eliminations
    }

    /// Returns the excluder cells that took part, with their maybes.
    #[must_use]
    pub fn excluders(&self) -> &[(Position, DigitSet)] {
        &self.excluders
    }

    /// Returns the recorded rejected combos.
    ///
    /// Only combos that use an eliminated value are listed, and the list may
    /// be cut short by the configured rejection limit.
    #[must_use]
    pub fn rejections(&self) -> &[RejectedCombo] {
        &self.rejections
    }
}

impl TechniqueStep for AlignedExclusionHint {
    fn technique_name(&self) -> &'static str {
        self.name
    }

    fn clone_box(&self) -> BoxedTechniqueStep {
        Box::new(self.clone())
    }

    fn condition_cells(&self) -> ConditionCells {
        self.cells
            .iter()
            .chain(self.excluders.iter().map(|(pos, _)| pos))
            .copied()
            .collect()
    }

    fn condition_digit_cells(&self) -> ConditionDigitCells {
        self.excluders
            .iter()
            .map(|&(pos, maybes)| (BitIndex::from_elem(pos), maybes))
            .collect()
    }

    fn application(&self) -> Vec<TechniqueApplication> {
        self.eliminations
            .iter()
            .map(|&(pos, digits)| TechniqueApplication::CandidateElimination {
                positions: BitIndex::from_elem(pos),
                digits,
            })
            .collect()
    }
}
