use std::fmt::Debug;

use aligned_core::{BitIndex, DigitSet, Grid};

/// Cells involved in a technique's applicability conditions.
pub type ConditionCells = BitIndex;

/// Pairs of (cells, digits) involved in a technique's applicability conditions.
pub type ConditionDigitCells = Vec<(BitIndex, DigitSet)>;

/// A hint produced by a technique.
pub trait TechniqueStep: Debug + Send + Sync {
    /// Returns the name of the technique that produced this step.
    fn technique_name(&self) -> &'static str;

    /// Returns a boxed clone of the step.
    fn clone_box(&self) -> BoxedTechniqueStep;

    /// Returns the cells that justify the step.
    ///
    /// Hint displays may highlight these before naming the technique.
    fn condition_cells(&self) -> ConditionCells;

    /// Returns condition pairs of (cells, digits) behind the step.
    fn condition_digit_cells(&self) -> ConditionDigitCells;

    /// Returns the concrete changes the step allows.
    fn application(&self) -> Vec<TechniqueApplication>;
}

/// Concrete changes produced by a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechniqueApplication {
    /// Remove candidates from the specified positions.
    CandidateElimination {
        /// Positions where candidates are removed.
        positions: BitIndex,
        /// Digits to remove from the specified positions.
        digits: DigitSet,
    },
}

impl TechniqueApplication {
    /// Applies the change to a grid.
    ///
    /// Returns `true` if any candidate was removed.
    pub fn apply_to(self, grid: &mut Grid) -> bool {
        match self {
            TechniqueApplication::CandidateElimination { positions, digits } => {
                let mut changed = false;
                for pos in positions {
                    for digit in digits {
                        changed |= grid.remove_candidate(pos, digit);
                    }
                }
                changed
            }
        }
    }
}

/// A boxed technique step.
pub type BoxedTechniqueStep = Box<dyn TechniqueStep>;

impl Clone for BoxedTechniqueStep {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
