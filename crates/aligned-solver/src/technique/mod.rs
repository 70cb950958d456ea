//! Sudoku solving techniques.
//!
//! Each technique implements the [`Technique`] trait. A technique reads a
//! [`Grid`], reports hints into a [`HintSink`] and never mutates the grid while
//! searching; [`Technique::apply`] is a convenience that applies the hints it
//! found afterwards.

use std::fmt::Debug;

use aligned_core::Grid;

pub use self::{
    aligned_exclusion::{
        AlignedExclusion, AlignedExclusionConfig, AlignedExclusionHint, MAX_DEGREE, MIN_DEGREE,
        MinExcluders, RejectedCombo, Rejection, SearchStats,
    },
    hidden_set::{HiddenSet, HiddenSetHint},
};
use crate::{BoxedTechniqueStep, HintAccumulator, HintSink, SolverError};

mod aligned_exclusion;
mod hidden_set;

/// How a technique search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SearchOutcome {
    /// At least one hint was reported to the sink.
    Found,
    /// The search ran to completion without a hint.
    NotFound,
    /// The interrupt flag was set. Hints already given to the sink are sound
    /// but incomplete; [`Technique::find_step`] and [`Technique::apply`]
    /// discard them.
    Interrupted,
}

/// A trait representing a sudoku solving technique.
pub trait Technique: Debug + Send {
    /// Returns the name of the technique.
    fn name(&self) -> &'static str;

    /// Searches the grid and reports every hint to `sink` until the sink asks
    /// to stop.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is inconsistent or the search exceeds its
    /// iteration budget.
    fn find_hints(
        &mut self,
        grid: &Grid,
        sink: &mut dyn HintSink,
    ) -> Result<SearchOutcome, SolverError>;

    /// Resets state that is only meaningful for one puzzle.
    ///
    /// Called once whenever a new puzzle is loaded.
    fn prepare_for_new_puzzle(&mut self) {}

    /// Drops per-search scratch state once the puzzle is solved.
    fn after_puzzle_solved(&mut self) {}

    /// Finds the first hint, if any.
    ///
    /// An interrupted search returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`find_hints`](Self::find_hints).
    fn find_step(&mut self, grid: &Grid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let mut sink = HintAccumulator::first();
        if self.find_hints(grid, &mut sink)?.is_interrupted() {
            return Ok(None);
        }
        Ok(sink.into_steps().into_iter().next())
    }

    /// Finds every hint and applies all of their eliminations.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - At least one candidate was removed
    /// * `Ok(false)` - Nothing changed, or the search was interrupted; hints
    ///   found before the interrupt are not applied
    ///
    /// # Errors
    ///
    /// Propagates errors from [`find_hints`](Self::find_hints).
    fn apply(&mut self, grid: &mut Grid) -> Result<bool, SolverError> {
        let mut sink = HintAccumulator::all();
        if self.find_hints(grid, &mut sink)?.is_interrupted() {
            return Ok(false);
        }
        let mut changed = false;
        for step in sink.steps() {
            for application in step.application() {
                changed |= application.apply_to(grid);
            }
        }
        Ok(changed)
    }
}

/// A boxed technique.
pub type BoxedTechnique = Box<dyn Technique>;
