//! Logical sudoku techniques built around aligned-set exclusion.
//!
//! The main technique is [`AlignedExclusion`]: for a fixed degree N (2-10) it
//! finds every N-cell set whose members share "excluder" siblings, enumerates
//! all admissible value combinations of the set, and reports the maybes that
//! appear in no surviving combination. [`HiddenSet`] is a smaller member of the
//! same family that searches digit combinations inside one house.
//!
//! Techniques never mutate the grid during a search. They report
//! [`TechniqueStep`]s into a [`HintSink`]; the caller decides whether to stop
//! after the first one and applies the eliminations itself.
//!
//! # Examples
//!
//! ```
//! use aligned_core::Grid;
//! use aligned_solver::{
//!     AlignedExclusion, AlignedExclusionConfig, HintAccumulator, SearchOutcome, Technique,
//! };
//!
//! let mut technique = AlignedExclusion::new(AlignedExclusionConfig::new(2)?);
//! let grid = Grid::new();
//! let mut sink = HintAccumulator::all();
//!
//! technique.prepare_for_new_puzzle();
//! let outcome = technique.find_hints(&grid, &mut sink)?;
//! assert_eq!(outcome, SearchOutcome::NotFound);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`AlignedExclusion`]: technique::AlignedExclusion
//! [`HiddenSet`]: technique::HiddenSet

pub use self::{
    error::*,
    interrupt::Interrupt,
    sink::{HintAccumulator, HintSink},
    technique::{
        AlignedExclusion, AlignedExclusionConfig, BoxedTechnique, HiddenSet, MinExcluders,
        SearchOutcome, SearchStats, Technique,
    },
    technique_step::*,
};

mod combinations;
mod error;
mod interrupt;
mod sink;
pub mod technique;
mod technique_step;

#[cfg(test)]
mod testing;
