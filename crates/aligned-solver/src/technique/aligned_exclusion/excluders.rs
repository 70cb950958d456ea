//! Cleaning of the excluders shared by an aligned set.

use aligned_core::{BitIndex, DigitSet, Grid, Position};

/// The common excluders of one aligned set after cleaning.
///
/// Cleaning keeps an excluder only if every one of its maybes is a value of
/// some cell in the set, orders the survivors by maybe count and drops any
/// excluder whose maybes contain another survivor's: such an excluder can
/// only reject combos that the smaller one already rejects.
#[derive(Debug, Clone, Default)]
pub(crate) struct Excluders {
    cells: Vec<Position>,
    maybes: Vec<DigitSet>,
    scratch: Vec<(Position, DigitSet)>,
}

impl Excluders {
    pub(crate) fn new() -> Self {
        Self {
            cells: Vec::with_capacity(20),
            maybes: Vec::with_capacity(20),
            scratch: Vec::with_capacity(20),
        }
    }

    /// Refills from the common excluders of a set whose cells hold `values`.
    ///
    /// Returns the number of surviving excluders.
    pub(crate) fn clean(&mut self, grid: &Grid, common: BitIndex, values: DigitSet) -> usize {
        self.cells.clear();
        self.maybes.clear();
        self.scratch.clear();

        self.scratch.extend(
            common
                .iter()
                .map(|pos| (pos, grid.maybes(pos)))
                .filter(|(_, maybes)| maybes.is_subset(values)),
        );
        self.scratch.sort_by_key(|(_, maybes)| maybes.len());

        for &(pos, maybes) in &self.scratch {
            if self.maybes.iter().any(|kept| kept.is_subset(maybes)) {
                continue;
            }
            self.cells.push(pos);
            self.maybes.push(maybes);
        }
        self.cells.len()
    }

    pub(crate) fn cells(&self) -> &[Position] {
        &self.cells
    }

    pub(crate) fn maybes(&self) -> &[DigitSet] {
        &self.maybes
    }
}
