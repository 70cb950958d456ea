//! Selection of the cells that may take part in an aligned set.

use aligned_core::{BitIndex, CellSet, Grid, Position};

/// Finds candidate cells and their excluder siblings.
///
/// A sibling is "excluder-sized" when it is empty and has between 2 and
/// `degree` maybes: only such a cell can have all of its maybes used up by the
/// values of a `degree`-cell set. An empty cell with at least `min_excluders`
/// such siblings becomes a candidate.
///
/// The per-cell excluder sets are kept between calls and refilled in place.
#[derive(Debug, Clone)]
pub(crate) struct CandidateScanner {
    candidates: Vec<Position>,
    excluders: Vec<CellSet>,
}

impl CandidateScanner {
    pub(crate) fn new() -> Self {
        Self {
            candidates: Vec::with_capacity(81),
            excluders: vec![CellSet::new(); 81],
        }
    }

    /// Rescans the grid.
    ///
    /// Returns the number of candidates, which is zero whenever fewer than
    /// `degree` cells qualify.
    pub(crate) fn scan(&mut self, grid: &Grid, degree: usize, min_excluders: usize) -> usize {
        self.clear();

        let excluder_sized: BitIndex = Position::ALL
            .into_iter()
            .filter(|&pos| {
                grid.is_empty_cell(pos) && (2..=degree).contains(&grid.maybes(pos).len())
            })
            .collect();
        if excluder_sized.len() < min_excluders {
            return 0;
        }

        for pos in Position::ALL {
            if !grid.is_empty_cell(pos) || grid.maybes(pos).is_empty() {
                continue;
            }
            let siblings = BitIndex::peers(pos) & excluder_sized;
            if siblings.len() < min_excluders {
                continue;
            }
            self.excluders[pos.index()].extend(siblings);
            self.candidates.push(pos);
        }

        if self.candidates.len() < degree {
            self.clear();
        }
        self.candidates.len()
    }

    /// Candidate cells in grid index order.
    pub(crate) fn candidates(&self) -> &[Position] {
        &self.candidates
    }

    /// Excluder-sized siblings of a candidate.
    pub(crate) fn excluders_of(&self, pos: Position) -> &CellSet {
        &self.excluders[pos.index()]
    }

    /// Forgets the last scan.
    pub(crate) fn clear(&mut self) {
        for pos in self.candidates.drain(..) {
            self.excluders[pos.index()].clear();
        }
    }

    /// Releases the scratch storage.
    pub(crate) fn release(&mut self) {
        self.clear();
        self.candidates.shrink_to_fit();
    }
}
