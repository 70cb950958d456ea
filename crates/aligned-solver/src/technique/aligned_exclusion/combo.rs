//! Value-combination search for one aligned set.

use aligned_core::{Digit, DigitSet, Grid, Position};
use tinyvec::ArrayVec;

use super::config::MAX_DEGREE;

/// The cells of one aligned set, with their maybes and sibling relations.
#[derive(Debug, Clone, Default)]
pub(crate) struct AlignedSet {
    cells: ArrayVec<[Position; MAX_DEGREE]>,
    maybes: ArrayVec<[DigitSet; MAX_DEGREE]>,
    // Bit `j` of `sees[i]` is set when cells `i` and `j` are siblings.
    sees: [u16; MAX_DEGREE],
}

impl AlignedSet {
    pub(crate) fn from_cells(grid: &Grid, cells: impl IntoIterator<Item = Position>) -> Self {
        let mut set = Self::default();
        for pos in cells {
            set.push(grid, pos);
        }
        set
    }

    fn push(&mut self, grid: &Grid, pos: Position) {
        let i = self.cells.len();
        self.sees[i] = 0;
        for (j, &other) in self.cells.iter().enumerate() {
            if grid.sees(pos, other) {
                self.sees[i] |= 1 << j;
                self.sees[j] |= 1 << i;
            }
        }
        self.cells.push(pos);
        self.maybes.push(grid.maybes(pos));
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn cells(&self) -> &[Position] {
        &self.cells
    }

    pub(crate) fn maybes(&self) -> &[DigitSet] {
        &self.maybes
    }

    pub(crate) fn sees(&self, i: usize, j: usize) -> bool {
        self.sees[i] & (1 << j) != 0
    }

    /// Union of the maybes of every cell.
    pub(crate) fn values(&self) -> DigitSet {
        self.maybes.iter().fold(DigitSet::EMPTY, |acc, &m| acc | m)
    }
}

/// Enumerates the value combos of an aligned set and accumulates the values
/// that appear in at least one allowed combo.
///
/// The search runs on an explicit stack of levels, one per cell. Choosing a
/// value at a level removes it from the remaining values of every later
/// sibling cell, so collisions never reach the excluder test.
#[derive(Debug, Clone)]
pub(crate) struct ComboSearch {
    // `cands[level][j]`: values still open for cell `j` once levels
    // `0..level` are chosen. Only `j >= level` is meaningful.
    cands: [[DigitSet; MAX_DEGREE]; MAX_DEGREE],
    chosen: [DigitSet; MAX_DEGREE],
    allowed: [DigitSet; MAX_DEGREE],
    degree: usize,
}

impl ComboSearch {
    pub(crate) fn new() -> Self {
        Self {
            cands: [[DigitSet::EMPTY; MAX_DEGREE]; MAX_DEGREE],
            chosen: [DigitSet::EMPTY; MAX_DEGREE],
            allowed: [DigitSet::EMPTY; MAX_DEGREE],
            degree: 0,
        }
    }

    /// Runs the search against the cleaned excluder maybes.
    ///
    /// Returns `true` if at least one cell has a maybe that no allowed combo
    /// uses; [`allowed`](Self::allowed) then holds the per-cell result.
    pub(crate) fn search(&mut self, set: &AlignedSet, excluders: &[DigitSet]) -> bool {
        match *excluders {
            [only] => self.run(set, |combo| only.is_subset(combo)),
            _ => self.run(set, |combo| excluders.iter().any(|e| e.is_subset(combo))),
        }
    }

    /// Values seen in allowed combos, one set per cell of the last search.
    ///
    /// Cells right of the point where the search stopped are saturated and
    /// may report fewer values than they really allow; only the result of a
    /// search that returned `true` is complete.
    pub(crate) fn allowed(&self) -> &[DigitSet] {
        &self.allowed[..self.degree]
    }

    fn run<F>(&mut self, set: &AlignedSet, is_rejected: F) -> bool
    where
        F: Fn(DigitSet) -> bool,
    {
        let degree = set.len();
        let maybes = set.maybes();
        let last = degree - 1;

        self.degree = degree;
        self.allowed = [DigitSet::EMPTY; MAX_DEGREE];
        self.cands[0][..degree].copy_from_slice(maybes);

        let mut untried = [DigitSet::EMPTY; MAX_DEGREE];
        untried[0] = maybes[0];
        let mut work = last;
        let mut level = 0;

        loop {
            let Some(value) = untried[level].first() else {
                if level == 0 {
                    break;
                }
                level -= 1;
                continue;
            };
            untried[level].remove(value);
            self.chosen[level] = DigitSet::from_elem(value);

            if level < last {
                if self.propagate(set, level, value) {
                    level += 1;
                    untried[level] = self.cands[level][level];
                }
                continue;
            }

            let combo = self.chosen[..degree]
                .iter()
                .fold(DigitSet::EMPTY, |acc, &v| acc | v);
            if is_rejected(combo) {
                continue;
            }

            for (allowed, &chosen) in self.allowed[..=work].iter_mut().zip(&self.chosen) {
                *allowed |= chosen;
            }
            // Cells right of `work` allow all their maybes, so any other
            // completion of the current prefix adds nothing.
            while self.allowed[work] == maybes[work] {
                if work == 0 {
                    return false;
                }
                work -= 1;
            }
            level = work;
        }

        self.allowed[..degree]
            .iter()
            .zip(maybes)
            .any(|(allowed, maybes)| allowed != maybes)
    }

    /// Fills the next level's open values. Returns `false` if a later cell is
    /// left with nothing.
    fn propagate(&mut self, set: &AlignedSet, level: usize, value: Digit) -> bool {
        let mut next = self.cands[level];
        for j in level + 1..set.len() {
            if set.sees(level, j) {
                next[j].remove(value);
                if next[j].is_empty() {
                    return false;
                }
            }
        }
        self.cands[level + 1] = next;
        true
    }
}
