//! Test utilities for technique implementations.
//!
//! [`TechniqueTester`] applies a technique to a grid and checks the candidates
//! it removed. [`reference_eliminations`] is a naive aligned exclusion used as
//! the oracle for the optimized search, and [`solved_grid_with_holes`] builds
//! small, fully enumerable candidate grids.

use std::collections::BTreeMap;

use aligned_core::{BitIndex, Digit, DigitSet, Grid, Position};

use crate::{
    BoxedTechniqueStep, HintAccumulator, Technique, TechniqueApplication,
    combinations::Combinations,
};

/// A test harness for verifying technique implementations.
///
/// The tester keeps the initial and current grid so assertions can compare
/// the candidates before and after. Every `apply_*` method also checks that
/// `find_step` agrees with `apply`.
///
/// # Panics
///
/// All assertion methods panic with detailed messages on failure, using
/// `#[track_caller]` to report the correct source location.
#[derive(Debug)]
pub struct TechniqueTester {
    initial: Grid,
    current: Grid,
}

impl TechniqueTester {
    pub fn new(initial: Grid) -> Self {
        let current = initial.clone();
        Self { initial, current }
    }

    /// Creates a tester from a grid string.
    ///
    /// # Panics
    ///
    /// Panics if the string cannot be parsed.
    #[track_caller]
    pub fn from_str(s: &str) -> Self {
        Self::new(s.parse().unwrap())
    }

    /// Overrides the maybes of a cell in both the initial and current grid.
    #[must_use]
    pub fn with_maybes<C>(mut self, pos: Position, digits: C) -> Self
    where
        C: IntoIterator<Item = Digit>,
    {
        let digits = DigitSet::from_iter(digits);
        self.initial.set_maybes(pos, digits);
        self.current.set_maybes(pos, digits);
        self
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    /// Applies the technique once.
    ///
    /// # Panics
    ///
    /// Panics if the technique returns an error.
    #[track_caller]
    pub fn apply_once<T>(mut self, technique: &mut T) -> Self
    where
        T: Technique,
    {
        let before = self.current.clone();
        let changed = technique.apply(&mut self.current).unwrap();
        Self::assert_find_step_consistent(technique, &before, &self.current, changed);
        self
    }

    /// Applies the technique until it makes no more progress.
    ///
    /// # Panics
    ///
    /// Panics if the technique returns an error.
    #[track_caller]
    pub fn apply_until_stuck<T>(mut self, technique: &mut T) -> Self
    where
        T: Technique,
    {
        loop {
            let before = self.current.clone();
            let changed = technique.apply(&mut self.current).unwrap();
            Self::assert_find_step_consistent(technique, &before, &self.current, changed);
            if !changed {
                break;
            }
        }
        self
    }

    #[track_caller]
    fn assert_find_step_consistent<T>(
        technique: &mut T,
        before: &Grid,
        after: &Grid,
        changed: bool,
    ) where
        T: Technique,
    {
        let name = technique.name();
        match technique.find_step(before).unwrap() {
            None => {
                assert!(
                    !changed,
                    "Expected {name} to report no change when find_step returned None"
                );
                assert_eq!(before, after, "Expected candidates to remain unchanged");
            }
            Some(step) => {
                assert!(
                    changed,
                    "Expected {name} to report a change when find_step returned a step"
                );
                Self::assert_step_applied(before, &step, after);
            }
        }
    }

    #[track_caller]
    fn assert_step_applied(before: &Grid, step: &BoxedTechniqueStep, after: &Grid) {
        let name = step.technique_name();
        for application in step.application() {
            let TechniqueApplication::CandidateElimination { positions, digits } = application;
            for pos in positions {
                let removed = before.maybes(pos) & digits;
                assert!(
                    (after.maybes(pos) & removed).is_empty(),
                    "Expected {removed:?} to be removed from {pos:?} after applying {name}, but candidates are {:?}",
                    after.maybes(pos)
                );
            }
        }
    }

    /// Asserts that all of `digits` were removed from a cell; others may have
    /// been removed too.
    #[track_caller]
    pub fn assert_removed_includes<C>(self, pos: Position, digits: C) -> Self
    where
        C: IntoIterator<Item = Digit>,
    {
        let digits = DigitSet::from_iter(digits);
        let initial = self.initial.maybes(pos);
        let current = self.current.maybes(pos);
        assert_eq!(
            initial & digits,
            digits,
            "Expected initial candidates at {pos:?} to include {digits:?}, but initial candidates are: {initial:?}"
        );
        assert!(
            (current & digits).is_empty(),
            "Expected all of {digits:?} to be removed from {pos:?}, but {current:?} still contains some"
        );
        self
    }

    /// Asserts that exactly `digits` were removed from a cell.
    #[track_caller]
    pub fn assert_removed_exact<C>(self, pos: Position, digits: C) -> Self
    where
        C: IntoIterator<Item = Digit>,
    {
        let digits = DigitSet::from_iter(digits);
        let initial = self.initial.maybes(pos);
        let current = self.current.maybes(pos);
        let removed = initial.difference(current);
        assert_eq!(
            removed, digits,
            "Expected exactly {digits:?} to be removed from {pos:?}, but removed candidates are: {removed:?} (initial: {initial:?}, current: {current:?})"
        );
        self
    }

    /// Asserts that a cell's candidates have not changed.
    #[track_caller]
    pub fn assert_no_change(self, pos: Position) -> Self {
        let initial = self.initial.maybes(pos);
        let current = self.current.maybes(pos);
        assert_eq!(
            initial, current,
            "Expected no change at {pos:?}, but candidates changed from {initial:?} to {current:?}"
        );
        self
    }
}

/// Eliminations per cell as reported by every hint of a find-all search.
///
/// # Panics
///
/// Panics if the technique returns an error.
#[track_caller]
pub fn collect_eliminations<T>(technique: &mut T, grid: &Grid) -> BTreeMap<Position, DigitSet>
where
    T: Technique,
{
    let mut sink = HintAccumulator::all();
    technique.find_hints(grid, &mut sink).unwrap();
    let mut eliminations = BTreeMap::<Position, DigitSet>::new();
    for step in sink.steps() {
        for application in step.application() {
            let TechniqueApplication::CandidateElimination { positions, digits } = application;
            for pos in positions {
                *eliminations.entry(pos).or_default() |= digits;
            }
        }
    }
    eliminations
}

/// Aligned exclusion with one common excluder, without pruning, cleaning or
/// caching.
///
/// Every `degree`-subset of empty cells is tried. A subset counts if its
/// cells share an excluder-sized sibling whose maybes lie within the union of
/// the subset's maybes. For each such subset, the full Cartesian product of
/// maybes is enumerated.
pub fn reference_eliminations(grid: &Grid, degree: usize) -> BTreeMap<Position, DigitSet> {
    let cells: Vec<Position> = grid
        .empty_cells()
        .into_iter()
        .filter(|&pos| !grid.maybes(pos).is_empty())
        .collect();
    let excluder_sized: BitIndex = cells
        .iter()
        .copied()
        .filter(|&pos| (2..=degree).contains(&grid.maybes(pos).len()))
        .collect();

    let mut eliminations = BTreeMap::<Position, DigitSet>::new();
    let mut subsets = Combinations::new(cells.len(), degree);
    while let Some(indexes) = subsets.advance() {
        let subset: Vec<Position> = indexes.iter().map(|&i| cells[i]).collect();
        let common = subset
            .iter()
            .fold(excluder_sized, |acc, &pos| acc & BitIndex::peers(pos));
        let values = subset
            .iter()
            .fold(DigitSet::EMPTY, |acc, &pos| acc | grid.maybes(pos));
        let excluders: Vec<DigitSet> = common
            .into_iter()
            .map(|pos| grid.maybes(pos))
            .filter(|maybes| maybes.is_subset(values))
            .collect();
        if excluders.is_empty() {
            continue;
        }

        let allowed = allowed_values(grid, &subset, &excluders);
        for (&pos, allowed) in subset.iter().zip(allowed) {
            let excluded = grid.maybes(pos).difference(allowed);
            if !excluded.is_empty() {
                *eliminations.entry(pos).or_default() |= excluded;
            }
        }
    }
    eliminations
}

fn allowed_values(grid: &Grid, cells: &[Position], excluders: &[DigitSet]) -> Vec<DigitSet> {
    let maybes: Vec<Vec<Digit>> = cells
        .iter()
        .map(|&pos| grid.maybes(pos).iter().collect())
        .collect();
    let mut allowed = vec![DigitSet::EMPTY; cells.len()];
    let mut cursor = vec![0; cells.len()];
    loop {
        let values: Vec<Digit> = cursor.iter().zip(&maybes).map(|(&c, m)| m[c]).collect();
        let collides = (0..cells.len()).any(|i| {
            (i + 1..cells.len()).any(|j| values[i] == values[j] && grid.sees(cells[i], cells[j]))
        });
        let combo: DigitSet = values.iter().copied().collect();
        if !collides && !excluders.iter().any(|e| e.is_subset(combo)) {
            for (a, &v) in allowed.iter_mut().zip(&values) {
                a.insert(v);
            }
        }

        let mut i = cursor.len();
        loop {
            if i == 0 {
                return allowed;
            }
            i -= 1;
            cursor[i] += 1;
            if cursor[i] < maybes[i].len() {
                break;
            }
            cursor[i] = 0;
        }
    }
}

/// A solved grid with the given cells emptied and set to the given maybes.
///
/// The solution is the shifted-row pattern, so the placed cells never clash.
pub fn solved_grid_with_holes(holes: &[(Position, DigitSet)]) -> Grid {
    let mut grid = Grid::new();
    for pos in Position::ALL {
        if holes.iter().any(|&(hole, _)| hole == pos) {
            continue;
        }
        let value = (pos.x() + 3 * (pos.y() % 3) + pos.y() / 3) % 9 + 1;
        grid.place(pos, Digit::from_value(value));
    }
    for &(pos, maybes) in holes {
        grid.set_maybes(pos, maybes);
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(digits: &[u8]) -> DigitSet {
        digits.iter().map(|&d| Digit::from_value(d)).collect()
    }

    #[derive(Debug)]
    struct NoOpTechnique;

    impl Technique for NoOpTechnique {
        fn name(&self) -> &'static str {
            "no-op"
        }

        fn find_hints(
            &mut self,
            _grid: &Grid,
            _sink: &mut dyn crate::HintSink,
        ) -> Result<crate::SearchOutcome, crate::SolverError> {
            Ok(crate::SearchOutcome::NotFound)
        }
    }

    #[test]
    fn test_solved_grid_is_consistent() {
        let grid = solved_grid_with_holes(&[]);
        assert!(grid.check_consistency().is_ok());
        assert!(grid.empty_cells().is_empty());
    }

    #[test]
    fn test_holes_keep_their_maybes() {
        let hole = Position::new(3, 3);
        let grid = solved_grid_with_holes(&[(hole, set(&[1, 7]))]);
        assert!(grid.is_empty_cell(hole));
        assert_eq!(grid.maybes(hole), set(&[1, 7]));
        assert_eq!(grid.empty_cells().len(), 1);
    }

    #[test]
    fn test_reference_finds_sibling_pair_exclusion() {
        // A{3,5} and B{3,5,9} in row 0 with excluder X{3,5} in their box.
        let grid = solved_grid_with_holes(&[
            (Position::new(0, 0), set(&[3, 5])),
            (Position::new(1, 0), set(&[3, 5, 9])),
            (Position::new(2, 1), set(&[3, 5])),
        ]);
        let eliminations = reference_eliminations(&grid, 2);
        assert_eq!(eliminations.get(&Position::new(1, 0)), Some(&set(&[3, 5])));
    }

    #[test]
    fn test_no_op_leaves_grid_alone() {
        TechniqueTester::new(solved_grid_with_holes(&[(Position::new(0, 0), set(&[1, 2]))]))
            .apply_once(&mut NoOpTechnique)
            .assert_no_change(Position::new(0, 0));
    }

    #[test]
    #[should_panic(expected = "Expected no change at")]
    fn test_assert_no_change_fails_when_changed() {
        let pos = Position::new(0, 0);
        let mut tester = TechniqueTester::new(Grid::new());
        tester.current.remove_candidate(pos, Digit::D1);
        let _ = tester.assert_no_change(pos);
    }
}
