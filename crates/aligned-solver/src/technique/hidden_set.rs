use aligned_core::{BitIndex, Digit, DigitSet, Grid, House, Position};

use crate::{
    BoxedTechniqueStep, ConditionCells, ConditionDigitCells, HintSink, SearchOutcome, SolverError,
    Technique, TechniqueApplication, TechniqueStep, combinations::Combinations,
};

const NAMES: [&str; 5] = ["", "", "Hidden Pair", "Hidden Triple", "Hidden Quad"];

/// A technique that removes candidates using a hidden set within a house.
///
/// A "hidden set" occurs when N digits can only appear in the same N cells of
/// a row, column, or box. Other candidates in those cells can be removed.
///
/// # Examples
///
/// ```
/// use aligned_core::Grid;
/// use aligned_solver::{HiddenSet, Technique};
///
/// let mut grid = Grid::new();
/// let mut technique = HiddenSet::pair();
///
/// let changed = technique.apply(&mut grid)?;
/// assert!(!changed);
/// # Ok::<(), aligned_solver::SolverError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HiddenSet {
    degree: usize,
}

/// A hidden set found in one house.
#[derive(Debug, Clone)]
pub struct HiddenSetHint {
    name: &'static str,
    house: House,
    digits: DigitSet,
    positions: BitIndex,
    eliminations: Vec<(Position, DigitSet)>,
}

impl HiddenSetHint {
    /// Returns the house holding the set.
    #[must_use]
    pub fn house(&self) -> House {
        self.house
    }

    /// Returns the hidden digits.
    #[must_use]
    pub fn digits(&self) -> DigitSet {
        self.digits
    }

    /// Returns the cells the digits are confined to.
    #[must_use]
    pub fn positions(&self) -> BitIndex {
        self.positions
    }

    /// Returns the other maybes removed from each cell.
    #[must_use]
    pub fn eliminations(&self) -> &[(Position, DigitSet)] {
        &self.eliminations
    }
}

impl TechniqueStep for HiddenSetHint {
    fn technique_name(&self) -> &'static str {
        self.name
    }

    fn clone_box(&self) -> BoxedTechniqueStep {
        Box::new(self.clone())
    }

    fn condition_cells(&self) -> ConditionCells {
        self.positions
    }

    fn condition_digit_cells(&self) -> ConditionDigitCells {
        vec![(self.positions, self.digits)]
    }

    fn application(&self) -> Vec<TechniqueApplication> {
        vec![TechniqueApplication::CandidateElimination {
            positions: self.positions,
            digits: !self.digits,
        }]
    }
}

impl HiddenSet {
    /// Creates the Hidden Pair technique.
    #[must_use]
    pub const fn pair() -> Self {
        Self { degree: 2 }
    }

    /// Creates the Hidden Triple technique.
    #[must_use]
    pub const fn triple() -> Self {
        Self { degree: 3 }
    }

    /// Creates the Hidden Quad technique.
    #[must_use]
    pub const fn quad() -> Self {
        Self { degree: 4 }
    }

    /// Returns the number of digits in the set.
    #[must_use]
    pub const fn degree(&self) -> usize {
        self.degree
    }

    fn find_in_house(&self, grid: &Grid, house: House) -> Vec<HiddenSetHint> {
        let cells = house.positions() & grid.empty_cells();
        let spots: Vec<(Digit, BitIndex)> = Digit::ALL
            .into_iter()
            .map(|digit| {
                let positions = cells
                    .into_iter()
                    .filter(|&pos| grid.maybes(pos).contains(digit))
                    .collect::<BitIndex>();
                (digit, positions)
            })
            .filter(|(_, positions)| (2..=self.degree).contains(&positions.len()))
            .collect();

        let mut hints = Vec::new();
        let mut combos = Combinations::new(spots.len(), self.degree);
        while let Some(indexes) = combos.advance() {
            let positions = indexes
                .iter()
                .fold(BitIndex::EMPTY, |acc, &i| acc | spots[i].1);
            if positions.len() != self.degree {
                continue;
            }
            let digits: DigitSet = indexes.iter().map(|&i| spots[i].0).collect();
            let eliminations: Vec<(Position, DigitSet)> = positions
                .into_iter()
                .map(|pos| (pos, grid.maybes(pos).difference(digits)))
                .filter(|(_, extra)| !extra.is_empty())
                .collect();
            if eliminations.is_empty() {
                continue;
            }
            hints.push(HiddenSetHint {
                name: self.name(),
                house,
                digits,
                positions,
                eliminations,
            });
        }
        hints
    }
}

impl Technique for HiddenSet {
    fn name(&self) -> &'static str {
        NAMES[self.degree]
    }

    fn find_hints(
        &mut self,
        grid: &Grid,
        sink: &mut dyn HintSink,
    ) -> Result<SearchOutcome, SolverError> {
        grid.check_consistency()?;
        let mut found = false;
        for house in House::ALL {
            for hint in self.find_in_house(grid, house) {
                log::debug!(
                    "{}: {} in {house:?} confined to {:?}",
                    hint.name,
                    hint.digits,
                    hint.positions
                );
                found = true;
                if sink.add(Box::new(hint)) {
                    return Ok(SearchOutcome::Found);
                }
            }
        }
        Ok(if found {
            SearchOutcome::Found
        } else {
            SearchOutcome::NotFound
        })
    }
}
