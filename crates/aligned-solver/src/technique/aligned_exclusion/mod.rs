//! Aligned exclusion of any degree from pair (2) to dec (10).
//!
//! An aligned set is a group of `degree` cells that share at least one
//! excluder: a sibling of every cell in the group whose maybes could all be
//! used up by the group's values. Every combo of values for the group that
//! would use up an excluder (or repeat a value between siblings) is
//! impossible. A maybe of a group cell that appears in no possible combo can
//! be eliminated.
//!
//! The search is two nested enumerations, both on explicit stacks:
//!
//! 1. cell combinations of the candidates, pruned as soon as the running
//!    intersection of excluder sets drops below the minimum;
//! 2. value combinations of each surviving aligned set.
//!
//! Sets already proven not to hint are remembered in a cache keyed by their
//! cells and checked against a checksum of the maybes involved, so repeated
//! calls on a barely changed grid only search what changed.

use aligned_core::{BitIndex, Grid};

use self::{
    cache::NonHinterCache,
    candidates::CandidateScanner,
    combo::{AlignedSet, ComboSearch},
    elimination::build_hint,
    excluders::Excluders,
};
pub use self::{
    config::{AlignedExclusionConfig, MAX_DEGREE, MIN_DEGREE, MinExcluders},
    hint::{AlignedExclusionHint, RejectedCombo, Rejection},
};
use crate::{HintSink, Interrupt, SearchOutcome, SolverError, Technique};

mod cache;
mod candidates;
mod combo;
mod config;
mod elimination;
mod excluders;
mod hint;

/// Counters for one [`find_hints`](Technique::find_hints) call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Aligned sets that had enough common excluders.
    pub aligned_sets: u64,
    /// Aligned sets skipped because the cache proved them unchanged.
    pub cache_hits: u64,
    /// Value-combination searches run.
    pub combo_searches: u64,
    /// Hints reported to the sink.
    pub hints: u64,
    /// Outer search iterations.
    pub iterations: u64,
}

impl SearchStats {
    fn accumulate(&mut self, other: &Self) {
        self.aligned_sets += other.aligned_sets;
        self.cache_hits += other.cache_hits;
        self.combo_searches += other.combo_searches;
        self.hints += other.hints;
        self.iterations += other.iterations;
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Frame {
    // Next candidate index to try at this level.
    next: usize,
    // Candidate index chosen at this level.
    cell: usize,
    // Common excluders of the cells chosen at levels `0..=this`.
    common: BitIndex,
}

/// The aligned exclusion technique for one degree.
///
/// An instance keeps scratch buffers and its non-hinter cache between calls.
/// Call [`prepare_for_new_puzzle`](Technique::prepare_for_new_puzzle) whenever
/// the grid is replaced by a different puzzle.
///
/// # Examples
///
/// ```
/// use aligned_core::Grid;
/// use aligned_solver::{AlignedExclusion, AlignedExclusionConfig, Technique};
///
/// let grid: Grid = concat!(
///     "..6....1.",
///     "3.....9..",
///     ".1..5..6.",
///     "...3.1..2",
///     ".4.....7.",
///     "7..9.6...",
///     ".8..4..3.",
///     "..2.....5",
///     ".5....8..",
/// )
/// .parse()?;
///
/// let mut technique = AlignedExclusion::new(AlignedExclusionConfig::new(2)?);
/// technique.prepare_for_new_puzzle();
/// let _step = technique.find_step(&grid)?;
/// assert_eq!(technique.name(), "Aligned Pair Exclusion");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct AlignedExclusion {
    config: AlignedExclusionConfig,
    interrupt: Interrupt,
    scanner: CandidateScanner,
    frames: [Frame; MAX_DEGREE],
    excluders: Excluders,
    combos: ComboSearch,
    cache: NonHinterCache,
    stats: SearchStats,
    puzzle_stats: SearchStats,
}

impl AlignedExclusion {
    /// Creates the technique with its own interrupt flag.
    #[must_use]
    pub fn new(config: AlignedExclusionConfig) -> Self {
        Self::with_interrupt(config, Interrupt::new())
    }

    /// Creates the technique polling a shared interrupt flag.
    #[must_use]
    pub fn with_interrupt(config: AlignedExclusionConfig, interrupt: Interrupt) -> Self {
        Self {
            config,
            interrupt,
            scanner: CandidateScanner::new(),
            frames: [Frame::default(); MAX_DEGREE],
            excluders: Excluders::new(),
            combos: ComboSearch::new(),
            cache: NonHinterCache::new(config.cache_shift(), config.degree()),
            stats: SearchStats::default(),
            puzzle_stats: SearchStats::default(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &AlignedExclusionConfig {
        &self.config
    }

    /// Returns a handle to the interrupt flag polled by this instance.
    #[must_use]
    pub fn interrupt_handle(&self) -> Interrupt {
        self.interrupt.clone()
    }

    /// Returns the counters of the most recent search.
    #[must_use]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    fn search(
        &mut self,
        grid: &Grid,
        sink: &mut dyn HintSink,
    ) -> Result<SearchOutcome, SolverError> {
        let degree = self.config.degree();
        let min_excluders = self.config.min_excluders().count();
        let name = self.config.name();

        let count = self.scanner.scan(grid, degree, min_excluders);
        if count == 0 {
            return Ok(SearchOutcome::NotFound);
        }
        let budget = self
            .config
            .watchdog_limit()
            .unwrap_or_else(|| default_budget(count, degree));

        let mut found = false;
        let mut level = 0;
        self.frames[0].next = 0;

        loop {
            if self.interrupt.is_set() {
                log::debug!("{name}: interrupted after {} iterations", self.stats.iterations);
                return Ok(SearchOutcome::Interrupted);
            }
            self.stats.iterations += 1;
            if self.stats.iterations > budget {
                log::warn!(
                    "{name}: outer search exceeded {budget} iterations with {count} candidates"
                );
                return Err(SolverError::SearchRunaway {
                    technique: name,
                    iterations: self.stats.iterations,
                });
            }

            // Leave room for the cells still to be chosen on deeper levels.
            let index = self.frames[level].next;
            if index + (degree - level) > count {
                if level == 0 {
                    break;
                }
                level -= 1;
                continue;
            }
            self.frames[level].next = index + 1;

            let pos = self.scanner.candidates()[index];
            let own = self.scanner.excluders_of(pos).bits();
            let common = if level == 0 {
                own
            } else {
                self.frames[level - 1].common & own
            };
            if common.len() < min_excluders {
                continue;
            }
            self.frames[level].cell = index;
            self.frames[level].common = common;

            if level + 1 < degree {
                level += 1;
                self.frames[level].next = index + 1;
                continue;
            }

            self.stats.aligned_sets += 1;
            if self.examine(grid, common, sink, &mut found) {
                return Ok(SearchOutcome::Found);
            }
        }

        Ok(if found {
            SearchOutcome::Found
        } else {
            SearchOutcome::NotFound
        })
    }

    /// Runs the value search for the aligned set on the frame stack.
    ///
    /// Returns `true` if the sink asked to stop.
    fn examine(
        &mut self,
        grid: &Grid,
        common: BitIndex,
        sink: &mut dyn HintSink,
        found: &mut bool,
    ) -> bool {
        let candidates = self.scanner.candidates();
        let degree = self.config.degree();
        let set = AlignedSet::from_cells(
            grid,
            self.frames[..degree].iter().map(|frame| candidates[frame.cell]),
        );

        let kept = self.excluders.clean(grid, common, set.values());
        if kept < self.config.min_excluders().count() {
            log::trace!("{:?}: {kept} excluders left after cleaning", set.cells());
            return false;
        }

        let use_cache = self.config.cache_enabled();
        if use_cache
            && self
                .cache
                .should_skip(set.cells(), set.maybes(), self.excluders.maybes())
        {
            self.stats.cache_hits += 1;
            log::trace!("{:?}: unchanged since last search", set.cells());
            return false;
        }

        self.stats.combo_searches += 1;
        if !self.combos.search(&set, self.excluders.maybes()) {
            if use_cache {
                self.cache
                    .remember(set.cells(), set.maybes(), self.excluders.maybes());
            }
            return false;
        }

        let Some(hint) = build_hint(
            self.config.name(),
            &set,
            self.combos.allowed(),
            &self.excluders,
            self.config.rejection_limit(),
        ) else {
            return false;
        };
        self.stats.hints += 1;
        *found = true;
        log::debug!(
            "{}: {:?} with excluders {:?} eliminates {:?}",
            self.config.name(),
            hint.cells(),
            hint.excluders(),
            hint.eliminations(),
        );
        sink.add(Box::new(hint))
    }
}

impl Technique for AlignedExclusion {
    fn name(&self) -> &'static str {
        self.config.name()
    }

    fn find_hints(
        &mut self,
        grid: &Grid,
        sink: &mut dyn HintSink,
    ) -> Result<SearchOutcome, SolverError> {
        grid.check_consistency()?;
        self.stats = SearchStats::default();
        let outcome = self.search(grid, sink);
        self.puzzle_stats.accumulate(&self.stats);
        outcome
    }

    fn prepare_for_new_puzzle(&mut self) {
        log::debug!("{}: new puzzle, clearing cache", self.config.name());
        self.cache.clear();
        self.puzzle_stats = SearchStats::default();
    }

    fn after_puzzle_solved(&mut self) {
        log::debug!("{}: puzzle solved, {:?}", self.config.name(), self.puzzle_stats);
        self.scanner.release();
    }
}

/// Outer iterations needed to visit and leave every partial combination of
/// `degree` out of `candidates` once, plus one.
fn default_budget(candidates: usize, degree: usize) -> u64 {
    let n = candidates as u64;
    let mut binomial = 1_u64;
    let mut total = 0_u64;
    for k in 1..=degree as u64 {
        if k > n {
            break;
        }
        binomial = binomial.saturating_mul(n - k + 1) / k;
        total = total.saturating_add(binomial);
    }
    total.saturating_mul(2).saturating_add(1)
}

#[cfg(test)]
mod tests;
