use aligned_core::{ConsistencyError, Digit, DigitSet, Grid, Position};
use proptest::prelude::*;

use super::*;
use crate::{
    BoxedTechniqueStep, HintAccumulator, TechniqueApplication,
    testing::{
        TechniqueTester, collect_eliminations, reference_eliminations, solved_grid_with_holes,
    },
};

fn set(digits: &[u8]) -> DigitSet {
    digits.iter().map(|&d| Digit::from_value(d)).collect()
}

fn engine(degree: usize) -> AlignedExclusion {
    AlignedExclusion::new(AlignedExclusionConfig::new(degree).unwrap())
}

const A: Position = Position::new(0, 0);
const B: Position = Position::new(1, 0);
const X: Position = Position::new(2, 1);

/// A{3,5} and B{3,5,9} share row 0; X{3,5} sits in their box.
fn sibling_pair() -> Grid {
    solved_grid_with_holes(&[(A, set(&[3, 5])), (B, set(&[3, 5, 9])), (X, set(&[3, 5]))])
}

/// A{3,5,7} and B{3,5,9} share no house; X{3,5} sees both.
fn unrelated_pair() -> Grid {
    solved_grid_with_holes(&[
        (Position::new(0, 0), set(&[3, 5, 7])),
        (Position::new(4, 4), set(&[3, 5, 9])),
        (Position::new(4, 0), set(&[3, 5])),
    ])
}

#[test]
fn test_empty_grid_has_no_candidates() {
    let mut technique = engine(2);
    let mut sink = HintAccumulator::all();
    let outcome = technique.find_hints(&Grid::new(), &mut sink).unwrap();
    assert_eq!(outcome, SearchOutcome::NotFound);
    assert!(sink.is_empty());
    assert_eq!(technique.last_stats(), SearchStats::default());
}

#[test]
fn test_sibling_pair_eliminates_from_the_wider_cell() {
    TechniqueTester::new(sibling_pair())
        .apply_once(&mut engine(2))
        .assert_removed_exact(B, [Digit::D3, Digit::D5])
        .assert_no_change(A)
        .assert_no_change(X);
}

#[test]
fn test_unrelated_pair_keeps_every_value() {
    TechniqueTester::new(unrelated_pair())
        .apply_once(&mut engine(2))
        .assert_no_change(Position::new(0, 0))
        .assert_no_change(Position::new(4, 4))
        .assert_no_change(Position::new(4, 0));
}

#[test]
fn test_hint_contents() {
    let mut technique = engine(2);
    let step = technique.find_step(&sibling_pair()).unwrap().unwrap();
    assert_eq!(step.technique_name(), "Aligned Pair Exclusion");
    assert_eq!(
        step.application(),
        vec![TechniqueApplication::CandidateElimination {
            positions: aligned_core::BitIndex::from_elem(B),
            digits: set(&[3, 5]),
        }]
    );
    assert_eq!(technique.last_stats().hints, 1);
}

#[test]
fn test_exit_early_stops_after_first_hint() {
    // Both (A, B) and (B, X) eliminate 3 and 5 from B.
    let mut technique = engine(2);
    let mut all = HintAccumulator::all();
    assert_eq!(
        technique.find_hints(&sibling_pair(), &mut all).unwrap(),
        SearchOutcome::Found
    );
    assert_eq!(all.len(), 2);

    let mut first = HintAccumulator::first();
    technique.find_hints(&sibling_pair(), &mut first).unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(technique.last_stats().hints, 1);
}

#[test]
fn test_interrupted_search_reports_interrupted() {
    let interrupt = Interrupt::new();
    let config = AlignedExclusionConfig::new(2).unwrap();
    let mut technique = AlignedExclusion::with_interrupt(config, interrupt.clone());
    interrupt.set();

    let mut sink = HintAccumulator::all();
    let outcome = technique.find_hints(&sibling_pair(), &mut sink).unwrap();
    assert_eq!(outcome, SearchOutcome::Interrupted);
    assert!(sink.is_empty());
    assert!(technique.find_step(&sibling_pair()).unwrap().is_none());

    technique.interrupt_handle().clear();
    assert!(technique.find_step(&sibling_pair()).unwrap().is_some());
}

/// Sets the interrupt flag as soon as it receives a hint.
#[derive(Debug)]
struct InterruptingSink {
    interrupt: Interrupt,
    steps: Vec<BoxedTechniqueStep>,
}

impl HintSink for InterruptingSink {
    fn add(&mut self, step: BoxedTechniqueStep) -> bool {
        self.steps.push(step);
        self.interrupt.set();
        false
    }
}

#[test]
fn test_interrupt_during_search_stops_at_next_iteration() {
    // (A, B) hints on the second iteration; (B, X) would follow.
    let mut technique = engine(2);
    let mut sink = InterruptingSink {
        interrupt: technique.interrupt_handle(),
        steps: Vec::new(),
    };
    let outcome = technique.find_hints(&sibling_pair(), &mut sink).unwrap();
    assert_eq!(outcome, SearchOutcome::Interrupted);
    assert_eq!(sink.steps.len(), 1);

    let stats = technique.last_stats();
    assert_eq!(stats.iterations, 2);
    assert_eq!(stats.aligned_sets, 1);
    assert_eq!(stats.hints, 1);
}

#[test]
fn test_interrupted_search_is_not_applied() {
    let interrupt = Interrupt::new();
    let config = AlignedExclusionConfig::new(2).unwrap();
    let mut technique = AlignedExclusion::with_interrupt(config, interrupt.clone());
    interrupt.set();

    let mut grid = sibling_pair();
    assert!(!technique.apply(&mut grid).unwrap());
    assert_eq!(grid, sibling_pair());
}

#[test]
fn test_watchdog_reports_runaway() {
    let config = AlignedExclusionConfig::new(2)
        .unwrap()
        .with_watchdog_limit(Some(1));
    let mut technique = AlignedExclusion::new(config);
    let mut sink = HintAccumulator::all();
    assert_eq!(
        technique.find_hints(&sibling_pair(), &mut sink),
        Err(SolverError::SearchRunaway {
            technique: "Aligned Pair Exclusion",
            iterations: 2,
        })
    );
}

#[test]
fn test_default_budget_is_never_reached() {
    let mut technique = engine(2);
    technique.find_step(&unrelated_pair()).unwrap();
    let stats = technique.last_stats();
    // Two candidates: one set of two cells.
    assert!(stats.iterations <= default_budget(2, 2));
    assert_eq!(stats.aligned_sets, 1);
}

#[test]
fn test_default_budget_values() {
    assert_eq!(default_budget(2, 2), 2 * (2 + 1) + 1);
    assert_eq!(default_budget(9, 3), 2 * (9 + 36 + 84) + 1);
    assert_eq!(default_budget(1, 4), 2 + 1);
}

#[test]
fn test_inconsistent_grid_is_an_error() {
    let mut grid = sibling_pair();
    grid.set_maybes(A, DigitSet::EMPTY);
    let mut technique = engine(2);
    let mut sink = HintAccumulator::all();
    assert_eq!(
        technique.find_hints(&grid, &mut sink),
        Err(SolverError::Inconsistent(ConsistencyError::NoCandidates(A)))
    );
}

#[test]
fn test_second_call_is_served_from_cache() {
    let grid = unrelated_pair();
    let mut technique = engine(2);
    technique.prepare_for_new_puzzle();

    let first = collect_eliminations(&mut technique, &grid);
    assert_eq!(technique.last_stats().combo_searches, 1);
    let second = collect_eliminations(&mut technique, &grid);
    assert_eq!(first, second);
    assert_eq!(technique.last_stats().combo_searches, 0);
    assert_eq!(technique.last_stats().cache_hits, 1);

    technique.prepare_for_new_puzzle();
    collect_eliminations(&mut technique, &grid);
    assert_eq!(technique.last_stats().combo_searches, 1);
}

#[test]
fn test_changed_maybes_bypass_cache() {
    let mut grid = unrelated_pair();
    let mut technique = engine(2);
    collect_eliminations(&mut technique, &grid);

    grid.remove_candidate(Position::new(0, 0), Digit::D7);
    collect_eliminations(&mut technique, &grid);
    assert_eq!(technique.last_stats().cache_hits, 0);
    assert_eq!(technique.last_stats().combo_searches, 1);
}

#[test]
fn test_disabled_cache_searches_every_time() {
    let grid = unrelated_pair();
    let config = AlignedExclusionConfig::new(2).unwrap().with_cache(false);
    let mut technique = AlignedExclusion::new(config);
    collect_eliminations(&mut technique, &grid);
    collect_eliminations(&mut technique, &grid);
    assert_eq!(technique.last_stats().combo_searches, 1);
    assert_eq!(technique.last_stats().cache_hits, 0);
}

#[test]
fn test_hacked_mode_needs_two_excluders() {
    let hacked = AlignedExclusionConfig::new(2).unwrap().with_hacked(true);

    TechniqueTester::new(sibling_pair())
        .apply_once(&mut AlignedExclusion::new(hacked))
        .assert_no_change(B);

    // Y{5,9} in the same box adds a second excluder.
    let y = Position::new(0, 1);
    let grid = solved_grid_with_holes(&[
        (A, set(&[3, 5])),
        (B, set(&[3, 5, 9])),
        (X, set(&[3, 5])),
        (y, DigitSet::FULL),
    ]);
    TechniqueTester::new(grid)
        .with_maybes(y, [Digit::D5, Digit::D9])
        .apply_once(&mut AlignedExclusion::new(hacked))
        .assert_removed_includes(B, [Digit::D3, Digit::D5]);
}

#[test]
fn test_apply_until_stuck_matches_reference() {
    let tester = TechniqueTester::new(sibling_pair()).apply_until_stuck(&mut engine(2));
    assert!(reference_eliminations(tester.current(), 2).is_empty());
    tester.assert_removed_exact(B, [Digit::D3, Digit::D5]);
}

#[test]
fn test_triple_from_string() {
    // The three open cells of row 0 each have a single maybe, so none of
    // them is an excluder.
    let grid: Grid = "
        ___ 456 789
        456 789 123
        789 123 456
        234 567 891
        567 891 234
        891 234 567
        345 678 912
        678 912 345
        912 345 678
    "
    .parse()
    .unwrap();
    let mut technique = engine(3);
    assert_eq!(
        collect_eliminations(&mut technique, &grid),
        reference_eliminations(&grid, 3)
    );
    TechniqueTester::from_str(&grid.to_string())
        .apply_once(&mut technique)
        .assert_no_change(Position::new(0, 0));
}

#[test]
fn test_lifecycle_hooks_keep_results() {
    let mut technique = engine(2);
    let before = collect_eliminations(&mut technique, &sibling_pair());
    technique.after_puzzle_solved();
    technique.prepare_for_new_puzzle();
    assert_eq!(collect_eliminations(&mut technique, &sibling_pair()), before);
}

fn holes_strategy() -> impl Strategy<Value = Grid> {
    (
        proptest::sample::subsequence((0u8..81).collect::<Vec<_>>(), 6..=14),
        proptest::collection::vec(1u16..0x200, 14),
    )
        .prop_map(|(indexes, bits)| {
            let holes: Vec<(Position, DigitSet)> = indexes
                .into_iter()
                .zip(bits)
                .map(|(index, bits)| (Position::from_index(index), DigitSet::from_bits(bits)))
                .collect();
            solved_grid_with_holes(&holes)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_pairs_match_reference(grid in holes_strategy()) {
        let found = collect_eliminations(&mut engine(2), &grid);
        prop_assert_eq!(found, reference_eliminations(&grid, 2));
    }

    #[test]
    fn prop_triples_match_reference(grid in holes_strategy()) {
        let found = collect_eliminations(&mut engine(3), &grid);
        prop_assert_eq!(found, reference_eliminations(&grid, 3));
    }

    #[test]
    fn prop_cache_is_transparent(grid in holes_strategy(), degree in 2usize..=3) {
        let uncached_config = AlignedExclusionConfig::new(degree).unwrap().with_cache(false);
        let mut uncached = AlignedExclusion::new(uncached_config);
        let expected = collect_eliminations(&mut uncached, &grid);

        let mut cached = engine(degree);
        prop_assert_eq!(&collect_eliminations(&mut cached, &grid), &expected);
        prop_assert_eq!(&collect_eliminations(&mut cached, &grid), &expected);
        let warm = cached.last_stats();
        prop_assert_eq!(warm.hints, uncached.last_stats().hints);
        prop_assert!(warm.combo_searches <= uncached.last_stats().combo_searches);
    }

    #[test]
    fn prop_cache_follows_shrinking_maybes(
        grid in holes_strategy(),
        pick in any::<proptest::sample::Index>(),
    ) {
        let mut cached = engine(2);
        collect_eliminations(&mut cached, &grid);

        // Drop one maybe from a cell that keeps at least one.
        let mut shrunk = grid.clone();
        let cells: Vec<Position> = grid
            .empty_cells()
            .into_iter()
            .filter(|&pos| grid.maybes(pos).len() > 1)
            .collect();
        if !cells.is_empty() {
            let pos = *pick.get(&cells);
            if let Some(digit) = grid.maybes(pos).first() {
                shrunk.remove_candidate(pos, digit);
            }
        }

        prop_assert_eq!(
            collect_eliminations(&mut cached, &shrunk),
            collect_eliminations(&mut engine(2), &shrunk)
        );
    }

    #[test]
    fn prop_hacked_finds_a_subset(grid in holes_strategy(), degree in 2usize..=3) {
        let hacked = AlignedExclusionConfig::new(degree).unwrap().with_hacked(true);
        let partial = collect_eliminations(&mut AlignedExclusion::new(hacked), &grid);
        let full = collect_eliminations(&mut engine(degree), &grid);
        for (pos, digits) in partial {
            let found = full.get(&pos).copied().unwrap_or_default();
            prop_assert!(digits.is_subset(found), "{pos:?}: {digits:?} not within {found:?}");
        }
    }
}
