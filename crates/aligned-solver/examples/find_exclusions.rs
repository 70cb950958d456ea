//! Example that runs aligned exclusion and hidden sets on one puzzle.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example find_exclusions -- \
//!     1.......2.9.4...5...6...7...5.9.3.......7.......85..4.7.....6...3...9.8...2.....1
//! ```
//!
//! Report every hint instead of the first one per technique, and search
//! aligned triples as well as pairs:
//!
//! ```sh
//! cargo run --example find_exclusions -- --all --degree 2 --degree 3 <PUZZLE>
//! ```
//!
//! Require two common excluders ("hacked" mode), and keep applying hints
//! until no technique makes progress:
//!
//! ```sh
//! cargo run --example find_exclusions -- --hacked --apply <PUZZLE>
//! ```
//!
//! Set `RUST_LOG=debug` to see the search log.

use std::process;

use aligned_core::Grid;
use aligned_solver::{
    AlignedExclusion, AlignedExclusionConfig, BoxedTechnique, HiddenSet, HintAccumulator,
    SearchOutcome, TechniqueApplication,
};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Puzzle as 81 characters; `.`, `_` or `0` for empty cells.
    puzzle: String,

    /// Aligned set size (2-10). Repeatable.
    #[arg(short, long = "degree", value_name = "N", default_values_t = [2, 3])]
    degrees: Vec<usize>,

    /// Require two common excluders instead of one.
    #[arg(long)]
    hacked: bool,

    /// Report every hint, not only the first one per technique.
    #[arg(long)]
    all: bool,

    /// Skip the hidden set techniques.
    #[arg(long)]
    no_hidden: bool,

    /// Apply hints until no technique makes progress, then print the grid.
    #[arg(long)]
    apply: bool,
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let mut grid: Grid = match args.puzzle.parse() {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("Invalid puzzle: {err}");
            process::exit(2);
        }
    };

    let mut techniques = match build_techniques(&args) {
        Ok(techniques) => techniques,
        Err(err) => {
            eprintln!("Invalid configuration: {err}");
            process::exit(2);
        }
    };
    for technique in &mut techniques {
        technique.prepare_for_new_puzzle();
    }

    if args.apply {
        apply_until_stuck(&mut techniques, &mut grid);
    } else {
        report(&mut techniques, &grid, args.all);
    }
}

fn build_techniques(args: &Args) -> Result<Vec<BoxedTechnique>, aligned_solver::ConfigError> {
    let mut techniques: Vec<BoxedTechnique> = Vec::new();
    if !args.no_hidden {
        techniques.push(Box::new(HiddenSet::pair()));
        techniques.push(Box::new(HiddenSet::triple()));
        techniques.push(Box::new(HiddenSet::quad()));
    }
    for &degree in &args.degrees {
        let config = AlignedExclusionConfig::new(degree)?.with_hacked(args.hacked);
        techniques.push(Box::new(AlignedExclusion::new(config)));
    }
    Ok(techniques)
}

fn report(techniques: &mut [BoxedTechnique], grid: &Grid, all: bool) {
    for technique in techniques {
        let mut sink = if all {
            HintAccumulator::all()
        } else {
            HintAccumulator::first()
        };
        let outcome = match technique.find_hints(grid, &mut sink) {
            Ok(outcome) => outcome,
            Err(err) => {
                eprintln!("{}: {err}", technique.name());
                process::exit(1);
            }
        };
        if outcome == SearchOutcome::NotFound {
            println!("{}: nothing found", technique.name());
            continue;
        }
        for step in sink.steps() {
            let cells: Vec<String> = step
                .condition_cells()
                .iter()
                .map(|pos| pos.to_string())
                .collect();
            println!("{} [{}]", step.technique_name(), cells.join(" "));
            for application in step.application() {
                let TechniqueApplication::CandidateElimination { positions, digits } = application;
                for pos in positions {
                    let removed = grid.maybes(pos) & digits;
                    if !removed.is_empty() {
                        println!("    {pos}: remove {removed}");
                    }
                }
            }
        }
    }
}

fn apply_until_stuck(techniques: &mut [BoxedTechnique], grid: &mut Grid) {
    let mut rounds = 0;
    loop {
        let mut changed = false;
        for technique in techniques.iter_mut() {
            match technique.apply(grid) {
                Ok(true) => {
                    println!("{} made progress", technique.name());
                    changed = true;
                    break;
                }
                Ok(false) => {}
                Err(err) => {
                    eprintln!("{}: {err}", technique.name());
                    process::exit(1);
                }
            }
        }
        if !changed {
            break;
        }
        rounds += 1;
    }
    for technique in techniques.iter_mut() {
        technique.after_puzzle_solved();
    }
    println!("{rounds} rounds");
    println!("{grid:?}");
}
