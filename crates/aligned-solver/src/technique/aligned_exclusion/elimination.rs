//! Turning a combo-search result into a hint.

use aligned_core::{Digit, DigitSet, Position};

use super::{
    combo::AlignedSet,
    excluders::Excluders,
    hint::{AlignedExclusionHint, RejectedCombo, Rejection},
};

/// Builds the hint for an aligned set whose search left some maybes unused.
///
/// Returns `None` if no cell actually loses a maybe.
pub(crate) fn build_hint(
    name: &'static str,
    set: &AlignedSet,
    allowed: &[DigitSet],
    excluders: &Excluders,
    rejection_limit: usize,
) -> Option<AlignedExclusionHint> {
    let excluded: Vec<DigitSet> = set
        .maybes()
        .iter()
        .zip(allowed)
        .map(|(&maybes, &allowed)| maybes.difference(allowed))
        .collect();

    let eliminations: Vec<(Position, DigitSet)> = set
        .cells()
        .iter()
        .copied()
        .zip(excluded.iter().copied())
        .filter(|(_, digits)| !digits.is_empty())
        .collect();
    if eliminations.is_empty() {
        return None;
    }

    let rejections = collect_rejections(set, allowed, &excluded, excluders, rejection_limit);
    let excluders = excluders
        .cells()
        .iter()
        .copied()
        .zip(excluders.maybes().iter().copied())
        .collect();

    Some(AlignedExclusionHint::new(
        name,
        set.cells().to_vec(),
        eliminations,
        excluders,
        rejections,
    ))
}

/// Lists rejected combos that use an eliminated value, with the reason each
/// one fails.
///
/// Every such combo is enumerated once, keyed by its first cell holding an
/// eliminated value: earlier cells range over their allowed values, that cell
/// over its eliminated ones, later cells over all maybes. All of them are
/// rejected, so the enumeration stops after `limit` combos.
fn collect_rejections(
    set: &AlignedSet,
    allowed: &[DigitSet],
    excluded: &[DigitSet],
    excluders: &Excluders,
    limit: usize,
) -> Vec<RejectedCombo> {
    let mut rejections = Vec::new();
    let degree = set.len();

    for first in 0..degree {
        if excluded[first].is_empty() {
            continue;
        }
        let choices: Vec<Vec<Digit>> = (0..degree)
            .map(|i| {
                let digits = match i.cmp(&first) {
                    std::cmp::Ordering::Less => allowed[i],
                    std::cmp::Ordering::Equal => excluded[i],
                    std::cmp::Ordering::Greater => set.maybes()[i],
                };
                digits.iter().collect()
            })
            .collect();
        if choices.iter().any(Vec::is_empty) {
            continue;
        }

        let mut cursor = vec![0; degree];
        loop {
            if rejections.len() >= limit {
                return rejections;
            }
            let values: Vec<Digit> = cursor.iter().zip(&choices).map(|(&c, d)| d[c]).collect();
            if let Some(reason) = rejection_reason(set, &values, excluders) {
                let values = set.cells().iter().copied().zip(values).collect();
                rejections.push(RejectedCombo::new(values, reason));
            }
            if !advance(&mut cursor, &choices) {
                break;
            }
        }
    }
    rejections
}

fn rejection_reason(
    set: &AlignedSet,
    values: &[Digit],
    excluders: &Excluders,
) -> Option<Rejection> {
    let cells = set.cells();
    for i in 0..values.len() {
        for j in i + 1..values.len() {
            if values[i] == values[j] && set.sees(i, j) {
                return Some(Rejection::Collision {
                    first: cells[i],
                    second: cells[j],
                });
            }
        }
    }
    let combo: DigitSet = values.iter().copied().collect();
    excluders
        .cells()
        .iter()
        .zip(excluders.maybes())
        .find(|(_, maybes)| maybes.is_subset(combo))
        .map(|(&pos, _)| Rejection::Excluder(pos))
}

/// Odometer step over the choice lists. Returns `false` after the last combo.
fn advance(cursor: &mut [usize], choices: &[Vec<Digit>]) -> bool {
    for i in (0..cursor.len()).rev() {
        cursor[i] += 1;
        if cursor[i] < choices[i].len() {
            return true;
        }
        cursor[i] = 0;
    }
    false
}
