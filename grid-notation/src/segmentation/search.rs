//! Search of the partition of grid pieces with the fewest runs.
use std::ops::Range;

use itertools::Itertools;
use log::trace;

use crate::primitives::{is_assignable, Length};

/// Piece of span, lying in one grid cell.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Candidate {
    pub length: Length,
    /// Piece can be tied to its neighbor.
    pub connectable: bool,
}
impl Candidate {
    pub fn new(length: Length, connectable: bool) -> Self {
        Self {
            length,
            connectable,
        }
    }
}

/// Contiguous candidates, which can be written as one note
/// (or tied notes, if only one candidate is in the run).
#[derive(Debug, PartialEq, Clone)]
pub struct Run {
    pub candidates: Range<usize>,
    pub length: Length,
}

/// Every allowed run of candidates.
///
/// Single candidates go first, in order. Then merged runs of connectable
/// candidates with assignable sum, ordered by their start, then by end.
pub fn runs(candidates: &[Candidate]) -> Vec<Run> {
    let mut runs: Vec<Run> = candidates
        .iter()
        .enumerate()
        .map(|(idx, candidate)| Run {
            candidates: idx..idx + 1,
            length: candidate.length,
        })
        .collect();
    let amount = candidates.len();
    for start in 0..amount {
        for end in (start + 2)..=amount {
            let run = &candidates[start..end];
            if !run.iter().all(|c| c.connectable) {
                continue;
            }
            let length: Length = run.iter().map(|c| c.length).sum();
            if is_assignable(length) {
                runs.push(Run {
                    candidates: start..end,
                    length,
                });
            }
        }
    }
    runs
}

/// Partition candidates into contiguous runs, using as few runs as possible.
///
/// Combinations of allowed runs are checked by size ascending, in
/// lexicographic order of their indices in [runs], and the first one,
/// covering every candidate exactly once, wins. Every candidate standing
/// alone is always valid, so `None` is returned only for empty input.
pub fn fewest_runs(candidates: &[Candidate]) -> Option<Vec<Length>> {
    let amount = candidates.len();
    let runs = runs(candidates);
    trace!("allowed runs: {runs:?}");
    for size in 1..=amount {
        for combination in runs.iter().combinations(size) {
            if !covers_once(&combination, amount) {
                continue;
            }
            trace!("partition accepted: {combination:?}");
            let result = combination
                .into_iter()
                .sorted_by_key(|run| run.candidates.start)
                .map(|run| run.length)
                .collect();
            return Some(result);
        }
    }
    None
}

fn covers_once(combination: &[&Run], amount: usize) -> bool {
    let mut covered = vec![false; amount];
    for run in combination.iter() {
        for idx in run.candidates.clone() {
            if covered[idx] {
                return false;
            }
            covered[idx] = true;
        }
    }
    covered.into_iter().all(|c| c)
}
