//! Splitting of the event span by the rhythmic grid.
//!
//! Span, crossing pulse boundaries, is cut into pieces by pulses, and then
//! those pieces, which can be tied legibly, are merged back, if their sum is
//! one glyph. So `1/8..3/4` over `3/8 + 2/8 + 2/8` becomes `1/2, 1/8`, while
//! with the hard cut it stays `1/4, 1/4, 1/8`.
use derivative::Derivative;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::primitives::{Grid, GridError, GridResult, Length};

pub mod search;

use search::{fewest_runs, Candidate};

/// How events are split by the grid and by assignability.
///
/// # Example
///
/// ```
/// # use grid_notation::segmentation::SegmentSettings;
/// # use grid_notation::primitives::Length;
/// let settings = SegmentSettings::default();
/// assert!(!settings.hard_cut);
/// assert_eq!(settings.connectable_denominator, 4);
/// assert_eq!(settings.max_length, Length::whole());
/// ```
#[derive(Derivative, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(default)]
pub struct SegmentSettings {
    /// Cut at every pulse boundary, never merging pieces.
    pub hard_cut: bool,
    /// Piece, touching the grid not on its boundary, still can be tied,
    /// if its length has denominator not bigger than this.
    #[derivative(Default(value = "4"))]
    pub connectable_denominator: u64,
    /// The longest single glyph.
    #[derivative(Default(value = "Length::whole()"))]
    pub max_length: Length,
}
impl SegmentSettings {
    pub fn hard_cut() -> Self {
        Self {
            hard_cut: true,
            ..Default::default()
        }
    }
}

/// Split span `start..stop` by grid pulses.
///
/// # Returns
/// Lengths of pieces, from left to right, which sum to `stop - start`.
///
/// # Example
///
/// ```
/// # use grid_notation::primitives::{Grid, Length};
/// # use grid_notation::segmentation::{separate_by_grid, SegmentSettings};
/// let grid = Grid::from_groups(&[3, 2, 2], 8).unwrap();
/// let settings = SegmentSettings::default();
/// assert_eq!(
///     separate_by_grid(Length::new(1, 8), Length::new(3, 4), &grid, &settings).unwrap(),
///     vec![Length::new(1, 2), Length::new(1, 8)]
/// );
/// // double dotted half fills the whole measure
/// assert_eq!(
///     separate_by_grid(Length::zero(), Length::new(7, 8), &grid, &settings).unwrap(),
///     vec![Length::new(7, 8)]
/// );
/// ```
pub fn separate_by_grid(
    start: Length,
    stop: Length,
    grid: &Grid,
    settings: &SegmentSettings,
) -> GridResult<Vec<Length>> {
    if start >= stop || stop > grid.total() {
        return Err(GridError::InvalidSpan {
            start,
            stop,
            total: grid.total(),
        });
    }
    let first_cell = grid.cell_at(start);
    let last_cell = grid.cell_ending_at(stop);
    if first_cell == last_cell {
        return Ok(vec![stop - start]);
    }

    if settings.hard_cut {
        let result = hard_cut(start, stop, grid);
        debug!("{start}..{stop} cut by grid: {result:?}");
        return Ok(result);
    }

    let absolute = grid.absolute();
    let candidates: Vec<Candidate> = (first_cell..=last_cell)
        .map(|cell| {
            if cell == first_cell {
                let length = absolute[cell + 1] - start;
                let connectable = grid.is_boundary(start)
                    || length.denom() <= settings.connectable_denominator;
                Candidate::new(length, connectable)
            } else if cell == last_cell {
                let length = stop - absolute[cell];
                let connectable = grid.is_boundary(stop)
                    || length.denom() <= settings.connectable_denominator;
                Candidate::new(length, connectable)
            } else {
                Candidate::new(grid.pulses()[cell], true)
            }
        })
        .filter(|candidate| !candidate.length.is_zero())
        .collect();
    if candidates.len() == 1 {
        return Ok(vec![candidates[0].length]);
    }

    let result =
        fewest_runs(&candidates).ok_or(GridError::SearchExhausted { start, stop })?;
    debug!("{start}..{stop} separated by grid: {result:?}");
    Ok(result)
}

/// Cut at every grid boundary strictly between start and stop.
fn hard_cut(start: Length, stop: Length, grid: &Grid) -> Vec<Length> {
    let inner = grid
        .absolute()
        .iter()
        .filter(|offset| **offset > start && **offset < stop);
    let positions: Vec<Length> = std::iter::once(start)
        .chain(inner.copied())
        .chain(std::iter::once(stop))
        .collect();
    positions.windows(2).map(|pair| pair[1] - pair[0]).collect()
}
