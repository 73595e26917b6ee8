//! Rhythmic grid: pulses of the measure, possibly unequal.
use serde::{Deserialize, Serialize};

use super::{GridError, GridResult, Length};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSignature {
    pub numerator: u32,
    pub denominator: u32,
}
impl TimeSignature {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}
impl From<&TimeSignature> for Length {
    fn from(ts: &TimeSignature) -> Self {
        Length::new(ts.numerator as u64, ts.denominator as u64)
    }
}

/// Ordered pulses of the measure, e.g. `3/8 + 2/8 + 2/8`.
///
/// Keeps also absolute grid: offsets of every pulse start
/// and the end of the last pulse, beginning from zero.
///
/// # Example
///
/// ```
/// # use grid_notation::primitives::{Grid, Length, TimeSignature};
/// let grid = Grid::from_groups(&[3, 2, 2], 8).unwrap();
/// assert_eq!(
///     grid.absolute(),
///     &[Length::zero(), Length::new(3, 8), Length::new(5, 8), Length::new(7, 8)]
/// );
/// assert_eq!(grid.total(), Length::new(7, 8));
/// assert_eq!(grid.time_signature().unwrap(), TimeSignature::new(7, 8));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Length>", into = "Vec<Length>")]
pub struct Grid {
    pulses: Vec<Length>,
    absolute: Vec<Length>,
}
impl Grid {
    pub fn new(pulses: impl IntoIterator<Item = Length>) -> GridResult<Self> {
        let pulses: Vec<Length> = pulses.into_iter().collect();
        if pulses.is_empty() {
            return Err(GridError::InvalidGrid("grid has no pulses".to_string()));
        }
        if let Some(pulse) = pulses.iter().find(|pulse| pulse.is_zero()) {
            return Err(GridError::InvalidGrid(format!(
                "pulse should be positive, got: {pulse}"
            )));
        }
        let absolute = std::iter::once(Length::zero())
            .chain(pulses.iter().scan(Length::zero(), |acc, pulse| {
                *acc += *pulse;
                Some(*acc)
            }))
            .collect();
        Ok(Self { pulses, absolute })
    }

    /// Pulses as groups of `1/denominator`, e.g. `[3, 2, 2]` of 8.
    pub fn from_groups(groups: &[u64], denominator: u64) -> GridResult<Self> {
        if denominator == 0 {
            return Err(GridError::InvalidGrid(
                "denominator can not be zero".to_string(),
            ));
        }
        Self::new(groups.iter().map(|group| Length::new(*group, denominator)))
    }

    /// One pulse per time signature denominator: 4/4 gives four quarters.
    pub fn from_time_signature(ts: &TimeSignature) -> GridResult<Self> {
        Self::from_groups(
            &vec![1; ts.numerator as usize],
            ts.denominator as u64,
        )
    }

    pub fn pulses(&self) -> &[Length] {
        &self.pulses
    }
    /// Pulse offsets, starting from zero. Has one item more than pulses.
    pub fn absolute(&self) -> &[Length] {
        &self.absolute
    }
    pub fn total(&self) -> Length {
        self.absolute[self.absolute.len() - 1]
    }
    pub fn len(&self) -> usize {
        self.pulses.len()
    }
    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }

    /// True if position is exactly on the pulse start (or the grid end).
    pub fn is_boundary(&self, position: Length) -> bool {
        self.absolute.binary_search(&position).is_ok()
    }

    /// Index of the pulse, containing position.
    ///
    /// Position on the boundary belongs to the pulse, starting there.
    /// Positions beyond the grid belong to the last pulse.
    pub fn cell_at(&self, position: Length) -> usize {
        cell_at(&self.absolute, position)
    }

    /// Index of the pulse, containing end of span.
    ///
    /// End on the boundary belongs to the pulse, finishing there.
    pub fn cell_ending_at(&self, end: Length) -> usize {
        let idx = self.absolute.partition_point(|offset| *offset < end);
        idx.saturating_sub(1).min(self.len() - 1)
    }

    /// Time signature with the smallest common denominator of pulses.
    pub fn time_signature(&self) -> GridResult<TimeSignature> {
        let denominator = self
            .pulses
            .iter()
            .fold(1u64, |acc, pulse| lcm(acc, pulse.denom()));
        let total = self.total();
        let numerator = total.numer() * (denominator / total.denom());
        let convert = |value: u64| {
            u32::try_from(value).map_err(|_| {
                GridError::InvalidGrid(format!(
                    "time signature is too big: {numerator}/{denominator}"
                ))
            })
        };
        Ok(TimeSignature::new(convert(numerator)?, convert(denominator)?))
    }
}
impl TryFrom<Vec<Length>> for Grid {
    type Error = GridError;
    fn try_from(value: Vec<Length>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
impl From<Grid> for Vec<Length> {
    fn from(grid: Grid) -> Self {
        grid.pulses
    }
}

/// Index of the absolute grid cell, containing position.
pub(crate) fn cell_at(absolute: &[Length], position: Length) -> usize {
    let idx = absolute.partition_point(|offset| *offset <= position);
    idx.saturating_sub(1).min(absolute.len().saturating_sub(2))
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}
