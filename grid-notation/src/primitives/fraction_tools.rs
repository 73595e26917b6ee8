//! Tools for optimizing fractions as musical lengths.

use log::{debug, trace};

use super::{GridError, GridResult, Length};

/// Lengths from here on can not be written by a single glyph
/// (maxima with three dots is 15 whole notes).
const ASSIGNABLE_LIMIT: u64 = 16;

/// True for integers, which binary form is ones followed by zeros:
/// `0b111000` is `(2^3 - 1) * 2^3`.
fn is_assignable_integer(num: u64) -> bool {
    if num == 0 {
        return false;
    }
    let ones = num >> num.trailing_zeros();
    ones & (ones + 1) == 0
}

/// True if length can be written by one glyph with (or without) dots.
///
/// # Example
///
/// ```
/// # use grid_notation::primitives::{is_assignable, Length};
/// assert!(is_assignable(Length::new(3, 8)));
/// assert!(is_assignable(Length::new(7, 16)));
/// assert!(is_assignable(Length::from(2)));
/// assert!(!is_assignable(Length::new(5, 8)));
/// assert!(!is_assignable(Length::new(1, 12)));
/// assert!(!is_assignable(Length::zero()));
/// ```
pub fn is_assignable(length: Length) -> bool {
    if length.is_zero() || length >= Length::from(ASSIGNABLE_LIMIT) {
        return false;
    }
    length.denom().is_power_of_two() && is_assignable_integer(length.numer())
}

/// Get base glyph length and amount of dots of assignable length.
///
/// # Example
///
/// ```
/// # use grid_notation::primitives::{dots, Length};
/// assert_eq!(dots(Length::new(1, 4)), Some((Length::new(1, 4), 0)));
/// assert_eq!(dots(Length::new(7, 16)), Some((Length::new(1, 4), 2)));
/// assert_eq!(dots(Length::from(6)), Some((Length::from(4), 1)));
/// assert_eq!(dots(Length::new(5, 8)), None);
/// ```
pub fn dots(length: Length) -> Option<(Length, u32)> {
    if !is_assignable(length) {
        return None;
    }
    let num = length.numer();
    let shift = num.trailing_zeros();
    let ones = num >> shift;
    let dots = ones.trailing_ones() - 1;
    let base = Length::new(1u64 << (shift + dots), length.denom());
    Some((base, dots))
}

/// Split length by assignable lengths, each not longer than `max_length`.
///
/// Goes greedy from the biggest candidate to the smallest, so, the result
/// starts with the largest length. Candidates are all multiples of
/// `1/denominator` of the reduced length.
///
/// # Example
///
/// ```
/// # use grid_notation::primitives::{separate_by_assignability, Length};
/// assert_eq!(
///     separate_by_assignability(Length::new(13, 16), Length::whole()).unwrap(),
///     vec![Length::new(3, 4), Length::new(1, 16)]
/// );
/// ```
pub fn separate_by_assignability(
    length: Length,
    max_length: Length,
) -> GridResult<Vec<Length>> {
    if length.is_zero() {
        return Ok(Vec::new());
    }
    if is_assignable(length) && length <= max_length {
        return Ok(vec![length]);
    }
    let denom = length.denom();
    let candidates: Vec<Length> = (1..=length.numer())
        .rev()
        .map(|numer| Length::new(numer, denom))
        .filter(|candidate| is_assignable(*candidate) && *candidate <= max_length)
        .collect();
    trace!("candidates for {length}: {candidates:?}");
    if candidates.is_empty() {
        return Err(GridError::UnsatisfiableDecomposition {
            duration: length,
            max: max_length,
        });
    }

    let mut result = Vec::new();
    let mut sum = Length::zero();
    let mut candidates = candidates.into_iter();
    let mut current = candidates.next();
    while sum != length {
        let candidate = match current {
            Some(candidate) => candidate,
            None => {
                return Err(GridError::UnsatisfiableDecomposition {
                    duration: length,
                    max: max_length,
                })
            }
        };
        match sum + candidate <= length {
            true => {
                result.push(candidate);
                sum += candidate;
            }
            false => current = candidates.next(),
        }
    }
    debug!("{length} separated by assignability: {result:?}");
    Ok(result)
}
