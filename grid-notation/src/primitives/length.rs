use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
    str::FromStr,
};

use fraction::Fraction;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::GridError;

/// Exact musical length in whole notes.
///
/// Never negative: subtraction which would go below zero panics,
/// use [Length::checked_sub] when it is not known in advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Length {
    fraction: Fraction,
}
impl Length {
    /// # Panics
    ///
    /// if denominator is zero.
    pub fn new(numer: u64, denom: u64) -> Self {
        assert!(denom > 0, "length denominator can not be zero");
        Self {
            fraction: Fraction::new(numer, denom),
        }
    }
    pub fn zero() -> Self {
        Self::new(0, 1)
    }
    /// One whole note.
    pub fn whole() -> Self {
        Self::new(1, 1)
    }
    pub fn get(&self) -> Fraction {
        self.fraction
    }
    /// Numerator of the reduced fraction.
    pub fn numer(&self) -> u64 {
        *self.fraction.numer().unwrap_or(&0)
    }
    /// Denominator of the reduced fraction.
    pub fn denom(&self) -> u64 {
        *self.fraction.denom().unwrap_or(&1)
    }
    pub fn is_zero(&self) -> bool {
        self.numer() == 0
    }
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        match rhs > self {
            true => None,
            false => Some(Self {
                fraction: self.fraction - rhs.fraction,
            }),
        }
    }
}
impl Default for Length {
    fn default() -> Self {
        Self::zero()
    }
}
impl TryFrom<Fraction> for Length {
    type Error = GridError;
    fn try_from(value: Fraction) -> Result<Self, Self::Error> {
        if value == Fraction::new(0u64, 1u64) {
            return Ok(Self::zero());
        }
        if !value.is_normal() || value.is_sign_negative() {
            return Err(GridError::ParseLength(value.to_string()));
        }
        Ok(Self::new(
            *value.numer().unwrap_or(&0),
            *value.denom().unwrap_or(&1),
        ))
    }
}
impl From<u64> for Length {
    fn from(value: u64) -> Self {
        Self::new(value, 1)
    }
}
impl Add for Length {
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            fraction: self.fraction + rhs.fraction,
        }
    }
    type Output = Self;
}
impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Self) {
        self.fraction = self.fraction + rhs.fraction
    }
}
impl Sub for Length {
    fn sub(self, rhs: Self) -> Self::Output {
        match self.checked_sub(rhs) {
            Some(length) => length,
            None => panic!(
                "length can not be negative. left: {}, right: {}",
                self, rhs
            ),
        }
    }
    type Output = Self;
}
impl Sum for Length {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, length| acc + length)
    }
}
impl<'a> Sum<&'a Length> for Length {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, length| acc + *length)
    }
}
impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.denom() {
            1 => write!(f, "{}", self.numer()),
            denom => write!(f, "{}/{}", self.numer(), denom),
        }
    }
}
impl FromStr for Length {
    type Err = GridError;

    /// Parses `"3/8"` or `"2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || GridError::ParseLength(s.to_string());
        let (numer, denom) = match s.split_once('/') {
            Some((numer, denom)) => (numer, denom),
            None => (s, "1"),
        };
        let numer: u64 = numer.trim().parse().map_err(|_| err())?;
        let denom: u64 = denom.trim().parse().map_err(|_| err())?;
        if denom == 0 {
            return Err(err());
        }
        Ok(Self::new(numer, denom))
    }
}
impl Serialize for Length {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
impl<'de> Deserialize<'de> for Length {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
