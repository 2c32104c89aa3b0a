use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("percentage must be between 0 and 100, got {provided}")]
pub struct PercentError {
    pub provided: i64,
}

/// Whole-number completion percentage in `0..=100`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percent(u8);

impl Percent {
    pub const ZERO: Self = Self(0);
    pub const FULL: Self = Self(100);

    /// Strict constructor.
    ///
    /// # Errors
    ///
    /// Returns `PercentError` if `value` exceeds 100.
    pub fn new(value: u8) -> Result<Self, PercentError> {
        if value > 100 {
            return Err(PercentError {
                provided: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Clips any integer into `0..=100`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let clipped = value.clamp(0, 100);
        // clamp guarantees the value fits in a u8
        Self(u8::try_from(clipped).unwrap_or(100))
    }

    /// `round(100 * part / total)`, rounding half up. An empty total is 0%.
    #[must_use]
    pub fn ratio(part: usize, total: usize) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        let part = part.min(total) as u128;
        let total = total as u128;
        let rounded = (200 * part + total) / (2 * total);
        Self(u8::try_from(rounded).unwrap_or(100))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn is_full(self) -> bool {
        self.0 == 100
    }
}

impl TryFrom<u8> for Percent {
    type Error = PercentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percent> for u8 {
    fn from(value: Percent) -> Self {
        value.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
