//! Training load in pounds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors raised when constructing a [`Weight`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeightValidationError {
    /// The value is NaN or infinite.
    #[error("weight must be a finite number")]
    NotFinite,
    /// The value is below zero.
    #[error("weight must not be negative")]
    Negative,
    /// The text could not be read as a number.
    #[error("weight must be a number, got '{value}'")]
    NotANumber {
        /// Rejected text.
        value: String,
    },
}

/// A non-negative, finite load in pounds.
///
/// Whole numbers render without a fractional part so `45` reads as `45`.
///
/// # Examples
/// ```
/// use gym_tracker::domain::Weight;
///
/// let weight = Weight::new(47.5).expect("valid weight");
/// assert_eq!(weight.to_string(), "47.5");
/// assert_eq!(Weight::new(45.0).expect("valid weight").to_string(), "45");
/// assert!(Weight::new(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Weight(f64);

impl Weight {
    /// The neutral weight used for unknown exercises and bodyweight work.
    pub const ZERO: Self = Self(0.0);

    /// Validate and wrap a pound value.
    ///
    /// # Errors
    ///
    /// Returns [`WeightValidationError`] for negative or non-finite input.
    pub fn new(pounds: f64) -> Result<Self, WeightValidationError> {
        if !pounds.is_finite() {
            return Err(WeightValidationError::NotFinite);
        }
        if pounds < 0.0 {
            return Err(WeightValidationError::Negative);
        }
        // Normalise -0.0 so it renders as "0".
        Ok(Self(pounds + 0.0))
    }

    pub(crate) const fn from_pounds_unchecked(pounds: f64) -> Self {
        Self(pounds)
    }

    /// Raw value in pounds.
    #[must_use]
    pub const fn as_pounds(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Weight {
    type Err = WeightValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let pounds = trimmed
            .parse::<f64>()
            .map_err(|_| WeightValidationError::NotANumber {
                value: trimmed.to_owned(),
            })?;
        Self::new(pounds)
    }
}

impl TryFrom<f64> for Weight {
    type Error = WeightValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Weight> for f64 {
    fn from(value: Weight) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("45", 45.0)]
    #[case(" 52.5 ", 52.5)]
    #[case("0", 0.0)]
    fn parses_numeric_text(#[case] input: &str, #[case] expected: f64) {
        let weight: Weight = input.parse().expect("valid weight");
        assert_eq!(weight.as_pounds(), expected);
    }

    #[rstest]
    #[case("", WeightValidationError::NotANumber { value: String::new() })]
    #[case("heavy", WeightValidationError::NotANumber { value: "heavy".to_owned() })]
    #[case("-5", WeightValidationError::Negative)]
    #[case("NaN", WeightValidationError::NotFinite)]
    #[case("inf", WeightValidationError::NotFinite)]
    fn rejects_invalid_text(#[case] input: &str, #[case] expected: WeightValidationError) {
        let error = input.parse::<Weight>().expect_err("invalid weight");
        assert_eq!(error, expected);
    }

    #[test]
    fn negative_zero_renders_as_zero() {
        let weight = Weight::new(-0.0).expect("zero is valid");
        assert_eq!(weight.to_string(), "0");
    }

    #[test]
    fn deserialisation_validates() {
        assert!(serde_json::from_str::<Weight>("-3").is_err());
        let weight: Weight = serde_json::from_str("55").expect("valid weight");
        assert_eq!(weight.as_pounds(), 55.0);
    }
}
