//! Fixed athlete profile embedded in coaching prompts.

use super::Weight;

const DEFAULT_AGE: u32 = 25;
const DEFAULT_SEX: &str = "male";
const DEFAULT_BODY_WEIGHT_LBS: f64 = 280.0;

/// Who the coach is advising.
#[derive(Debug, Clone, PartialEq)]
pub struct AthleteProfile {
    /// Age in years.
    pub age: u32,
    /// Free-form sex descriptor, e.g. `male`.
    pub sex: String,
    /// Body weight in pounds.
    pub body_weight: Weight,
}

impl Default for AthleteProfile {
    fn default() -> Self {
        Self {
            age: DEFAULT_AGE,
            sex: DEFAULT_SEX.to_owned(),
            body_weight: Weight::from_pounds_unchecked(DEFAULT_BODY_WEIGHT_LBS),
        }
    }
}
