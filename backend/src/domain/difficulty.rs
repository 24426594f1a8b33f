//! Perceived difficulty of a logged set-group.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the set-group felt. Labels are stored verbatim in the workout log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// The target was hit cleanly.
    #[default]
    #[serde(rename = "Perfect")]
    Perfect,
    /// The load was too light.
    #[serde(rename = "Too Easy")]
    TooEasy,
    /// The load was too heavy or a set was failed.
    #[serde(rename = "Too Hard/Fail")]
    TooHardOrFail,
}

/// Raised when a label is not one of [`Difficulty::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}'")]
pub struct UnknownDifficulty(pub String);

impl Difficulty {
    /// Every difficulty, in the order offered to the user.
    pub const ALL: [Self; 3] = [Self::Perfect, Self::TooEasy, Self::TooHardOrFail];

    /// Label shown in the form and written to the log.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Perfect => "Perfect",
            Self::TooEasy => "Too Easy",
            Self::TooHardOrFail => "Too Hard/Fail",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.label() == s)
            .ok_or_else(|| UnknownDifficulty(s.to_owned()))
    }
}
