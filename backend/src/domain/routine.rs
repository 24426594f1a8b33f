//! Static training routine.
//!
//! The routine is deployment data: four fixed days, each an ordered list of
//! machine exercises with target volume and a starting weight used until the
//! workout log has history for the exercise.
//!
//! Exercise names double as lookup keys into the log and must match logged
//! rows exactly, including case.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::Weight;

/// One exercise in the routine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExerciseSpec {
    /// Display name and log lookup key.
    pub name: &'static str,
    /// Planned number of sets.
    pub target_sets: u32,
    /// Free-form rep target: a range (`8-10`), a count or a duration.
    pub target_reps: &'static str,
    /// Starting weight when the log has no history.
    pub default_weight: Weight,
}

const fn exercise(
    name: &'static str,
    target_sets: u32,
    target_reps: &'static str,
    default_pounds: f64,
) -> ExerciseSpec {
    ExerciseSpec {
        name,
        target_sets,
        target_reps,
        default_weight: Weight::from_pounds_unchecked(default_pounds),
    }
}

static PUSH: [ExerciseSpec; 6] = [
    exercise("Machine Chest Press", 3, "8-10", 45.0),
    exercise("Pec Deck (Fly)", 3, "8-10", 120.0),
    exercise("Machine Shoulder Press", 3, "10-12", 40.0),
    exercise("Cable Tricep Pushdowns", 4, "12-15", 50.0),
    exercise("Machine Incline Press", 3, "10", 45.0),
    exercise("Machine Lateral Raise", 4, "15", 15.0),
];

static PULL: [ExerciseSpec; 6] = [
    exercise("Lat Pulldown (Wide)", 3, "10-12", 70.0),
    exercise("Seated Cable Row", 3, "10-12", 70.0),
    exercise("Face Pulls", 4, "15", 30.0),
    exercise("Machine Bicep Curl", 3, "10-12", 30.0),
    exercise("Cable Hammer Curls", 4, "12", 30.0),
    exercise("Tricep Overhead Ext", 3, "12", 30.0),
];

static LEGS: [ExerciseSpec; 5] = [
    exercise("Leg Press", 3, "10-12", 180.0),
    exercise("Seated Leg Curl", 3, "12-15", 90.0),
    exercise("Calf Raise Machine", 4, "15", 90.0),
    exercise("Leg Extensions", 3, "8", 90.0),
    exercise("Bulgarian Split Squats", 3, "10", 0.0),
];

static CARDIO: [ExerciseSpec; 1] = [exercise("Incline Walk", 1, "40 mins", 0.0)];

/// A training day in the split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum RoutineDay {
    /// Chest, shoulders and triceps.
    #[default]
    Push,
    /// Back and biceps.
    Pull,
    /// Lower body.
    Legs,
    /// Steady-state conditioning.
    Cardio,
}

/// Raised when a day name is not one of [`RoutineDay::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown routine day '{0}'")]
pub struct UnknownRoutineDay(pub String);

impl RoutineDay {
    /// Every day, in the order offered by the day selector.
    pub const ALL: [Self; 4] = [Self::Push, Self::Pull, Self::Legs, Self::Cardio];

    /// Display name, also accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Push => "Push",
            Self::Pull => "Pull",
            Self::Legs => "Legs",
            Self::Cardio => "Cardio",
        }
    }

    /// Exercises for the day in planned order.
    #[must_use]
    pub fn exercises(self) -> &'static [ExerciseSpec] {
        match self {
            Self::Push => &PUSH,
            Self::Pull => &PULL,
            Self::Legs => &LEGS,
            Self::Cardio => &CARDIO,
        }
    }
}

impl fmt::Display for RoutineDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoutineDay {
    type Err = UnknownRoutineDay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.name() == s)
            .ok_or_else(|| UnknownRoutineDay(s.to_owned()))
    }
}

/// Find an exercise by exact name across every day, in table order.
///
/// # Examples
/// ```
/// use gym_tracker::domain::find_exercise;
///
/// let spec = find_exercise("Leg Press").expect("routine exercise");
/// assert_eq!(spec.target_sets, 3);
/// assert!(find_exercise("leg press").is_none());
/// ```
#[must_use]
pub fn find_exercise(name: &str) -> Option<&'static ExerciseSpec> {
    RoutineDay::ALL
        .into_iter()
        .flat_map(RoutineDay::exercises)
        .find(|spec| spec.name == name)
}

/// Routine starting weight for an exercise, or [`Weight::ZERO`] when unknown.
#[must_use]
pub fn default_weight_for(name: &str) -> Weight {
    find_exercise(name).map_or(Weight::ZERO, |spec| spec.default_weight)
}
