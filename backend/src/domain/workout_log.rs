//! Rows of the append-only workout log.

use chrono::NaiveDate;
use serde::Serialize;

use super::{Difficulty, Weight};

/// Header of the exercise name column; history rows are matched on it.
pub const EXERCISE_COLUMN: &str = "Exercise";

/// Header of the column holding the recommended next weight.
pub const NEXT_WEIGHT_COLUMN: &str = "Next_Weight";

/// Column headers of the remote log, in positional order.
///
/// A blank log is seeded with this row before its first append.
pub const WORKOUT_LOG_COLUMNS: [&str; 8] = [
    "Date",
    EXERCISE_COLUMN,
    "Weight",
    "Sets",
    "Reps",
    "Difficulty",
    NEXT_WEIGHT_COLUMN,
    "Message",
];

/// One logged set-group, as appended to the remote log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLogRow {
    /// Local calendar date of the session.
    pub date: NaiveDate,
    /// Exercise name, matching the routine table.
    pub exercise_name: String,
    /// Weight actually lifted.
    pub weight_used: Weight,
    /// Planned sets copied from the routine.
    pub sets: u32,
    /// Planned reps copied from the routine.
    pub reps: String,
    /// Perceived difficulty.
    pub difficulty: Difficulty,
    /// Weight recommended for the next session.
    pub next_weight: Weight,
    /// Advisor rationale.
    pub message: String,
}

/// The part of a historical row needed to resume progression.
///
/// `next_weight` is `None` when the stored cell is blank or not a usable
/// weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutHistoryEntry {
    /// Exercise name exactly as logged.
    pub exercise_name: String,
    /// Recommended next weight, if readable.
    pub next_weight: Option<Weight>,
}

impl From<&WorkoutLogRow> for WorkoutHistoryEntry {
    fn from(row: &WorkoutLogRow) -> Self {
        Self {
            exercise_name: row.exercise_name.clone(),
            next_weight: Some(row.next_weight),
        }
    }
}
