//! Driving port for logging a completed set-group.

use async_trait::async_trait;
use chrono::Local;
use serde::Serialize;

use crate::domain::{Advice, Difficulty, DomainError, Weight, WorkoutLogRow, find_exercise};

/// Request to log one exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct LogWorkoutRequest {
    /// Routine exercise name.
    pub exercise_name: String,
    /// Weight actually lifted.
    pub weight_used: Weight,
    /// Perceived difficulty.
    pub difficulty: Difficulty,
}

/// Result of a successful log: the appended row and the advice behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedWorkout {
    /// Row appended to the log.
    pub row: WorkoutLogRow,
    /// Advisor output used for the row.
    pub advice: Advice,
}

/// Port for the submit action.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkoutLogCommand: Send + Sync {
    /// Ask the advisor, then append exactly one row. Not idempotent.
    async fn log_workout(&self, request: LogWorkoutRequest) -> Result<LoggedWorkout, DomainError>;
}

/// Fixture implementation that keeps the weight and persists nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureWorkoutLogCommand;

#[async_trait]
impl WorkoutLogCommand for FixtureWorkoutLogCommand {
    async fn log_workout(&self, request: LogWorkoutRequest) -> Result<LoggedWorkout, DomainError> {
        let spec = find_exercise(&request.exercise_name).ok_or_else(|| {
            DomainError::invalid_request(format!("unknown exercise: {}", request.exercise_name))
        })?;
        let advice = Advice::keep(request.weight_used);
        Ok(LoggedWorkout {
            row: WorkoutLogRow {
                date: Local::now().date_naive(),
                exercise_name: spec.name.to_owned(),
                weight_used: request.weight_used,
                sets: spec.target_sets,
                reps: spec.target_reps.to_owned(),
                difficulty: request.difficulty,
                next_weight: advice.new_weight,
                message: advice.message.clone(),
            },
            advice,
        })
    }
}
