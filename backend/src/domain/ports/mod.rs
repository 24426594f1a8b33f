//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`WorkoutLogRepository`], [`TextGenerator`]) describe what the
//! domain needs from external services; adapters map their failures into the
//! typed port errors. Driving ports ([`WorkoutPlanQuery`],
//! [`WorkoutLogCommand`]) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod text_generator;
mod workout_log_command;
mod workout_log_repository;
mod workout_plan_query;

#[cfg(test)]
pub use text_generator::MockTextGenerator;
pub use text_generator::{FixtureTextGenerator, TextGenerator, TextGeneratorError};
#[cfg(test)]
pub use workout_log_command::MockWorkoutLogCommand;
pub use workout_log_command::{
    FixtureWorkoutLogCommand, LogWorkoutRequest, LoggedWorkout, WorkoutLogCommand,
};
#[cfg(test)]
pub use workout_log_repository::MockWorkoutLogRepository;
pub use workout_log_repository::{
    FixtureWorkoutLogRepository, WorkoutLogRepository, WorkoutLogRepositoryError,
};
#[cfg(test)]
pub use workout_plan_query::MockWorkoutPlanQuery;
pub use workout_plan_query::{DayPlan, FixtureWorkoutPlanQuery, PlannedExercise, WorkoutPlanQuery};
