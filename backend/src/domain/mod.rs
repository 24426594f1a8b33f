//! Domain primitives, services and ports.
//!
//! Purpose: hold the training routine, the workout log model and the
//! progression rules independent of HTTP, Google Sheets or Gemini. Adapters
//! live under `inbound` and `outbound` and talk to this module only through
//! the traits in [`ports`].
//!
//! Public surface:
//! - DomainError / ErrorCode: transport-agnostic failures and stable codes.
//! - Weight, Difficulty, RoutineDay, ExerciseSpec: value types.
//! - WorkoutLogRow / WorkoutHistoryEntry: log rows written and read.
//! - WeightHistoryService, ProgressionAdvisor, WorkoutPlanService,
//!   WorkoutLogService: the operations behind the form.

pub mod athlete_profile;
pub mod difficulty;
pub mod error;
pub mod ports;
pub mod progression_advisor;
pub mod routine;
pub mod trace_id;
pub mod weight;
pub mod weight_history_service;
pub mod workout_log;
pub mod workout_log_service;
pub mod workout_plan_service;

pub use self::athlete_profile::AthleteProfile;
pub use self::difficulty::{Difficulty, UnknownDifficulty};
pub use self::error::{DomainError, ErrorCode};
pub use self::progression_advisor::{ADVISOR_FALLBACK_MESSAGE, Advice, ProgressionAdvisor};
pub use self::routine::{
    ExerciseSpec, RoutineDay, UnknownRoutineDay, default_weight_for, find_exercise,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::weight::{Weight, WeightValidationError};
pub use self::weight_history_service::WeightHistoryService;
pub use self::workout_log::{
    EXERCISE_COLUMN, NEXT_WEIGHT_COLUMN, WORKOUT_LOG_COLUMNS, WorkoutHistoryEntry, WorkoutLogRow,
};
pub use self::workout_log_service::WorkoutLogService;
pub use self::workout_plan_service::WorkoutPlanService;
