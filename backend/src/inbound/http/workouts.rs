//! JSON API for day plans and workout logging.
//!
//! ```text
//! GET  /api/v1/routines/{day}
//! POST /api/v1/workouts
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{DayPlan, LogWorkoutRequest, LoggedWorkout, PlannedExercise};
use crate::domain::{Difficulty, DomainError, RoutineDay};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_day, parse_difficulty, parse_required_text, parse_weight_number,
};

/// One exercise of the requested day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedExerciseBody {
    /// Routine exercise name.
    pub name: String,
    /// Planned number of sets.
    pub target_sets: u32,
    /// Planned reps or duration, as shown to the athlete.
    pub target_reps: String,
    /// Starting weight from the routine table.
    pub default_weight: f64,
    /// Weight to use today, from the log when it has history.
    pub suggested_weight: f64,
}

/// Response payload for a day plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlanBody {
    /// Routine day name.
    pub day: String,
    /// Exercises in routine order.
    pub exercises: Vec<PlannedExerciseBody>,
}

impl From<&PlannedExercise> for PlannedExerciseBody {
    fn from(value: &PlannedExercise) -> Self {
        Self {
            name: value.spec.name.to_owned(),
            target_sets: value.spec.target_sets,
            target_reps: value.spec.target_reps.to_owned(),
            default_weight: value.spec.default_weight.as_pounds(),
            suggested_weight: value.suggested_weight.as_pounds(),
        }
    }
}

impl From<DayPlan> for DayPlanBody {
    fn from(value: DayPlan) -> Self {
        Self {
            day: value.day.name().to_owned(),
            exercises: value.exercises.iter().map(PlannedExerciseBody::from).collect(),
        }
    }
}

/// Request payload for logging one exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogWorkoutRequestBody {
    /// Routine exercise name.
    pub exercise_name: String,
    /// Weight lifted, in pounds.
    pub weight: f64,
    /// Difficulty label, for example `Too Easy`.
    pub difficulty: String,
}

/// Response payload for a logged exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedWorkoutBody {
    /// Local date of the session, `YYYY-MM-DD`.
    pub date: String,
    /// Routine exercise name.
    pub exercise_name: String,
    /// Weight lifted, in pounds.
    pub weight_used: f64,
    /// Sets copied from the routine.
    pub sets: u32,
    /// Reps copied from the routine.
    pub reps: String,
    /// Perceived difficulty.
    pub difficulty: Difficulty,
    /// Weight recommended for next time.
    pub next_weight: f64,
    /// Coach's note.
    pub message: String,
}

impl From<LoggedWorkout> for LoggedWorkoutBody {
    fn from(value: LoggedWorkout) -> Self {
        let row = value.row;
        Self {
            date: row.date.format("%Y-%m-%d").to_string(),
            exercise_name: row.exercise_name,
            weight_used: row.weight_used.as_pounds(),
            sets: row.sets,
            reps: row.reps,
            difficulty: row.difficulty,
            next_weight: row.next_weight.as_pounds(),
            message: row.message,
        }
    }
}

fn parse_log_body(payload: LogWorkoutRequestBody) -> Result<LogWorkoutRequest, DomainError> {
    Ok(LogWorkoutRequest {
        exercise_name: parse_required_text(FieldName::new("exerciseName"), &payload.exercise_name)?,
        weight_used: parse_weight_number(FieldName::new("weight"), payload.weight)?,
        difficulty: parse_difficulty(FieldName::new("difficulty"), &payload.difficulty)?,
    })
}

/// Plan for a day with weights suggested from the log.
#[get("/routines/{day}")]
pub async fn get_day_plan(
    state: web::Data<HttpState>,
    day: web::Path<String>,
) -> ApiResult<web::Json<DayPlanBody>> {
    let day: RoutineDay = parse_day(FieldName::new("day"), Some(day.as_str()))?;
    let plan = state.plans.plan_for_day(day).await;
    Ok(web::Json(DayPlanBody::from(plan)))
}

/// Ask the coach and append one row to the log.
#[post("/workouts")]
pub async fn log_workout(
    state: web::Data<HttpState>,
    payload: web::Json<LogWorkoutRequestBody>,
) -> ApiResult<web::Json<LoggedWorkoutBody>> {
    let request = parse_log_body(payload.into_inner())?;
    let logged = state.workouts.log_workout(request).await?;
    Ok(web::Json(LoggedWorkoutBody::from(logged)))
}
