//! Driving port for rendering a day's plan with suggested weights.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{ExerciseSpec, RoutineDay, Weight};

/// One exercise of the day with the weight to start from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedExercise {
    /// Static routine entry.
    pub spec: &'static ExerciseSpec,
    /// Weight suggested by the log, or the routine default.
    pub suggested_weight: Weight,
}

/// The whole plan for a day, in routine order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    /// Selected day.
    pub day: RoutineDay,
    /// Exercises in planned order.
    pub exercises: Vec<PlannedExercise>,
}

impl DayPlan {
    /// Plan using routine defaults only.
    #[must_use]
    pub fn with_defaults(day: RoutineDay) -> Self {
        Self {
            day,
            exercises: day
                .exercises()
                .iter()
                .map(|spec| PlannedExercise {
                    spec,
                    suggested_weight: spec.default_weight,
                })
                .collect(),
        }
    }
}

/// Port for deriving the plan shown on every render.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkoutPlanQuery: Send + Sync {
    /// Build the plan for `day`. Never fails: lookups degrade to defaults.
    async fn plan_for_day(&self, day: RoutineDay) -> DayPlan;
}

/// Fixture implementation returning routine defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureWorkoutPlanQuery;

#[async_trait]
impl WorkoutPlanQuery for FixtureWorkoutPlanQuery {
    async fn plan_for_day(&self, day: RoutineDay) -> DayPlan {
        DayPlan::with_defaults(day)
    }
}
