//! Day plan assembly for the workout form.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{DayPlan, PlannedExercise, WorkoutLogRepository, WorkoutPlanQuery};
use crate::domain::{RoutineDay, WeightHistoryService};

/// Builds [`DayPlan`]s from the static routine and the workout log.
#[derive(Clone)]
pub struct WorkoutPlanService<R> {
    history: WeightHistoryService<R>,
}

impl<R> WorkoutPlanService<R> {
    /// Create a plan service reading history from `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            history: WeightHistoryService::new(repository),
        }
    }
}

#[async_trait]
impl<R> WorkoutPlanQuery for WorkoutPlanService<R>
where
    R: WorkoutLogRepository,
{
    async fn plan_for_day(&self, day: RoutineDay) -> DayPlan {
        let specs = day.exercises();
        let names: Vec<&str> = specs.iter().map(|spec| spec.name).collect();
        let weights = self.history.suggested_weights(&names).await;

        DayPlan {
            day,
            exercises: specs
                .iter()
                .zip(weights)
                .map(|(spec, suggested_weight)| PlannedExercise {
                    spec,
                    suggested_weight,
                })
                .collect(),
        }
    }
}
