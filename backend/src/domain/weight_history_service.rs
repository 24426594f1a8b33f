//! Starting-weight lookup over the workout log.
//!
//! The log is the source of truth once an exercise has history: the most
//! recently appended matching row wins. Anything else, including every read
//! failure, degrades to the routine default so the form always renders.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::WorkoutLogRepository;
use crate::domain::{Weight, WorkoutHistoryEntry, default_weight_for};

/// Resolves the weight a user should start from for an exercise.
#[derive(Clone)]
pub struct WeightHistoryService<R> {
    repository: Arc<R>,
}

impl<R> WeightHistoryService<R> {
    /// Create a lookup over the given log repository.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use gym_tracker::domain::ports::FixtureWorkoutLogRepository;
    /// # use gym_tracker::domain::WeightHistoryService;
    /// # async fn example() {
    /// let service = WeightHistoryService::new(Arc::new(FixtureWorkoutLogRepository));
    /// let weight = service.suggested_weight("Leg Press").await;
    /// assert_eq!(weight.as_pounds(), 180.0);
    /// # }
    /// ```
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> WeightHistoryService<R>
where
    R: WorkoutLogRepository,
{
    /// Suggested starting weight for one exercise. Never fails.
    pub async fn suggested_weight(&self, exercise_name: &str) -> Weight {
        let history = self.load_history().await;
        resolve(history.as_deref(), exercise_name)
    }

    /// Suggested weights for several exercises from a single log read.
    ///
    /// The result is aligned with `exercise_names`.
    pub async fn suggested_weights(&self, exercise_names: &[&str]) -> Vec<Weight> {
        let history = self.load_history().await;
        exercise_names
            .iter()
            .map(|name| resolve(history.as_deref(), name))
            .collect()
    }

    async fn load_history(&self) -> Option<Vec<WorkoutHistoryEntry>> {
        match self.repository.fetch_history().await {
            Ok(entries) => {
                debug!(rows = entries.len(), "workout history loaded");
                Some(entries)
            }
            Err(error) => {
                warn!(%error, "workout history unavailable; using routine defaults");
                None
            }
        }
    }
}

fn resolve(history: Option<&[WorkoutHistoryEntry]>, exercise_name: &str) -> Weight {
    history
        .and_then(|entries| {
            entries
                .iter()
                .rev()
                .find(|entry| entry.exercise_name == exercise_name)
        })
        .and_then(|entry| {
            if entry.next_weight.is_none() {
                warn!(
                    exercise = exercise_name,
                    "latest logged next weight unreadable; using routine default"
                );
            }
            entry.next_weight
        })
        .unwrap_or_else(|| default_weight_for(exercise_name))
}
