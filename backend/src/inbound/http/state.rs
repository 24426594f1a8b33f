//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureWorkoutLogCommand, FixtureWorkoutPlanQuery, WorkoutLogCommand, WorkoutPlanQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Day plans with suggested weights.
    pub plans: Arc<dyn WorkoutPlanQuery>,
    /// Workout logging.
    pub workouts: Arc<dyn WorkoutLogCommand>,
}

impl HttpState {
    /// Bundle the driving ports used by handlers.
    pub fn new(plans: Arc<dyn WorkoutPlanQuery>, workouts: Arc<dyn WorkoutLogCommand>) -> Self {
        Self { plans, workouts }
    }
}

impl Default for HttpState {
    /// State backed by fixtures: routine defaults and a log that keeps weights.
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureWorkoutPlanQuery),
            Arc::new(FixtureWorkoutLogCommand),
        )
    }
}
