//! Driven port for the remote, append-only workout log.
//!
//! The log is a single table. Reads return every row in append order; writes
//! append exactly one row and never touch existing ones.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{WorkoutHistoryEntry, WorkoutLogRow};

define_port_error! {
    /// Errors surfaced while reading or appending the workout log.
    pub enum WorkoutLogRepositoryError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "workout log transport failed: {message}",
        /// The request exceeded its timeout.
        Timeout { message: String } =>
            "workout log request timed out: {message}",
        /// The log service throttled the request.
        RateLimited { message: String } =>
            "workout log rate limited request: {message}",
        /// Credentials were missing, invalid or lacked access.
        Unauthorized { message: String } =>
            "workout log credentials rejected: {message}",
        /// The response could not be decoded into log rows.
        Decode { message: String } =>
            "workout log response decode failed: {message}",
        /// The adapter or the service rejected the request shape.
        InvalidRequest { message: String } =>
            "workout log request invalid: {message}",
    }
}

impl WorkoutLogRepositoryError {
    /// Whether the failure is an availability problem rather than a defect.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

/// Port for the workout log table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkoutLogRepository: Send + Sync {
    /// Read every logged row in append order.
    async fn fetch_history(&self) -> Result<Vec<WorkoutHistoryEntry>, WorkoutLogRepositoryError>;

    /// Append one row. Identical rows are appended again, not merged.
    async fn append(&self, row: &WorkoutLogRow) -> Result<(), WorkoutLogRepositoryError>;
}

/// Fixture implementation with no history that discards appends.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureWorkoutLogRepository;

#[async_trait]
impl WorkoutLogRepository for FixtureWorkoutLogRepository {
    async fn fetch_history(&self) -> Result<Vec<WorkoutHistoryEntry>, WorkoutLogRepositoryError> {
        Ok(Vec::new())
    }

    async fn append(&self, _row: &WorkoutLogRow) -> Result<(), WorkoutLogRepositoryError> {
        Ok(())
    }
}
