//! In-memory doubles for the workout log, the coach and the clock.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, Utc};
use mockable::Clock;

use crate::domain::ports::{
    TextGenerator, TextGeneratorError, WorkoutLogRepository, WorkoutLogRepositoryError,
};
use crate::domain::{WorkoutHistoryEntry, WorkoutLogRow};

fn lock<'a, T>(mutex: &'a Mutex<T>, name: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(_) => panic!("{name} mutex"),
    }
}

/// Workout log kept in memory, in append order.
#[derive(Default)]
pub struct InMemoryWorkoutLog {
    rows: Mutex<Vec<WorkoutLogRow>>,
    read_failure: Mutex<Option<WorkoutLogRepositoryError>>,
    append_failure: Mutex<Option<WorkoutLogRepositoryError>>,
}

impl InMemoryWorkoutLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Log pre-populated with `rows`.
    pub fn with_rows(rows: Vec<WorkoutLogRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    /// Snapshot of every appended row.
    pub fn rows(&self) -> Vec<WorkoutLogRow> {
        lock(&self.rows, "rows").clone()
    }

    /// Make every subsequent read fail with `error`.
    pub fn fail_reads(&self, error: WorkoutLogRepositoryError) {
        *lock(&self.read_failure, "read failure") = Some(error);
    }

    /// Make every subsequent append fail with `error`.
    pub fn fail_appends(&self, error: WorkoutLogRepositoryError) {
        *lock(&self.append_failure, "append failure") = Some(error);
    }
}

#[async_trait]
impl WorkoutLogRepository for InMemoryWorkoutLog {
    async fn fetch_history(&self) -> Result<Vec<WorkoutHistoryEntry>, WorkoutLogRepositoryError> {
        if let Some(error) = lock(&self.read_failure, "read failure").clone() {
            return Err(error);
        }
        Ok(lock(&self.rows, "rows")
            .iter()
            .map(WorkoutHistoryEntry::from)
            .collect())
    }

    async fn append(&self, row: &WorkoutLogRow) -> Result<(), WorkoutLogRepositoryError> {
        if let Some(error) = lock(&self.append_failure, "append failure").clone() {
            return Err(error);
        }
        lock(&self.rows, "rows").push(row.clone());
        Ok(())
    }
}

/// Text generator replying from a queue and recording every prompt.
///
/// An empty queue yields a transport error, which the coach treats like an
/// outage.
#[derive(Default)]
pub struct ScriptedTextGenerator {
    replies: Mutex<VecDeque<Result<String, TextGeneratorError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedTextGenerator {
    /// Generator with no queued replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn push_reply(&self, reply: impl Into<String>) {
        lock(&self.replies, "replies").push_back(Ok(reply.into()));
    }

    /// Queue a failure.
    pub fn push_error(&self, error: TextGeneratorError) {
        lock(&self.replies, "replies").push_back(Err(error));
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts, "prompts").clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, TextGeneratorError> {
        lock(&self.prompts, "prompts").push(prompt.to_owned());
        lock(&self.replies, "replies")
            .pop_front()
            .unwrap_or_else(|| Err(TextGeneratorError::transport("no scripted reply")))
    }
}

/// Clock pinned to noon UTC on one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Clock reporting `date` at 12:00 UTC.
    pub fn on(date: NaiveDate) -> Self {
        Self(date.and_hms_opt(12, 0, 0).unwrap_or_default().and_utc())
    }

    /// Local calendar date reported to the log.
    pub fn local_date(&self) -> NaiveDate {
        self.local().date_naive()
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
