//! Workout logging: ask the coach, then append one row.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{
    LogWorkoutRequest, LoggedWorkout, TextGenerator, WorkoutLogCommand, WorkoutLogRepository,
    WorkoutLogRepositoryError,
};
use crate::domain::{DomainError, ProgressionAdvisor, WorkoutLogRow, find_exercise};

/// Service implementing [`WorkoutLogCommand`].
#[derive(Clone)]
pub struct WorkoutLogService<R, G> {
    repository: Arc<R>,
    advisor: ProgressionAdvisor<G>,
    clock: Arc<dyn Clock>,
}

impl<R, G> WorkoutLogService<R, G> {
    /// Create a logging service.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use gym_tracker::domain::ports::{
    /// #     FixtureTextGenerator, FixtureWorkoutLogRepository, LogWorkoutRequest, WorkoutLogCommand,
    /// # };
    /// # use gym_tracker::domain::{
    /// #     AthleteProfile, Difficulty, ProgressionAdvisor, Weight, WorkoutLogService,
    /// # };
    /// # use mockable::DefaultClock;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let service = WorkoutLogService::new(
    ///     Arc::new(FixtureWorkoutLogRepository),
    ///     ProgressionAdvisor::new(Arc::new(FixtureTextGenerator), AthleteProfile::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let logged = service
    ///     .log_workout(LogWorkoutRequest {
    ///         exercise_name: "Leg Press".to_owned(),
    ///         weight_used: Weight::new(180.0)?,
    ///         difficulty: Difficulty::Perfect,
    ///     })
    ///     .await?;
    /// assert_eq!(logged.row.next_weight, logged.row.weight_used);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(repository: Arc<R>, advisor: ProgressionAdvisor<G>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            advisor,
            clock,
        }
    }
}

impl<R, G> WorkoutLogService<R, G>
where
    R: WorkoutLogRepository,
    G: TextGenerator,
{
    fn map_append_error(error: WorkoutLogRepositoryError) -> DomainError {
        if error.is_unavailable() {
            return DomainError::service_unavailable(format!("workout log unavailable: {error}"));
        }
        DomainError::internal(format!("workout log append failed: {error}"))
    }
}

#[async_trait]
impl<R, G> WorkoutLogCommand for WorkoutLogService<R, G>
where
    R: WorkoutLogRepository,
    G: TextGenerator,
{
    async fn log_workout(&self, request: LogWorkoutRequest) -> Result<LoggedWorkout, DomainError> {
        let spec = find_exercise(&request.exercise_name).ok_or_else(|| {
            DomainError::invalid_request(format!("unknown exercise: {}", request.exercise_name))
        })?;

        let advice = self
            .advisor
            .advise(spec.name, request.weight_used, request.difficulty)
            .await;

        let row = WorkoutLogRow {
            date: self.clock.local().date_naive(),
            exercise_name: spec.name.to_owned(),
            weight_used: request.weight_used,
            sets: spec.target_sets,
            reps: spec.target_reps.to_owned(),
            difficulty: request.difficulty,
            next_weight: advice.new_weight,
            message: advice.message.clone(),
        };

        if let Err(failure) = self.repository.append(&row).await {
            error!(error = %failure, exercise = spec.name, "workout log append failed");
            return Err(Self::map_append_error(failure));
        }

        info!(
            exercise = spec.name,
            weight = %row.weight_used,
            next_weight = %row.next_weight,
            difficulty = %row.difficulty,
            "workout logged"
        );
        Ok(LoggedWorkout { row, advice })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockTextGenerator, MockWorkoutLogRepository, TextGeneratorError};
    use crate::domain::{
        ADVISOR_FALLBACK_MESSAGE, Advice, AthleteProfile, Difficulty, ErrorCode, Weight,
    };
    use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
    use rstest::rstest;

    struct FixtureClock {
        utc_now: DateTime<Utc>,
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }

    fn fixture_clock() -> Arc<dyn Clock> {
        let utc_now = Utc
            .with_ymd_and_hms(2026, 3, 14, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp");
        Arc::new(FixtureClock { utc_now })
    }

    fn fixture_date() -> NaiveDate {
        fixture_clock().local().date_naive()
    }

    fn pounds(value: f64) -> Weight {
        Weight::new(value).expect("valid weight")
    }

    fn generator_replying(reply: &'static str) -> MockTextGenerator {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(move |_| Ok(reply.to_owned()));
        generator
    }

    fn service(
        repo: MockWorkoutLogRepository,
        generator: MockTextGenerator,
    ) -> WorkoutLogService<MockWorkoutLogRepository, MockTextGenerator> {
        let advisor = ProgressionAdvisor::new(Arc::new(generator), AthleteProfile::default());
        WorkoutLogService::new(Arc::new(repo), advisor, fixture_clock())
    }

    fn request(name: &str, weight: f64, difficulty: Difficulty) -> LogWorkoutRequest {
        LogWorkoutRequest {
            exercise_name: name.to_owned(),
            weight_used: pounds(weight),
            difficulty,
        }
    }

    #[tokio::test]
    async fn appends_row_with_advice_and_routine_targets() {
        let expected = WorkoutLogRow {
            date: fixture_date(),
            exercise_name: "Machine Chest Press".to_owned(),
            weight_used: pounds(50.0),
            sets: 3,
            reps: "8-10".to_owned(),
            difficulty: Difficulty::TooEasy,
            next_weight: pounds(55.0),
            message: "Add 5.".to_owned(),
        };
        let mut repo = MockWorkoutLogRepository::new();
        let appended = expected.clone();
        repo.expect_append()
            .withf(move |row| *row == appended)
            .times(1)
            .returning(|_| Ok(()));
        let generator = generator_replying("```json\n{\"new_weight\": 55, \"message\": \"Add 5.\"}\n```");

        let logged = service(repo, generator)
            .log_workout(request("Machine Chest Press", 50.0, Difficulty::TooEasy))
            .await
            .expect("log succeeds");

        assert_eq!(logged.row, expected);
        assert_eq!(
            logged.advice,
            Advice {
                new_weight: pounds(55.0),
                message: "Add 5.".to_owned(),
            }
        );
    }

    #[tokio::test]
    async fn advisor_outage_still_appends_fallback_row() {
        let mut repo = MockWorkoutLogRepository::new();
        repo.expect_append()
            .withf(|row| {
                row.next_weight.as_pounds() == 90.0 && row.message == ADVISOR_FALLBACK_MESSAGE
            })
            .times(1)
            .returning(|_| Ok(()));
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_| Err(TextGeneratorError::timeout("30s")));

        let logged = service(repo, generator)
            .log_workout(request("Leg Extensions", 90.0, Difficulty::TooHardOrFail))
            .await
            .expect("log succeeds");

        assert_eq!(logged.advice, Advice::keep(pounds(90.0)));
    }

    #[tokio::test]
    async fn repeated_submissions_append_repeated_rows() {
        let mut repo = MockWorkoutLogRepository::new();
        repo.expect_append().times(2).returning(|_| Ok(()));
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .times(2)
            .returning(|_| Ok("{\"new_weight\": 30, \"message\": \"Hold.\"}".to_owned()));
        let service = service(repo, generator);

        let first = service
            .log_workout(request("Face Pulls", 30.0, Difficulty::Perfect))
            .await
            .expect("first log succeeds");
        let second = service
            .log_workout(request("Face Pulls", 30.0, Difficulty::Perfect))
            .await
            .expect("second log succeeds");

        assert_eq!(first.row, second.row);
    }

    #[tokio::test]
    async fn unknown_exercise_is_rejected_before_any_call() {
        let repo = MockWorkoutLogRepository::new();
        let generator = MockTextGenerator::new();

        let error = service(repo, generator)
            .log_workout(request("Deadlift", 315.0, Difficulty::Perfect))
            .await
            .expect_err("unknown exercise rejected");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[case::transport(WorkoutLogRepositoryError::transport("reset"), ErrorCode::ServiceUnavailable)]
    #[case::timeout(WorkoutLogRepositoryError::timeout("30s"), ErrorCode::ServiceUnavailable)]
    #[case::rate_limited(WorkoutLogRepositoryError::rate_limited("429"), ErrorCode::ServiceUnavailable)]
    #[case::unauthorized(WorkoutLogRepositoryError::unauthorized("403"), ErrorCode::InternalError)]
    #[case::decode(WorkoutLogRepositoryError::decode("bad json"), ErrorCode::InternalError)]
    #[case::invalid(WorkoutLogRepositoryError::invalid_request("400"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn append_failures_surface_as_errors(
        #[case] failure: WorkoutLogRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockWorkoutLogRepository::new();
        repo.expect_append()
            .times(1)
            .return_once(move |_| Err(failure));
        let generator = generator_replying("{\"new_weight\": 75, \"message\": \"Up.\"}");

        let error = service(repo, generator)
            .log_workout(request("Seated Cable Row", 70.0, Difficulty::TooEasy))
            .await
            .expect_err("append failure surfaces");

        assert_eq!(error.code(), expected);
    }
}
