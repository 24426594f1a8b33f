//! HTML form handlers.
//!
//! ```text
//! GET  /?day=Push
//! POST /log
//! ```
//!
//! Every render recomputes the plan from the log, so a successful submit
//! shows the new suggestion straight away.

use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::ports::LogWorkoutRequest;
use crate::domain::{DomainError, RoutineDay};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{ApiError, status_for};
use crate::inbound::http::render::{self, Notice};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_day, parse_difficulty, parse_required_text, parse_weight_text,
};

const DAY: FieldName = FieldName::new("day");

/// Query string of the form page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Selected routine day; the first day when absent.
    pub day: Option<String>,
}

/// Fields posted by an exercise panel.
///
/// Every field defaults so missing input reaches validation instead of the
/// extractor.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LogWorkoutForm {
    /// Day the panel belongs to.
    pub day: Option<String>,
    /// Routine exercise name.
    pub exercise: String,
    /// Weight typed by the user.
    pub weight: String,
    /// Difficulty label.
    pub difficulty: String,
}

fn parse_log_form(form: &LogWorkoutForm) -> Result<LogWorkoutRequest, DomainError> {
    Ok(LogWorkoutRequest {
        exercise_name: parse_required_text(FieldName::new("exercise"), &form.exercise)?,
        weight_used: parse_weight_text(FieldName::new("weight"), &form.weight)?,
        difficulty: parse_difficulty(FieldName::new("difficulty"), &form.difficulty)?,
    })
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(body)
}

async fn render_day(
    state: &HttpState,
    day: RoutineDay,
    status: StatusCode,
    notice: Option<&Notice>,
) -> HttpResponse {
    let plan = state.plans.plan_for_day(day).await;
    html(status, render::page(&plan, notice))
}

/// Render the plan for the selected day.
#[get("/")]
pub async fn show_day(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let day = parse_day(DAY, query.day.as_deref())?;
    Ok(render_day(&state, day, StatusCode::OK, None).await)
}

/// Log one exercise and re-render its day with the coach's feedback.
///
/// Validation and logging failures stay on the page as an error notice; the
/// response status still reflects the failure.
#[post("/log")]
pub async fn submit_log(
    state: web::Data<HttpState>,
    form: web::Form<LogWorkoutForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let day = parse_day(DAY, form.day.as_deref())?;

    let outcome = match parse_log_form(&form) {
        Ok(request) => state.workouts.log_workout(request).await,
        Err(error) => Err(error),
    };

    let (status, notice) = match outcome {
        Ok(logged) => (
            StatusCode::OK,
            Notice::Saved {
                exercise_name: logged.row.exercise_name,
                advice: logged.advice,
            },
        ),
        Err(error) => {
            let error = ApiError::from(error).redacted();
            let exercise = form.exercise.trim();
            (
                status_for(error.code()),
                Notice::Failed {
                    exercise_name: (!exercise.is_empty()).then(|| exercise.to_owned()),
                    message: error.message().to_owned(),
                },
            )
        }
    };

    Ok(render_day(&state, day, status, Some(&notice)).await)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test as actix_test};
    use chrono::NaiveDate;
    use mockall::predicate::eq;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{
        DayPlan, FixtureWorkoutPlanQuery, LoggedWorkout, MockWorkoutLogCommand,
        MockWorkoutPlanQuery,
    };
    use crate::domain::{Advice, Difficulty, Weight, WorkoutLogRow};

    fn pounds(value: f64) -> Weight {
        Weight::new(value).expect("valid weight")
    }

    fn logged(request: &LogWorkoutRequest, next: f64, message: &str) -> LoggedWorkout {
        let advice = Advice {
            new_weight: pounds(next),
            message: message.to_owned(),
        };
        LoggedWorkout {
            row: WorkoutLogRow {
                date: NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date"),
                exercise_name: request.exercise_name.clone(),
                weight_used: request.weight_used,
                sets: 3,
                reps: "8-10".to_owned(),
                difficulty: request.difficulty,
                next_weight: advice.new_weight,
                message: advice.message.clone(),
            },
            advice,
        }
    }

    async fn call(state: HttpState, request: actix_test::TestRequest) -> (StatusCode, String) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(show_day)
                .service(submit_log),
        )
        .await;
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[rstest]
    #[case::default_day("/", "Machine Chest Press")]
    #[case::legs("/?day=Legs", "Bulgarian Split Squats")]
    #[case::cardio("/?day=Cardio", "Incline Walk")]
    #[actix_web::test]
    async fn renders_selected_day(#[case] uri: &str, #[case] expected: &str) {
        let (status, body) = call(
            HttpState::default(),
            actix_test::TestRequest::get().uri(uri),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(expected));
    }

    #[actix_web::test]
    async fn unknown_day_is_rejected() {
        let (status, body) = call(
            HttpState::default(),
            actix_test::TestRequest::get().uri("/?day=Arms"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("unknown_day"));
    }

    #[actix_web::test]
    async fn page_shows_suggested_weights() {
        let mut plans = MockWorkoutPlanQuery::new();
        plans
            .expect_plan_for_day()
            .with(eq(RoutineDay::Push))
            .returning(|day| {
                let mut plan = DayPlan::with_defaults(day);
                if let Some(first) = plan.exercises.first_mut() {
                    first.suggested_weight = pounds(55.0);
                }
                plan
            });
        let state = HttpState::new(Arc::new(plans), Arc::new(MockWorkoutLogCommand::new()));

        let (_, body) = call(state, actix_test::TestRequest::get().uri("/?day=Push")).await;
        assert!(body.contains("Machine Chest Press (Target: 55 lbs)"));
    }

    #[actix_web::test]
    async fn submit_shows_coach_feedback() {
        let mut workouts = MockWorkoutLogCommand::new();
        workouts
            .expect_log_workout()
            .withf(|request| {
                request.exercise_name == "Machine Chest Press"
                    && request.weight_used.as_pounds() == 50.0
                    && request.difficulty == Difficulty::TooEasy
            })
            .times(1)
            .returning(|request| Ok(logged(&request, 55.0, "Add 5 lbs")));
        let state = HttpState::new(Arc::new(FixtureWorkoutPlanQuery), Arc::new(workouts));

        let (status, body) = call(
            state,
            actix_test::TestRequest::post().uri("/log").set_form([
                ("day", "Push"),
                ("exercise", "Machine Chest Press"),
                ("weight", "50"),
                ("difficulty", "Too Easy"),
            ]),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Saved! Coach says: Add 5 lbs"));
        assert!(body.contains("Next time: 55 lbs"));
    }

    #[actix_web::test]
    async fn invalid_weight_never_reaches_the_log() {
        let mut workouts = MockWorkoutLogCommand::new();
        workouts.expect_log_workout().never();
        let state = HttpState::new(Arc::new(FixtureWorkoutPlanQuery), Arc::new(workouts));

        let (status, body) = call(
            state,
            actix_test::TestRequest::post().uri("/log").set_form([
                ("day", "Push"),
                ("exercise", "Machine Chest Press"),
                ("weight", "-5"),
                ("difficulty", "Perfect"),
            ]),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Could not save workout"));
        assert!(body.contains("<details open>"));
    }

    #[actix_web::test]
    async fn internal_failures_are_redacted_on_the_page() {
        let mut workouts = MockWorkoutLogCommand::new();
        workouts
            .expect_log_workout()
            .returning(|_| Err(DomainError::internal("sheet credentials rejected")));
        let state = HttpState::new(Arc::new(FixtureWorkoutPlanQuery), Arc::new(workouts));

        let (status, body) = call(
            state,
            actix_test::TestRequest::post().uri("/log").set_form([
                ("day", "Pull"),
                ("exercise", "Face Pulls"),
                ("weight", "30"),
                ("difficulty", "Perfect"),
            ]),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("Could not save workout: Internal server error"));
        assert!(!body.contains("credentials"));
    }

    #[actix_web::test]
    async fn missing_fields_render_a_validation_notice() {
        let (status, body) = call(
            HttpState::default(),
            actix_test::TestRequest::post()
                .uri("/log")
                .set_form([("day", "Legs")]),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("exercise must not be empty"));
    }
}
