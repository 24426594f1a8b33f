//! Builders wiring outbound adapters into the domain services behind
//! [`HttpState`].

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use mockable::{Clock, DefaultClock};
use reqwest::Client;
use tracing::info;
use url::Url;

use gym_tracker::domain::{ProgressionAdvisor, WorkoutLogService, WorkoutPlanService};
use gym_tracker::inbound::http::state::HttpState;
use gym_tracker::outbound::gemini::{GEMINI_API_BASE, GeminiTextGenerator};
use gym_tracker::outbound::google_auth::{SPREADSHEETS_SCOPE, ServiceAccountTokenSource};
use gym_tracker::outbound::sheets::{SHEETS_API_BASE, SheetsWorkoutLogRepository};
use gym_tracker::settings::AppSettings;

/// Build the spreadsheet-backed log repository.
fn build_workout_log(settings: &AppSettings, clock: Arc<dyn Clock>) -> Result<SheetsWorkoutLogRepository> {
    let client = Client::builder()
        .timeout(settings.request_timeout())
        .build()
        .wrap_err("failed to build sheets HTTP client")?;
    let key = settings
        .service_account_key()
        .wrap_err("failed to load service account credential")?;
    let client_email = key.client_email().to_owned();
    let tokens = ServiceAccountTokenSource::new(client.clone(), key, SPREADSHEETS_SCOPE, clock)
        .wrap_err("service account private key is unusable")?;
    let location = settings.sheet_location().wrap_err("invalid sheet_url")?;
    let api_base = Url::parse(SHEETS_API_BASE).wrap_err("invalid sheets API base")?;
    info!(
        spreadsheet_id = location.spreadsheet_id(),
        worksheet = location.worksheet(),
        client_email = %client_email,
        "workout log configured"
    );
    Ok(SheetsWorkoutLogRepository::new(
        client,
        api_base,
        location,
        Arc::new(tokens),
    ))
}

/// Build the coach's text generator.
fn build_text_generator(settings: &AppSettings) -> Result<GeminiTextGenerator> {
    let api_key = settings.gemini_api_key().wrap_err("gemini API key required")?;
    let api_base = Url::parse(GEMINI_API_BASE).wrap_err("invalid Gemini API base")?;
    let generator = GeminiTextGenerator::new(
        &api_base,
        settings.gemini_model(),
        api_key,
        settings.request_timeout(),
    )
    .wrap_err("failed to build Gemini client")?;
    info!(model = settings.gemini_model(), "text generator configured");
    Ok(generator)
}

/// Build handler state from settings. Missing secrets are fatal.
pub fn build_http_state(settings: &AppSettings) -> Result<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let repository = Arc::new(build_workout_log(settings, Arc::clone(&clock))?);
    let generator = Arc::new(build_text_generator(settings)?);
    let profile = settings
        .athlete_profile()
        .wrap_err("invalid athlete profile")?;

    let plans = WorkoutPlanService::new(Arc::clone(&repository));
    let workouts = WorkoutLogService::new(
        repository,
        ProgressionAdvisor::new(generator, profile),
        clock,
    );
    Ok(HttpState::new(Arc::new(plans), Arc::new(workouts)))
}
