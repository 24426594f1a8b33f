//! Reqwest-backed workout log over the Sheets values API.
//!
//! This adapter owns transport details only: URL construction, bearer
//! authentication, HTTP error mapping and cell decoding. Reads map rows by
//! header name, so a blank tab gets its header row before the first append.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::SheetLocation;
use super::dto::{AppendRequestDto, ValueRangeDto};
use crate::domain::ports::{WorkoutLogRepository, WorkoutLogRepositoryError};
use crate::domain::{WorkoutHistoryEntry, WorkoutLogRow};
use crate::outbound::google_auth::{AccessTokenError, AccessTokenProvider};
use crate::outbound::http_body::status_message;

/// Production Sheets REST endpoint.
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Workout log stored in one worksheet of a Google spreadsheet.
pub struct SheetsWorkoutLogRepository {
    client: Client,
    api_base: Url,
    location: SheetLocation,
    tokens: Arc<dyn AccessTokenProvider>,
    header_checked: OnceCell<()>,
}

impl SheetsWorkoutLogRepository {
    /// Build a repository against an explicit API base URL.
    pub fn new(
        client: Client,
        api_base: Url,
        location: SheetLocation,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self {
            client,
            api_base,
            location,
            tokens,
            header_checked: OnceCell::new(),
        }
    }

    fn values_url(&self, range: &str) -> Result<Url, WorkoutLogRepositoryError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                WorkoutLogRepositoryError::invalid_request(format!(
                    "sheets API base cannot take path segments: {}",
                    self.api_base
                ))
            })?
            .pop_if_empty()
            .push(self.location.spreadsheet_id())
            .push("values")
            .push(range);
        Ok(url)
    }

    fn read_url(&self) -> Result<Url, WorkoutLogRepositoryError> {
        let mut url = self.values_url(&self.location.whole_sheet_range())?;
        url.query_pairs_mut()
            .append_pair("valueRenderOption", "UNFORMATTED_VALUE")
            .append_pair("dateTimeRenderOption", "FORMATTED_STRING");
        Ok(url)
    }

    fn header_url(&self) -> Result<Url, WorkoutLogRepositoryError> {
        self.values_url(&self.location.header_range())
    }

    fn append_url(&self) -> Result<Url, WorkoutLogRepositoryError> {
        let range = format!("{}:append", self.location.append_range());
        let mut url = self.values_url(&range)?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED")
            .append_pair("insertDataOption", "INSERT_ROWS");
        Ok(url)
    }

    async fn bearer(&self) -> Result<String, WorkoutLogRepositoryError> {
        let token = self
            .tokens
            .access_token()
            .await
            .map_err(map_token_error)?;
        Ok(format!("Bearer {}", token.as_str()))
    }

    async fn get_values(&self, url: Url) -> Result<Vec<u8>, WorkoutLogRepositoryError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, self.bearer().await?)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;
        read_success_body(response).await
    }

    async fn post_append(
        &self,
        payload: &AppendRequestDto,
    ) -> Result<(), WorkoutLogRepositoryError> {
        let url = self.append_url()?;
        let response = self
            .client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, self.bearer().await?)
            .json(payload)
            .send()
            .await
            .map_err(map_transport_error)?;
        read_success_body(response).await.map(drop)
    }

    /// Write the column headers when row 1 is blank. Runs once per process.
    async fn ensure_header(&self) -> Result<(), WorkoutLogRepositoryError> {
        self.header_checked
            .get_or_try_init(|| async {
                let body = self.get_values(self.header_url()?).await?;
                let first_row = decode_range(&body)?;
                if first_row.is_blank() {
                    self.post_append(&AppendRequestDto::header_row()).await?;
                    info!(
                        worksheet = self.location.worksheet(),
                        "seeded blank workout log with column headers"
                    );
                }
                Ok::<(), WorkoutLogRepositoryError>(())
            })
            .await
            .map(|_checked| ())
    }
}

#[async_trait]
impl WorkoutLogRepository for SheetsWorkoutLogRepository {
    async fn fetch_history(&self) -> Result<Vec<WorkoutHistoryEntry>, WorkoutLogRepositoryError> {
        let body = self.get_values(self.read_url()?).await?;
        let history = parse_history(&body)?;
        debug!(
            worksheet = self.location.worksheet(),
            rows = history.len(),
            "workout log read"
        );
        Ok(history)
    }

    async fn append(&self, row: &WorkoutLogRow) -> Result<(), WorkoutLogRepositoryError> {
        self.ensure_header().await?;
        self.post_append(&AppendRequestDto::single_row(row)).await?;
        debug!(worksheet = self.location.worksheet(), "workout log row appended");
        Ok(())
    }
}

async fn read_success_body(
    response: reqwest::Response,
) -> Result<Vec<u8>, WorkoutLogRepositoryError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

fn decode_range(body: &[u8]) -> Result<ValueRangeDto, WorkoutLogRepositoryError> {
    serde_json::from_slice(body).map_err(|error| {
        WorkoutLogRepositoryError::decode(format!("invalid Sheets JSON payload: {error}"))
    })
}

fn parse_history(body: &[u8]) -> Result<Vec<WorkoutHistoryEntry>, WorkoutLogRepositoryError> {
    decode_range(body)?
        .into_history()
        .map_err(WorkoutLogRepositoryError::decode)
}

fn map_token_error(error: AccessTokenError) -> WorkoutLogRepositoryError {
    match error {
        AccessTokenError::Transport { message } => WorkoutLogRepositoryError::transport(message),
        AccessTokenError::Timeout { message } => WorkoutLogRepositoryError::timeout(message),
        AccessTokenError::Rejected { message } | AccessTokenError::Signing { message } => {
            WorkoutLogRepositoryError::unauthorized(message)
        }
        AccessTokenError::Decode { message } => WorkoutLogRepositoryError::decode(message),
    }
}

fn map_transport_error(error: reqwest::Error) -> WorkoutLogRepositoryError {
    if error.is_timeout() {
        WorkoutLogRepositoryError::timeout(error.to_string())
    } else {
        WorkoutLogRepositoryError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> WorkoutLogRepositoryError {
    let message = status_message(status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            WorkoutLogRepositoryError::unauthorized(message)
        }
        StatusCode::TOO_MANY_REQUESTS => WorkoutLogRepositoryError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            WorkoutLogRepositoryError::timeout(message)
        }
        _ if status.is_client_error() => WorkoutLogRepositoryError::invalid_request(message),
        _ => WorkoutLogRepositoryError::transport(message),
    }
}
