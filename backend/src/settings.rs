//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `GYM_TRACKER_*` environment variables or a
//! config file. Secrets have no defaults: accessors for them fail when the
//! value is absent or blank.

use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::{AthleteProfile, Weight, WeightValidationError};
use crate::outbound::google_auth::{ServiceAccountKey, ServiceAccountKeyError};
use crate::outbound::sheets::{SheetLocation, SheetLocationError};

const DEFAULT_WORKSHEET: &str = "Workouts";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors raised while turning raw settings into runtime values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A required value is absent or blank.
    #[error("missing required setting '{0}'")]
    Missing(&'static str),
    /// The bind address does not parse.
    #[error("invalid bind_addr '{value}': {source}")]
    BindAddr {
        /// Raw configured value.
        value: String,
        /// Parse failure.
        source: std::net::AddrParseError,
    },
    /// The athlete's body weight is not a valid weight.
    #[error("invalid athlete_weight_lbs: {0}")]
    AthleteWeight(#[from] WeightValidationError),
    /// The credential file cannot be read.
    #[error("failed to read service account file {path}: {source}")]
    CredentialsRead {
        /// Configured path.
        path: PathBuf,
        /// I/O failure.
        source: std::io::Error,
    },
    /// The credential file is not a usable service-account key.
    #[error(transparent)]
    Credentials(#[from] ServiceAccountKeyError),
    /// The sheet URL does not name a spreadsheet.
    #[error(transparent)]
    SheetLocation(#[from] SheetLocationError),
}

/// Runtime configuration for the gym tracker server.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GYM_TRACKER")]
pub struct AppSettings {
    /// API key for the text-generation service.
    pub gemini_api_key: Option<String>,
    /// Browser URL of the spreadsheet holding the workout log.
    pub sheet_url: Option<String>,
    /// Path to the service-account JSON credential.
    pub service_account_path: Option<PathBuf>,
    /// Worksheet (tab) name inside the spreadsheet.
    pub worksheet: Option<String>,
    /// Text-generation model name.
    pub gemini_model: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Timeout applied to outbound HTTP calls, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Athlete age used in coaching prompts.
    pub athlete_age: Option<u32>,
    /// Athlete sex descriptor used in coaching prompts.
    pub athlete_sex: Option<String>,
    /// Athlete body weight in pounds.
    #[ortho_config(cli_short = 'W')]
    pub athlete_weight_lbs: Option<f64>,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "<redacted>"))
            .field("sheet_url", &self.sheet_url)
            .field("service_account_path", &self.service_account_path)
            .field("worksheet", &self.worksheet)
            .field("gemini_model", &self.gemini_model)
            .field("bind_addr", &self.bind_addr)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("athlete_age", &self.athlete_age)
            .field("athlete_sex", &self.athlete_sex)
            .field("athlete_weight_lbs", &self.athlete_weight_lbs)
            .finish()
    }
}

fn required<'a>(value: Option<&'a str>, key: &'static str) -> Result<&'a str, SettingsError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(SettingsError::Missing(key))
}

impl AppSettings {
    /// Return the API key, failing when it is absent or blank.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] when unset.
    pub fn gemini_api_key(&self) -> Result<Zeroizing<String>, SettingsError> {
        required(self.gemini_api_key.as_deref(), "gemini_api_key")
            .map(|key| Zeroizing::new(key.to_owned()))
    }

    /// Return the spreadsheet and worksheet to log into.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] when no sheet URL is set, or
    /// [`SettingsError::SheetLocation`] when it has no spreadsheet id.
    pub fn sheet_location(&self) -> Result<SheetLocation, SettingsError> {
        let url = required(self.sheet_url.as_deref(), "sheet_url")?;
        Ok(SheetLocation::from_url(url, self.worksheet())?)
    }

    /// Return the configured credential path.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] when unset.
    pub fn service_account_path(&self) -> Result<&Path, SettingsError> {
        self.service_account_path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or(SettingsError::Missing("service_account_path"))
    }

    /// Read and parse the service-account credential.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::CredentialsRead`] when the file cannot be read
    /// and [`SettingsError::Credentials`] when it is not a service-account key.
    pub fn service_account_key(&self) -> Result<ServiceAccountKey, SettingsError> {
        let path = self.service_account_path()?;
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::CredentialsRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(ServiceAccountKey::from_json(&raw)?)
    }

    /// Return the worksheet name, falling back to the default.
    pub fn worksheet(&self) -> &str {
        self.worksheet.as_deref().unwrap_or(DEFAULT_WORKSHEET)
    }

    /// Return the model name, falling back to the default.
    pub fn gemini_model(&self) -> &str {
        self.gemini_model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL)
    }

    /// Return the socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Return the outbound request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Return the athlete profile, overriding defaults field by field.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::AthleteWeight`] when the body weight is
    /// negative or not finite.
    pub fn athlete_profile(&self) -> Result<AthleteProfile, SettingsError> {
        let defaults = AthleteProfile::default();
        Ok(AthleteProfile {
            age: self.athlete_age.unwrap_or(defaults.age),
            sex: self
                .athlete_sex
                .as_deref()
                .map(str::trim)
                .filter(|sex| !sex.is_empty())
                .map_or(defaults.sex, str::to_owned),
            body_weight: self
                .athlete_weight_lbs
                .map(Weight::new)
                .transpose()?
                .unwrap_or(defaults.body_weight),
        })
    }
}
