//! Shared validation helpers for inbound HTTP adapters.
//!
//! Form and JSON handlers both accept loosely typed input and turn it into
//! domain values here, so a bad field yields the same `invalid_request`
//! payload whichever surface received it.

use serde_json::json;

use crate::domain::{Difficulty, DomainError, RoutineDay, Weight};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidWeight,
    UnknownDifficulty,
    UnknownDay,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidWeight => "invalid_weight",
            Self::UnknownDifficulty => "unknown_difficulty",
            Self::UnknownDay => "unknown_day",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(
    field: FieldName,
    code: ErrorCode,
    message: impl Into<String>,
    value: Option<&str>,
) -> DomainError {
    let details = match value {
        Some(value) => json!({ "field": field.as_str(), "value": value, "code": code.as_str() }),
        None => json!({ "field": field.as_str(), "code": code.as_str() }),
    };
    DomainError::invalid_request(message).with_details(details)
}

/// Non-blank text, trimmed.
pub(crate) fn parse_required_text(field: FieldName, raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(field_error(
            field,
            ErrorCode::MissingField,
            format!("{} must not be empty", field.as_str()),
            None,
        ));
    }
    Ok(trimmed.to_owned())
}

/// Weight typed into a number input.
pub(crate) fn parse_weight_text(field: FieldName, raw: &str) -> Result<Weight, DomainError> {
    raw.parse::<Weight>().map_err(|error| {
        field_error(
            field,
            ErrorCode::InvalidWeight,
            error.to_string(),
            Some(raw),
        )
    })
}

/// Weight sent as a JSON number.
pub(crate) fn parse_weight_number(field: FieldName, raw: f64) -> Result<Weight, DomainError> {
    Weight::new(raw).map_err(|error| {
        field_error(
            field,
            ErrorCode::InvalidWeight,
            error.to_string(),
            Some(&raw.to_string()),
        )
    })
}

/// One of the three difficulty labels.
pub(crate) fn parse_difficulty(field: FieldName, raw: &str) -> Result<Difficulty, DomainError> {
    raw.parse::<Difficulty>().map_err(|error| {
        field_error(field, ErrorCode::UnknownDifficulty, error.to_string(), Some(raw))
    })
}

/// Day selector value; absent means the first day.
pub(crate) fn parse_day(field: FieldName, raw: Option<&str>) -> Result<RoutineDay, DomainError> {
    match raw {
        None => Ok(RoutineDay::default()),
        Some(value) => value.parse::<RoutineDay>().map_err(|error| {
            field_error(field, ErrorCode::UnknownDay, error.to_string(), Some(value))
        }),
    }
}
