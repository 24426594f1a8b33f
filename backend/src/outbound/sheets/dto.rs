//! DTOs for the Sheets values API.
//!
//! Reads decode into [`ValueRangeDto`] and are mapped to history entries by
//! header name, the way a "get all records" call treats the first row.
//! Appends serialise one [`WorkoutLogRow`] into positional cells, in
//! [`WORKOUT_LOG_COLUMNS`] order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    EXERCISE_COLUMN, NEXT_WEIGHT_COLUMN, WORKOUT_LOG_COLUMNS, Weight, WorkoutHistoryEntry,
    WorkoutLogRow,
};

#[derive(Debug, Default, Deserialize)]
pub(super) struct ValueRangeDto {
    #[serde(default)]
    pub(super) values: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
pub(super) struct AppendRequestDto {
    #[serde(rename = "majorDimension")]
    pub(super) major_dimension: &'static str,
    pub(super) values: Vec<Vec<Value>>,
}

impl AppendRequestDto {
    pub(super) fn single_row(row: &WorkoutLogRow) -> Self {
        Self {
            major_dimension: "ROWS",
            values: vec![row_values(row)],
        }
    }

    /// The header row of a blank log.
    pub(super) fn header_row() -> Self {
        Self {
            major_dimension: "ROWS",
            values: vec![WORKOUT_LOG_COLUMNS.iter().copied().map(Value::from).collect()],
        }
    }
}

/// Positional cells in log column order.
pub(super) fn row_values(row: &WorkoutLogRow) -> Vec<Value> {
    vec![
        Value::from(row.date.format("%Y-%m-%d").to_string()),
        Value::from(row.exercise_name.as_str()),
        weight_cell(row.weight_used),
        Value::from(row.sets),
        Value::from(row.reps.as_str()),
        Value::from(row.difficulty.label()),
        weight_cell(row.next_weight),
        Value::from(row.message.as_str()),
    ]
}

fn weight_cell(weight: Weight) -> Value {
    Value::from(weight.as_pounds())
}

impl ValueRangeDto {
    /// Whether the range holds no cells at all.
    pub(super) fn is_blank(&self) -> bool {
        self.values.iter().all(|row| row.iter().all(|cell| text_cell(cell).is_none()))
    }

    /// Map data rows to history entries in sheet order.
    ///
    /// An empty range is an empty history. A header row without an
    /// `Exercise` column is a decode error. Rows with a blank exercise are
    /// skipped.
    pub(super) fn into_history(self) -> Result<Vec<WorkoutHistoryEntry>, String> {
        let mut rows = self.values.into_iter();
        let Some(header) = rows.next() else {
            return Ok(Vec::new());
        };
        let exercise_col = column_index(&header, EXERCISE_COLUMN)
            .ok_or_else(|| format!("header row has no '{EXERCISE_COLUMN}' column"))?;
        let next_weight_col = column_index(&header, NEXT_WEIGHT_COLUMN);

        Ok(rows
            .filter_map(|cells| {
                let exercise_name = cells.get(exercise_col).and_then(text_cell)?;
                let next_weight = next_weight_col
                    .and_then(|col| cells.get(col))
                    .and_then(weight_from_cell);
                Some(WorkoutHistoryEntry {
                    exercise_name,
                    next_weight,
                })
            })
            .collect())
    }
}

fn column_index(header: &[Value], name: &str) -> Option<usize> {
    header
        .iter()
        .position(|cell| cell.as_str().is_some_and(|text| text.trim() == name))
}

fn text_cell(cell: &Value) -> Option<String> {
    let text = match cell {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!text.trim().is_empty()).then_some(text)
}

fn weight_from_cell(cell: &Value) -> Option<Weight> {
    match cell {
        Value::Number(number) => number.as_f64().and_then(|pounds| Weight::new(pounds).ok()),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}
