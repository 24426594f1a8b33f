//! Google Sheets outbound adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `WorkoutLogRepository` port over the Sheets REST v4 values API.

mod dto;
mod http_repository;
mod location;

pub use http_repository::{SHEETS_API_BASE, SheetsWorkoutLogRepository};
pub use location::{SheetLocation, SheetLocationError};
