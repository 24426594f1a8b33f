//! Test utilities for the gym tracker crate.
//!
//! This module provides in-memory adapters shared by unit tests (in `src/`)
//! and integration tests (in `tests/`). It is only compiled for tests or with
//! the `test-support` feature.

pub mod workout_log;
