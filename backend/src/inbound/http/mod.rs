//! HTTP inbound adapter: the workout form page, a JSON API and health probes.

pub mod error;
pub mod health;
pub mod page;
pub mod render;
pub mod state;
pub(crate) mod validation;
pub mod workouts;

pub use error::{ApiError, ApiResult};
