//! Outbound adapters implementing domain ports for external services.
//!
//! - **sheets**: Google Sheets-backed workout log (`WorkoutLogRepository`)
//! - **gemini**: Gemini-backed text generation (`TextGenerator`)
//! - **google_auth**: service-account bearer tokens used by `sheets`
//!
//! Adapters are thin translators that convert between domain types and
//! wire representations. They contain no business logic.

pub mod gemini;
pub mod google_auth;
mod http_body;
pub mod sheets;
