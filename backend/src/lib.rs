//! Private gym tracker: routine form, progression coach and spreadsheet log.
//!
//! The domain lives in [`domain`]; HTTP handlers in [`inbound`] and the
//! Google Sheets and Gemini adapters in [`outbound`] plug into its ports.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use domain::TraceId;
pub use middleware::Trace;
