//! Google service-account authentication.
//!
//! A signed RS256 assertion is exchanged at the credential's `token_uri` for a
//! short-lived bearer token (the OAuth 2.0 JWT bearer grant). The token is
//! cached and reused until one minute before it expires.

mod dto;
mod service_account;
mod token_source;

pub use service_account::{ServiceAccountKey, ServiceAccountKeyError};
pub use token_source::{AccessTokenError, AccessTokenProvider, ServiceAccountTokenSource};

/// OAuth scope granting read and write access to spreadsheets.
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
