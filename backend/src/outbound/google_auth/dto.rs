//! Wire types for the service-account credential file and token endpoint.

use serde::{Deserialize, Serialize};

/// Fields read from the downloaded credential JSON. Other fields are ignored.
#[derive(Debug, Deserialize)]
pub(super) struct ServiceAccountFileDto {
    #[serde(rename = "type", default)]
    pub(super) kind: Option<String>,
    pub(super) client_email: String,
    pub(super) private_key: String,
    #[serde(default)]
    pub(super) private_key_id: Option<String>,
    #[serde(default)]
    pub(super) token_uri: Option<String>,
}

/// Claims of the signed assertion.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub(super) struct AssertionClaims<'a> {
    pub(super) iss: &'a str,
    pub(super) scope: &'a str,
    pub(super) aud: &'a str,
    pub(super) iat: i64,
    pub(super) exp: i64,
}

/// Successful token endpoint reply.
#[derive(Debug, Deserialize)]
pub(super) struct TokenResponseDto {
    pub(super) access_token: String,
    #[serde(default)]
    pub(super) expires_in: Option<i64>,
}
