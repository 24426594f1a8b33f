//! Bearer tokens for Google APIs via the JWT bearer grant.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use mockable::Clock;
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::debug;
use zeroize::Zeroizing;

use super::ServiceAccountKey;
use super::dto::{AssertionClaims, TokenResponseDto};
use crate::outbound::http_body::status_message;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;

/// Errors raised while obtaining an access token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessTokenError {
    /// Network transport failed before a response arrived.
    #[error("token endpoint transport failed: {message}")]
    Transport {
        /// Transport failure detail.
        message: String,
    },
    /// The token request timed out.
    #[error("token endpoint timed out: {message}")]
    Timeout {
        /// Timeout detail.
        message: String,
    },
    /// The endpoint refused the assertion.
    #[error("token endpoint rejected assertion: {message}")]
    Rejected {
        /// Status and body preview.
        message: String,
    },
    /// The endpoint reply did not contain a token.
    #[error("token endpoint response decode failed: {message}")]
    Decode {
        /// Decode failure detail.
        message: String,
    },
    /// The private key could not sign the assertion.
    #[error("service account assertion signing failed: {message}")]
    Signing {
        /// Signing failure detail.
        message: String,
    },
}

/// Source of bearer tokens for outbound Google API calls.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// A token valid for at least the next minute.
    async fn access_token(&self) -> Result<Zeroizing<String>, AccessTokenError>;
}

#[derive(Clone)]
struct CachedToken {
    value: Zeroizing<String>,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Service-account token source with an in-memory cache.
pub struct ServiceAccountTokenSource {
    client: Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    scope: String,
    clock: Arc<dyn Clock>,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokenSource {
    /// Build a token source for one scope.
    ///
    /// # Errors
    ///
    /// Returns [`AccessTokenError::Signing`] when the private key is not a
    /// PEM-encoded RSA key.
    pub fn new(
        client: Client,
        key: ServiceAccountKey,
        scope: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AccessTokenError> {
        let encoding_key =
            EncodingKey::from_rsa_pem(key.private_key_pem().as_bytes()).map_err(|error| {
                AccessTokenError::Signing {
                    message: error.to_string(),
                }
            })?;
        Ok(Self {
            client,
            key,
            encoding_key,
            scope: scope.into(),
            clock,
            cached: Mutex::new(None),
        })
    }

    fn sign_assertion(&self, now: DateTime<Utc>) -> Result<String, AccessTokenError> {
        let claims = assertion_claims(&self.key, &self.scope, now);
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id().map(str::to_owned);
        encode(&header, &claims, &self.encoding_key).map_err(|error| AccessTokenError::Signing {
            message: error.to_string(),
        })
    }

    async fn exchange(&self, now: DateTime<Utc>) -> Result<CachedToken, AccessTokenError> {
        let assertion = Zeroizing::new(self.sign_assertion(now)?);
        let response = self
            .client
            .post(self.key.token_uri().clone())
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(AccessTokenError::Rejected {
                message: status_message(status, body.as_ref()),
            });
        }

        let decoded: TokenResponseDto =
            serde_json::from_slice(body.as_ref()).map_err(|error| AccessTokenError::Decode {
                message: error.to_string(),
            })?;
        let lifetime = decoded.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);
        debug!(expires_in = lifetime, "service account token issued");
        Ok(CachedToken {
            value: Zeroizing::new(decoded.access_token),
            expires_at: now + Duration::seconds(lifetime),
        })
    }
}

#[async_trait]
impl AccessTokenProvider for ServiceAccountTokenSource {
    async fn access_token(&self) -> Result<Zeroizing<String>, AccessTokenError> {
        let mut cached = self.cached.lock().await;
        let now = self.clock.utc();
        if let Some(token) = cached.as_ref().filter(|token| token.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        let token = self.exchange(now).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }
}

fn assertion_claims<'a>(
    key: &'a ServiceAccountKey,
    scope: &'a str,
    now: DateTime<Utc>,
) -> AssertionClaims<'a> {
    let iat = now.timestamp();
    AssertionClaims {
        iss: key.client_email(),
        scope,
        aud: key.token_uri().as_str(),
        iat,
        exp: iat + ASSERTION_LIFETIME_SECS,
    }
}

fn map_transport_error(error: reqwest::Error) -> AccessTokenError {
    if error.is_timeout() {
        AccessTokenError::Timeout {
            message: error.to_string(),
        }
    } else {
        AccessTokenError::Transport {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use actix_web::{App, HttpResponse, HttpServer, web};
    use chrono::{Local, TimeZone};
    use jsonwebtoken::{DecodingKey, Validation, decode};

    const TEST_KEY_PEM: &str = include_str!("../../../tests/fixtures/service_account_rsa.pem");
    const TEST_PUBLIC_PEM: &[u8] =
        include_bytes!("../../../tests/fixtures/service_account_rsa.pub.pem");

    struct FixtureClock {
        utc_now: DateTime<Utc>,
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }

    fn fixture_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn key_for(token_uri: &str) -> ServiceAccountKey {
        let raw = serde_json::json!({
            "type": "service_account",
            "client_email": "tracker@gym.iam.gserviceaccount.com",
            "private_key_id": "kid-1",
            "private_key": TEST_KEY_PEM,
            "token_uri": token_uri,
        });
        ServiceAccountKey::from_json(&raw.to_string()).expect("credential parses")
    }

    fn source_for(token_uri: &str) -> ServiceAccountTokenSource {
        ServiceAccountTokenSource::new(
            Client::new(),
            key_for(token_uri),
            "scope-a",
            Arc::new(FixtureClock {
                utc_now: fixture_now(),
            }),
        )
        .expect("token source builds")
    }

    #[test]
    fn claims_cover_one_hour_from_now() {
        let key = key_for("https://oauth2.example.test/token");
        let claims = assertion_claims(&key, "scope-a", fixture_now());

        assert_eq!(
            claims,
            AssertionClaims {
                iss: "tracker@gym.iam.gserviceaccount.com",
                scope: "scope-a",
                aud: "https://oauth2.example.test/token",
                iat: fixture_now().timestamp(),
                exp: fixture_now().timestamp() + 3600,
            }
        );
    }

    #[test]
    fn cached_token_refreshes_inside_margin() {
        let token = CachedToken {
            value: Zeroizing::new("t".to_owned()),
            expires_at: fixture_now() + Duration::seconds(120),
        };
        assert!(token.is_fresh(fixture_now()));
        assert!(!token.is_fresh(fixture_now() + Duration::seconds(60)));
    }

    #[test]
    fn rejects_non_rsa_key() {
        let raw = r#"{"client_email": "a@b.test", "private_key": "not a pem"}"#;
        let key = ServiceAccountKey::from_json(raw).expect("credential parses");
        let result = ServiceAccountTokenSource::new(
            Client::new(),
            key,
            "scope-a",
            Arc::new(mockable::DefaultClock),
        );
        assert!(matches!(result, Err(AccessTokenError::Signing { .. })));
    }

    #[test]
    fn assertion_is_rs256_signed() {
        let source = source_for("https://oauth2.example.test/token");
        let assertion = source.sign_assertion(fixture_now()).expect("assertion signs");

        let header = jsonwebtoken::decode_header(&assertion).expect("header decodes");
        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(header.kid.as_deref(), Some("kid-1"));

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = false;
        validation.set_audience(&["https://oauth2.example.test/token"]);
        let decoded = decode::<serde_json::Value>(
            &assertion,
            &DecodingKey::from_rsa_pem(TEST_PUBLIC_PEM).expect("public key parses"),
            &validation,
        )
        .expect("claims decode");
        assert_eq!(decoded.claims["scope"], "scope-a");
    }

    #[actix_web::test]
    async fn exchanges_once_then_serves_from_cache() {
        let hits = web::Data::new(AtomicUsize::new(0));
        let server_hits = hits.clone();
        let server = HttpServer::new(move || {
            App::new().app_data(server_hits.clone()).route(
                "/token",
                web::post().to(|hits: web::Data<AtomicUsize>, form: web::Form<Vec<(String, String)>>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    let grant = form
                        .iter()
                        .find(|(name, _)| name == "grant_type")
                        .map(|(_, value)| value.clone());
                    if grant.as_deref() == Some(JWT_BEARER_GRANT) {
                        HttpResponse::Ok().json(serde_json::json!({
                            "access_token": "ya29.fixture",
                            "expires_in": 3599,
                            "token_type": "Bearer",
                        }))
                    } else {
                        HttpResponse::BadRequest().finish()
                    }
                }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind loopback");
        let addr = server.addrs()[0];
        let handle = server.run();
        let stop = handle.handle();
        actix_web::rt::spawn(handle);

        let source = source_for(&format!("http://{addr}/token"));
        let first = source.access_token().await.expect("token issued");
        let second = source.access_token().await.expect("token cached");
        stop.stop(true).await;

        assert_eq!(first.as_str(), "ya29.fixture");
        assert_eq!(second.as_str(), "ya29.fixture");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
