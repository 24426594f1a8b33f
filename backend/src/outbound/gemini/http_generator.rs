//! Reqwest-backed Gemini text generator.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{ErrorEnvelopeDto, GenerateContentRequestDto, GenerateContentResponseDto};
use crate::domain::ports::{TextGenerator, TextGeneratorError};
use crate::outbound::http_body::status_message;

/// Production Generative Language API endpoint.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Text generator calling one Gemini model.
pub struct GeminiTextGenerator {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
}

impl GeminiTextGenerator {
    /// Build a generator for `model` with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TextGeneratorError::Rejected`] when the base URL cannot hold
    /// the model path, or [`TextGeneratorError::Transport`] when the HTTP
    /// client cannot be built.
    pub fn new(
        api_base: &Url,
        model: &str,
        api_key: Zeroizing<String>,
        timeout: Duration,
    ) -> Result<Self, TextGeneratorError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| TextGeneratorError::transport(error.to_string()))?;
        let endpoint = generate_content_url(api_base, model)?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, TextGeneratorError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&GenerateContentRequestDto::user_prompt(prompt))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let text = parse_text(body.as_ref())?;
        debug!(chars = text.chars().count(), "generation reply received");
        Ok(text)
    }
}

fn generate_content_url(api_base: &Url, model: &str) -> Result<Url, TextGeneratorError> {
    let mut url = api_base.clone();
    url.path_segments_mut()
        .map_err(|()| {
            TextGeneratorError::rejected(format!("API base cannot take path segments: {api_base}"))
        })?
        .pop_if_empty()
        .push("models")
        .push(&format!("{model}:generateContent"));
    Ok(url)
}

fn parse_text(body: &[u8]) -> Result<String, TextGeneratorError> {
    let decoded: GenerateContentResponseDto = serde_json::from_slice(body).map_err(|error| {
        TextGeneratorError::decode(format!("invalid Gemini JSON payload: {error}"))
    })?;
    decoded.into_text().map_err(TextGeneratorError::decode)
}

fn map_transport_error(error: reqwest::Error) -> TextGeneratorError {
    if error.is_timeout() {
        TextGeneratorError::timeout(error.to_string())
    } else {
        TextGeneratorError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> TextGeneratorError {
    let message = serde_json::from_slice::<ErrorEnvelopeDto>(body)
        .ok()
        .filter(|envelope| !envelope.error.message.is_empty())
        .map_or_else(
            || status_message(status, body),
            |envelope| match envelope.error.status {
                Some(code) => format!("status {}: {code}: {}", status.as_u16(), envelope.error.message),
                None => format!("status {}: {}", status.as_u16(), envelope.error.message),
            },
        );

    match status {
        StatusCode::TOO_MANY_REQUESTS => TextGeneratorError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            TextGeneratorError::timeout(message)
        }
        _ if status.is_client_error() => TextGeneratorError::rejected(message),
        _ => TextGeneratorError::transport(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
    use rstest::rstest;
    use serde_json::{Value, json};

    #[test]
    fn builds_model_endpoint() {
        let base = Url::parse(GEMINI_API_BASE).expect("valid base");
        let url = generate_content_url(&base, "gemini-1.5-flash").expect("url builds");
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[rstest]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS, "RateLimited")]
    #[case::timeout(StatusCode::GATEWAY_TIMEOUT, "Timeout")]
    #[case::bad_key(StatusCode::BAD_REQUEST, "Rejected")]
    #[case::forbidden(StatusCode::FORBIDDEN, "Rejected")]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, "Transport")]
    fn maps_http_statuses_to_port_errors(#[case] status: StatusCode, #[case] expected: &str) {
        let error = map_status_error(status, b"oops");
        let matched = match expected {
            "RateLimited" => matches!(error, TextGeneratorError::RateLimited { .. }),
            "Timeout" => matches!(error, TextGeneratorError::Timeout { .. }),
            "Rejected" => matches!(error, TextGeneratorError::Rejected { .. }),
            "Transport" => matches!(error, TextGeneratorError::Transport { .. }),
            _ => panic!("unsupported test expectation: {expected}"),
        };
        assert!(matched, "{status} should map to {expected}, got {error:?}");
    }

    #[test]
    fn status_errors_prefer_api_message() {
        let body = json!({
            "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
        });
        let error = map_status_error(StatusCode::BAD_REQUEST, body.to_string().as_bytes());
        assert_eq!(
            error,
            TextGeneratorError::rejected("status 400: INVALID_ARGUMENT: API key not valid.")
        );
    }

    async fn stub_generate(request: HttpRequest, body: web::Json<Value>) -> HttpResponse {
        let key = request
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());
        if key != Some("fixture-key") {
            return HttpResponse::BadRequest().json(json!({
                "error": { "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
            }));
        }
        let prompt = body["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap_or_default()
            .to_owned();
        HttpResponse::Ok().json(json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": format!("echo: {prompt}") }] } }]
        }))
    }

    #[actix_web::test]
    async fn posts_prompt_and_reads_first_candidate() {
        let server = HttpServer::new(|| {
            App::new().route(
                "/v1beta/models/gemini-1.5-flash:generateContent",
                web::post().to(stub_generate),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind loopback");
        let addr = server.addrs().first().copied().expect("bound address");
        let running = server.run();
        let control = running.handle();
        actix_web::rt::spawn(running);

        let base = Url::parse(&format!("http://{addr}/v1beta")).expect("valid base");
        let generator = GeminiTextGenerator::new(
            &base,
            "gemini-1.5-flash",
            Zeroizing::new("fixture-key".to_owned()),
            Duration::from_secs(5),
        )
        .expect("generator builds");
        let wrong_key = GeminiTextGenerator::new(
            &base,
            "gemini-1.5-flash",
            Zeroizing::new("wrong".to_owned()),
            Duration::from_secs(5),
        )
        .expect("generator builds");

        let reply = generator.generate("hello").await;
        let rejected = wrong_key.generate("hello").await;
        control.stop(true).await;

        assert_eq!(reply, Ok("echo: hello".to_owned()));
        assert!(matches!(rejected, Err(TextGeneratorError::Rejected { .. })));
    }
}
