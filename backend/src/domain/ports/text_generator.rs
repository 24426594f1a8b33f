//! Driven port for the generative text service behind the progression coach.
//!
//! One prompt in, free text out. Prompt construction and reply parsing stay
//! in the domain.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the text generation service.
    pub enum TextGeneratorError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "text generation transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } =>
            "text generation timed out: {message}",
        /// The service throttled the request or the quota is spent.
        RateLimited { message: String } =>
            "text generation rate limited request: {message}",
        /// The service refused the request (bad key, blocked prompt, bad model).
        Rejected { message: String } =>
            "text generation rejected request: {message}",
        /// The response carried no usable text.
        Decode { message: String } =>
            "text generation response decode failed: {message}",
    }
}

/// Port for single-shot text generation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a reply for one prompt. Single attempt, no retries.
    async fn generate(&self, prompt: &str) -> Result<String, TextGeneratorError>;
}

/// Fixture implementation replying with empty text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureTextGenerator;

#[async_trait]
impl TextGenerator for FixtureTextGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, TextGeneratorError> {
        Ok(String::new())
    }
}
