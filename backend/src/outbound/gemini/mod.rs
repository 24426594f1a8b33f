//! Gemini outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `TextGenerator`
//! port using the `generateContent` REST method.

mod dto;
mod http_generator;

pub use http_generator::{GEMINI_API_BASE, GeminiTextGenerator};
