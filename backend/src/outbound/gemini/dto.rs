//! DTOs for the Gemini `generateContent` request and response.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct GenerateContentRequestDto<'a> {
    pub(super) contents: [ContentDto<'a>; 1],
}

#[derive(Debug, Serialize)]
pub(super) struct ContentDto<'a> {
    pub(super) role: &'static str,
    pub(super) parts: [TextPartDto<'a>; 1],
}

#[derive(Debug, Serialize)]
pub(super) struct TextPartDto<'a> {
    pub(super) text: &'a str,
}

impl<'a> GenerateContentRequestDto<'a> {
    pub(super) fn user_prompt(prompt: &'a str) -> Self {
        Self {
            contents: [ContentDto {
                role: "user",
                parts: [TextPartDto { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateContentResponseDto {
    #[serde(default)]
    pub(super) candidates: Vec<CandidateDto>,
    #[serde(default, rename = "promptFeedback")]
    pub(super) prompt_feedback: Option<PromptFeedbackDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidateDto {
    #[serde(default)]
    pub(super) content: Option<CandidateContentDto>,
    #[serde(default, rename = "finishReason")]
    pub(super) finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidateContentDto {
    #[serde(default)]
    pub(super) parts: Vec<CandidatePartDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidatePartDto {
    #[serde(default)]
    pub(super) text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PromptFeedbackDto {
    #[serde(default, rename = "blockReason")]
    pub(super) block_reason: Option<String>,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelopeDto {
    pub(super) error: ErrorBodyDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    pub(super) message: String,
    #[serde(default)]
    pub(super) status: Option<String>,
}

impl GenerateContentResponseDto {
    /// First text part of the first candidate.
    pub(super) fn into_text(self) -> Result<String, String> {
        if let Some(reason) = self.prompt_feedback.and_then(|feedback| feedback.block_reason) {
            return Err(format!("prompt blocked: {reason}"));
        }
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| "response has no candidates".to_owned())?;
        let finish_reason = candidate.finish_reason;
        candidate
            .content
            .into_iter()
            .flat_map(|content| content.parts)
            .find_map(|part| part.text)
            .ok_or_else(|| match finish_reason {
                Some(reason) => format!("candidate has no text (finish reason {reason})"),
                None => "candidate has no text".to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> GenerateContentResponseDto {
        serde_json::from_value(value).expect("response decodes")
    }

    #[test]
    fn request_wraps_prompt_as_single_user_turn() {
        let body = serde_json::to_value(GenerateContentRequestDto::user_prompt("hi"))
            .expect("request serialises");
        assert_eq!(
            body,
            json!({ "contents": [{ "role": "user", "parts": [{ "text": "hi" }] }] })
        );
    }

    #[test]
    fn takes_first_text_part() {
        let dto = decode(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "first" }, { "text": "second" }] } },
                { "content": { "parts": [{ "text": "other" }] } }
            ]
        }));
        assert_eq!(dto.into_text(), Ok("first".to_owned()));
    }

    #[test]
    fn empty_candidates_are_an_error() {
        assert!(decode(json!({ "candidates": [] })).into_text().is_err());
    }

    #[test]
    fn blocked_prompt_is_an_error() {
        let dto = decode(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
        assert_eq!(dto.into_text(), Err("prompt blocked: SAFETY".to_owned()));
    }

    #[test]
    fn candidate_without_text_reports_finish_reason() {
        let dto = decode(json!({ "candidates": [{ "finishReason": "SAFETY" }] }));
        assert_eq!(
            dto.into_text(),
            Err("candidate has no text (finish reason SAFETY)".to_owned())
        );
    }
}
