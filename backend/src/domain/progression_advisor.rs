//! Progressive-overload coaching backed by a [`TextGenerator`].
//!
//! The advisor builds a one-shot prompt from the athlete profile and the set
//! just performed, then reads a small JSON object out of the reply. Models
//! often wrap JSON in Markdown fences, so those are stripped first. Any
//! failure yields [`Advice::keep`]; logging a workout never fails because the
//! coach is unavailable.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::ports::TextGenerator;
use crate::domain::{AthleteProfile, Difficulty, Weight};

/// Message stored when no usable advice could be obtained.
pub const ADVISOR_FALLBACK_MESSAGE: &str = "AI connection issue. Keeping weight same.";

/// Recommended weight for next session plus the reasoning behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Advice {
    /// Weight to use next time.
    pub new_weight: Weight,
    /// Short coaching note.
    pub message: String,
}

impl Advice {
    /// Fallback advice: repeat the same weight.
    #[must_use]
    pub fn keep(weight: Weight) -> Self {
        Self {
            new_weight: weight,
            message: ADVISOR_FALLBACK_MESSAGE.to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AdviceReply {
    new_weight: f64,
    message: String,
}

/// Produces [`Advice`] for a completed exercise.
#[derive(Clone)]
pub struct ProgressionAdvisor<G> {
    generator: Arc<G>,
    profile: AthleteProfile,
}

impl<G> ProgressionAdvisor<G> {
    /// Create an advisor for one athlete.
    pub fn new(generator: Arc<G>, profile: AthleteProfile) -> Self {
        Self { generator, profile }
    }

    /// Prompt sent to the generator.
    #[must_use]
    pub fn build_prompt(&self, exercise_name: &str, weight: Weight, difficulty: Difficulty) -> String {
        let profile = &self.profile;
        format!(
            "I am a {age} year old {sex}, {body}lbs. Exercise: {exercise_name}. \
             Weight: {weight} lbs. Difficulty: {difficulty}. \
             What should my weight be next time? \
             Return JSON: {{\"new_weight\": 50, \"message\": \"Reasoning...\"}}",
            age = profile.age,
            sex = profile.sex,
            body = profile.body_weight,
        )
    }
}

impl<G> ProgressionAdvisor<G>
where
    G: TextGenerator,
{
    /// Ask for the next-session weight. Never fails.
    pub async fn advise(&self, exercise_name: &str, weight: Weight, difficulty: Difficulty) -> Advice {
        let prompt = self.build_prompt(exercise_name, weight, difficulty);
        let reply = match self.generator.generate(&prompt).await {
            Ok(reply) => reply,
            Err(error) => {
                warn!(%error, exercise = exercise_name, "advisor call failed; keeping weight");
                return Advice::keep(weight);
            }
        };

        match parse_advice(&reply) {
            Ok(advice) => advice,
            Err(reason) => {
                warn!(
                    exercise = exercise_name,
                    reason = %reason,
                    "advisor reply unusable; keeping weight"
                );
                Advice::keep(weight)
            }
        }
    }
}

/// Remove Markdown code fences and surrounding whitespace.
fn strip_fences(reply: &str) -> String {
    reply.replace("```json", "").replace("```", "").trim().to_owned()
}

fn parse_advice(reply: &str) -> Result<Advice, String> {
    let cleaned = strip_fences(reply);
    let parsed: AdviceReply = serde_json::from_str(&cleaned).map_err(|err| err.to_string())?;
    let new_weight = Weight::new(parsed.new_weight).map_err(|err| err.to_string())?;
    Ok(Advice {
        new_weight,
        message: parsed.message,
    })
}
