// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Number of questions generated when the request does not ask for a usable count.
pub const DEFAULT_NUM_QUESTIONS: u32 = 5;

/// The only message a client ever sees when generation fails.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate quiz.";

/// Body of `POST /api/generate-quiz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizRequest {
    pub num_questions: u32,
}

impl Default for QuizRequest {
    fn default() -> Self {
        Self {
            num_questions: DEFAULT_NUM_QUESTIONS,
        }
    }
}

impl QuizRequest {
    /// Reads the requested question count from a raw request body.
    ///
    /// Never rejects: a missing body, malformed JSON, or a count that is not a
    /// positive integer all fall back to [`DEFAULT_NUM_QUESTIONS`].
    pub fn from_body(body: &[u8]) -> Self {
        let Ok(value) = serde_json::from_slice::<Value>(body) else {
            if !body.is_empty() {
                tracing::debug!("Unparseable request body, using default question count");
            }
            return Self::default();
        };

        match value.get("numQuestions").and_then(coerce_count) {
            Some(num_questions) => Self { num_questions },
            None => {
                tracing::debug!(
                    "numQuestions missing or invalid ({:?}), using default",
                    value.get("numQuestions")
                );
                Self::default()
            }
        }
    }
}

fn coerce_count(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => match n.as_u64() {
            Some(n) => n,
            // Integral floats such as 3.0 or 1e1 count as whole numbers
            None => {
                let f = n.as_f64()?;
                if f.fract() != 0.0 || f < 1.0 || f > f64::from(u32::MAX) {
                    return None;
                }
                f as u64
            }
        },
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };

    u32::try_from(n).ok().filter(|n| *n >= 1)
}

/// Key of one of the four answer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::A => "A",
            OptionKey::B => "B",
            OptionKey::C => "C",
            OptionKey::D => "D",
        }
    }
}

/// The four answer texts of a question, keyed `A` to `D`. Any other key is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "UPPERCASE", deny_unknown_fields)]
pub struct QuizOptions {
    #[validate(custom(function = validate_not_blank))]
    pub a: String,
    #[validate(custom(function = validate_not_blank))]
    pub b: String,
    #[validate(custom(function = validate_not_blank))]
    pub c: String,
    #[validate(custom(function = validate_not_blank))]
    pub d: String,
}

impl QuizOptions {
    pub fn get(&self, key: OptionKey) -> &str {
        match key {
            OptionKey::A => &self.a,
            OptionKey::B => &self.b,
            OptionKey::C => &self.c,
            OptionKey::D => &self.d,
        }
    }
}

/// A single multiple-choice question as returned by the model and relayed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct QuizQuestion {
    pub id: i64,

    #[validate(custom(function = validate_not_blank))]
    pub question: String,

    #[validate(nested)]
    pub options: QuizOptions,

    pub answer: OptionKey,

    pub explanation: String,
}

/// Shape the model is asked to produce.
#[derive(Debug, Deserialize)]
pub struct QuizPayload {
    pub quiz: Vec<QuizQuestion>,
}

/// Success envelope. Failures are rendered by `AppError`.
#[derive(Debug, Serialize)]
pub struct QuizEnvelope {
    pub success: bool,
    pub quiz: Vec<QuizQuestion>,
}

impl QuizEnvelope {
    pub fn success(quiz: Vec<QuizQuestion>) -> Self {
        Self { success: true, quiz }
    }
}

fn validate_not_blank(text: &str) -> Result<(), validator::ValidationError> {
    if text.trim().is_empty() {
        return Err(validator::ValidationError::new("blank_text"));
    }
    Ok(())
}
