//! Prompt builder for e-waste quizzes.
//!
//! The output schema is held as a structured value and the instruction text is
//! rendered around it, so both always describe the same option set.

use serde_json::{Value, json};

use crate::models::quiz::OptionKey;

/// Subjects the questions should cover.
pub const QUIZ_TOPICS: [&str; 4] = [
    "e-waste definition",
    "toxic components (Lead, Mercury)",
    "proper disposal methods (recycling)",
    "environmental impact",
];

/// Rendered prompt text plus the schema the provider should constrain its output to.
#[derive(Debug, Clone)]
pub struct QuizPrompt {
    pub text: String,
    pub schema: Value,
}

impl QuizPrompt {
    pub fn new(num_questions: u32) -> Self {
        let schema = quiz_schema();
        let text = render_prompt(num_questions, &schema);
        Self { text, schema }
    }
}

/// JSON Schema of the `{ "quiz": [...] }` object the model must return.
pub fn quiz_schema() -> Value {
    let keys: Vec<&str> = OptionKey::ALL.iter().map(|k| k.as_str()).collect();

    let option_properties: serde_json::Map<String, Value> = keys
        .iter()
        .map(|k| (k.to_string(), json!({ "type": "string" })))
        .collect();

    json!({
        "type": "object",
        "properties": {
            "quiz": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer" },
                        "question": { "type": "string" },
                        "options": {
                            "type": "object",
                            "properties": option_properties,
                            "required": keys,
                        },
                        "answer": {
                            "type": "string",
                            "enum": keys,
                            "description": format!(
                                "The correct option key, e.g., '{}' or '{}'",
                                keys[0], keys[1]
                            ),
                        },
                        "explanation": {
                            "type": "string",
                            "description": "A brief explanation of the correct answer.",
                        },
                    },
                    "required": ["id", "question", "options", "answer", "explanation"],
                },
            },
        },
        "required": ["quiz"],
    })
}

/// Renders the natural-language instructions followed by the schema.
pub fn render_prompt(num_questions: u32, schema: &Value) -> String {
    let keys: Vec<&str> = OptionKey::ALL.iter().map(|k| k.as_str()).collect();
    let schema_text = format!("{schema:#}");

    format!(
        "Generate a multiple-choice quiz about E-waste for a website.\n\
         The quiz must have exactly {num_questions} questions.\n\
         Each question MUST have {count} options ({options}) and a single correct answer.\n\
         The entire response MUST be a single, valid JSON object that strictly follows this JSON schema.\n\
         Focus the questions on topics like: {topics}.\n\
         \n\
         JSON Schema:\n\
         {schema_text}\n",
        count = number_word(keys.len()),
        options = keys.join(", "),
        topics = join_topics(&QUIZ_TOPICS),
    )
}

fn number_word(n: usize) -> String {
    match n {
        2 => "two".to_string(),
        3 => "three".to_string(),
        4 => "four".to_string(),
        5 => "five".to_string(),
        n => n.to_string(),
    }
}

fn join_topics(topics: &[&str]) -> String {
    match topics {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}
