// src/services/quiz.rs

use std::{sync::Arc, time::Duration};

use validator::Validate;

use crate::{
    error::AppError,
    models::quiz::{QuizPayload, QuizQuestion},
    services::{prompt::QuizPrompt, providers::QuizProvider},
};

/// Generates quizzes by prompting a provider and normalizing what comes back.
#[derive(Clone)]
pub struct QuizService {
    provider: Arc<dyn QuizProvider>,
    timeout: Duration,
}

impl QuizService {
    pub fn new(provider: Arc<dyn QuizProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Produces exactly `num_questions` validated questions, or an error.
    ///
    /// * Renders the prompt and schema for the requested count.
    /// * Awaits the provider, bounded by the configured timeout.
    /// * Parses and validates the returned text as a whole; nothing is returned on partial success.
    pub async fn generate(&self, num_questions: u32) -> Result<Vec<QuizQuestion>, AppError> {
        let prompt = QuizPrompt::new(num_questions);

        tracing::info!(
            provider = self.provider.name(),
            num_questions,
            "Generating quiz"
        );

        let text = tokio::time::timeout(self.timeout, self.provider.generate(&prompt.text, &prompt.schema))
            .await
            .map_err(|_| AppError::Timeout(self.timeout))??;

        parse_quiz(&text, num_questions)
    }
}

/// Parses provider output into questions.
///
/// Fails if the text is not JSON, does not match the quiz shape, has a blank
/// question or option, or does not hold exactly `expected` questions.
pub fn parse_quiz(text: &str, expected: u32) -> Result<Vec<QuizQuestion>, AppError> {
    let payload: QuizPayload = serde_json::from_str(text.trim())?;

    for question in &payload.quiz {
        question.validate()?;
    }

    if payload.quiz.len() != expected as usize {
        return Err(AppError::MalformedQuiz(format!(
            "expected {} questions, got {}",
            expected,
            payload.quiz.len()
        )));
    }

    Ok(payload.quiz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::quiz::OptionKey,
        services::providers::ProviderError,
    };
    use async_trait::async_trait;
    use serde_json::{Value, json};

    fn sample_quiz(n: usize) -> Value {
        let questions: Vec<Value> = (1..=n)
            .map(|i| {
                json!({
                    "id": i,
                    "question": format!("Question {} about e-waste?", i),
                    "options": { "A": "Lead", "B": "Mercury", "C": "Cadmium", "D": "All of these" },
                    "answer": "D",
                    "explanation": "All three are toxic components found in electronics."
                })
            })
            .collect();
        json!({ "quiz": questions })
    }

    struct FixedProvider(String);

    #[async_trait]
    impl QuizProvider for FixedProvider {
        async fn generate(&self, _prompt: &str, _schema: &Value) -> Result<String, ProviderError> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct SlowProvider;

    #[async_trait]
    impl QuizProvider for SlowProvider {
        async fn generate(&self, _prompt: &str, _schema: &Value) -> Result<String, ProviderError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(String::new())
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    struct RecordingProvider {
        prompts: std::sync::Mutex<Vec<String>>,
    }

    #[async_trait]
    impl QuizProvider for RecordingProvider {
        async fn generate(&self, prompt: &str, schema: &Value) -> Result<String, ProviderError> {
            assert_eq!(schema["required"], json!(["quiz"]));
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(sample_quiz(2).to_string())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    #[test]
    fn parses_well_formed_quiz() {
        let quiz = parse_quiz(&sample_quiz(3).to_string(), 3).unwrap();
        assert_eq!(quiz.len(), 3);
        assert_eq!(quiz[0].answer, OptionKey::D);
        assert_eq!(quiz[2].id, 3);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let text = format!("\n  {}  \n", sample_quiz(1));
        assert_eq!(parse_quiz(&text, 1).unwrap().len(), 1);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = parse_quiz("{\"quiz\": [", 3).unwrap_err();
        assert!(matches!(err, AppError::MalformedQuiz(_)));
    }

    #[test]
    fn missing_quiz_field_is_rejected() {
        let err = parse_quiz(r#"{"questions": []}"#, 0).unwrap_err();
        assert!(matches!(err, AppError::MalformedQuiz(_)));
    }

    #[test]
    fn wrong_count_is_rejected() {
        let err = parse_quiz(&sample_quiz(4).to_string(), 5).unwrap_err();
        assert!(matches!(err, AppError::MalformedQuiz(_)));
    }

    #[test]
    fn invalid_answer_key_is_rejected() {
        let mut quiz = sample_quiz(2);
        quiz["quiz"][1]["answer"] = json!("E");
        assert!(parse_quiz(&quiz.to_string(), 2).is_err());
    }

    #[test]
    fn blank_option_is_rejected() {
        let mut quiz = sample_quiz(2);
        quiz["quiz"][0]["options"]["C"] = json!("");
        assert!(matches!(
            parse_quiz(&quiz.to_string(), 2).unwrap_err(),
            AppError::MalformedQuiz(_)
        ));
    }

    #[tokio::test]
    async fn service_passes_rendered_prompt_to_provider() {
        let provider = Arc::new(RecordingProvider {
            prompts: std::sync::Mutex::new(Vec::new()),
        });
        let service = QuizService::new(provider.clone(), Duration::from_secs(5));

        let quiz = service.generate(2).await.unwrap();
        assert_eq!(quiz.len(), 2);

        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("exactly 2 questions"));
    }

    #[tokio::test]
    async fn service_rejects_provider_text_that_is_not_json() {
        let service = QuizService::new(
            Arc::new(FixedProvider("Sure! Here is your quiz".to_string())),
            Duration::from_secs(5),
        );
        assert!(matches!(service.generate(3).await, Err(AppError::MalformedQuiz(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_times_out() {
        let service = QuizService::new(Arc::new(SlowProvider), Duration::from_secs(1));
        assert!(matches!(service.generate(5).await, Err(AppError::Timeout(_))));
    }
}
