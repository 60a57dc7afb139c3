// src/handlers/quiz.rs

use axum::{Json, body::Bytes, extract::State, response::IntoResponse};

use crate::{
    error::AppError,
    models::quiz::{QuizEnvelope, QuizRequest},
    services::QuizService,
};

/// Generates an e-waste quiz.
///
/// * Reads `numQuestions` leniently; anything unusable becomes the default of 5.
/// * Asks the provider for a quiz and validates the whole result.
/// * Returns `{ success: true, quiz }`, or a generic 500 envelope on any failure.
pub async fn generate_quiz(
    State(service): State<QuizService>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let req = QuizRequest::from_body(&body);

    let quiz = service.generate(req.num_questions).await?;

    tracing::info!("Generated quiz with {} questions", quiz.len());

    Ok(Json(QuizEnvelope::success(quiz)))
}
