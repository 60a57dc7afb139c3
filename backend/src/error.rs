// src/error.rs

use std::time::Duration;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::{models::quiz::GENERIC_FAILURE_MESSAGE, services::providers::ProviderError};

/// Global Application Error Enum.
/// Every variant is a quiz-generation failure: the cause is logged, the client
/// only ever receives the generic failure envelope.
#[derive(Debug, Error)]
pub enum AppError {
    /// Provider call failed (network, quota, API error, filtered content).
    #[error("upstream provider failed: {0}")]
    Upstream(#[from] ProviderError),

    /// Provider did not answer within the configured bound.
    #[error("upstream provider timed out after {0:?}")]
    Timeout(Duration),

    /// Provider answered, but the text is not a conformant quiz.
    #[error("malformed quiz: {0}")]
    MalformedQuiz(String),
}

/// Converts the error into the `{ success: false, message }` envelope with status 500.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Error generating quiz: {}", self);

        let body = Json(json!({
            "success": false,
            "message": GENERIC_FAILURE_MESSAGE,
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedQuiz(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::MalformedQuiz(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_detail_stays_out_of_the_response() {
        let err = AppError::from(ProviderError::Api {
            status: 403,
            body: "API key not valid".to_string(),
        });
        assert!(err.to_string().contains("API key not valid"));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
