use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use sightline_core::error::AppError;

use crate::dto::ErrorResponse;

/// Which endpoint an error came from; decides the provider-failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AltText,
    Summary,
}

impl Operation {
    fn provider_failure(self) -> &'static str {
        match self {
            Operation::AltText => "Failed to generate alt text",
            Operation::Summary => "Failed to summarize HTML",
        }
    }
}

/// Wrapper so we can implement `IntoResponse` for `AppError`.
#[derive(Debug)]
pub struct ApiError {
    pub operation: Operation,
    pub source: AppError,
}

impl ApiError {
    pub fn new(operation: Operation, source: AppError) -> Self {
        Self { operation, source }
    }

    fn status_and_body(&self) -> (StatusCode, ErrorResponse) {
        match &self.source {
            AppError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message.clone(),
                    details: None,
                },
            ),
            AppError::Fetch(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Failed to retrieve HTML content".to_string(),
                    details: None,
                },
            ),
            AppError::LlmProvider { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: self.operation.provider_failure().to_string(),
                    details: Some(message.clone()),
                },
            ),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "An unexpected error occurred".to_string(),
                    details: Some(other.to_string()),
                },
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();

        if status.is_server_error() {
            tracing::error!(operation = ?self.operation, "{}", self.source);
        } else {
            tracing::debug!(operation = ?self.operation, "{}", self.source);
        }

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_has_no_details() {
        let err = ApiError::new(
            Operation::AltText,
            AppError::Validation("Image URL is required".into()),
        );
        let (status, body) = err.status_and_body();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Image URL is required");
        assert!(body.details.is_none());
    }

    #[test]
    fn test_provider_message_depends_on_operation() {
        let alt = ApiError::new(Operation::AltText, AppError::llm("bad key"));
        let summary = ApiError::new(Operation::Summary, AppError::llm("bad key"));

        assert_eq!(alt.status_and_body().1.error, "Failed to generate alt text");
        assert_eq!(summary.status_and_body().1.error, "Failed to summarize HTML");
        assert_eq!(summary.status_and_body().1.details.as_deref(), Some("bad key"));
    }

    #[test]
    fn test_other_errors_are_unexpected() {
        let err = ApiError::new(
            Operation::Summary,
            AppError::Extraction("parser panicked".into()),
        );
        let (status, body) = err.status_and_body();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "An unexpected error occurred");
        assert_eq!(body.details.as_deref(), Some("Extraction error: parser panicked"));
    }
}
