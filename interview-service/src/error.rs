//! Errors of the generate endpoint and their wire representation.

use crate::dtos::ErrorResponse;
use crate::services::providers::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;
use thiserror::Error;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid AI response format";

#[derive(Debug, Error)]
pub enum InterviewError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("{0}")]
    MalformedBody(String),

    #[error("Invalid AI response format")]
    InvalidResponseFormat { raw: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Storage(#[from] AppError),
}

impl InterviewError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            InterviewError::MissingFields(_) => StatusCode::BAD_REQUEST,
            InterviewError::MalformedBody(_)
            | InterviewError::InvalidResponseFormat { .. }
            | InterviewError::Provider(_)
            | InterviewError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            InterviewError::MissingFields(_) => "missing_fields",
            InterviewError::MalformedBody(_) => "malformed_body",
            InterviewError::InvalidResponseFormat { .. } => "invalid_format",
            InterviewError::Provider(_) => "provider",
            InterviewError::Storage(_) => "storage",
        }
    }
}

impl IntoResponse for InterviewError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            InterviewError::MissingFields(_) => ErrorResponse::new(MISSING_FIELDS_MESSAGE),
            InterviewError::InvalidResponseFormat { raw } => {
                ErrorResponse::new(INVALID_FORMAT_MESSAGE).with_raw_response(raw)
            }
            other => {
                let message = other.to_string();
                if message.is_empty() {
                    ErrorResponse::new("An unknown error occurred")
                } else {
                    ErrorResponse::new(message)
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_fields_is_a_400_with_fixed_message() {
        let response =
            InterviewError::MissingFields(vec!["role".to_string()]).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Missing required fields");
        assert!(body.get("rawResponse").is_none());
    }

    #[tokio::test]
    async fn invalid_format_echoes_raw_text() {
        let response = InterviewError::InvalidResponseFormat {
            raw: "Sorry, I can't help".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid AI response format");
        assert_eq!(body["rawResponse"], "Sorry, I can't help");
    }

    #[tokio::test]
    async fn upstream_failures_surface_their_message() {
        let response = InterviewError::Provider(ProviderError::NetworkError(
            "connection reset".to_string(),
        ))
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Network error: connection reset");

        let response = InterviewError::Storage(AppError::DatabaseError(anyhow::anyhow!(
            "no primary"
        )))
        .into_response();
        let body = body_json(response).await;
        assert_eq!(body["error"], "Database error: no primary");
    }

    #[tokio::test]
    async fn empty_message_falls_back_to_generic_text() {
        let response = InterviewError::MalformedBody(String::new()).into_response();
        let body = body_json(response).await;
        assert_eq!(body["error"], "An unknown error occurred");
    }
}
