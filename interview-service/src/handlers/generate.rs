use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use service_core::middleware::REQUEST_ID_HEADER;

use crate::dtos::{AcknowledgeResponse, GenerateResponse};
use crate::error::InterviewError;
use crate::models::InterviewRequest;
use crate::services::metrics;
use crate::startup::AppState;

pub const GENERATE_PATH: &str = "/api/vapi/generate";

/// `POST /api/vapi/generate`
///
/// The body is read as JSON whatever its `Content-Type`; browsers send
/// `text/plain` to skip the preflight.
#[tracing::instrument(skip(state, headers, body))]
pub async fn generate_interview(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<GenerateResponse>, InterviewError> {
    let result = match serde_json::from_slice::<InterviewRequest>(&body) {
        Ok(request) => {
            let request_id = headers
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            state.generator.generate(request, request_id).await
        }
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable request body");
            Err(InterviewError::MalformedBody(e.to_string()))
        }
    };

    match result {
        Ok(questions) => Ok(Json(GenerateResponse::new(questions))),
        Err(e) => {
            metrics::record_generate_failure(e.kind());
            Err(e)
        }
    }
}

/// `GET /api/vapi/generate`: fixed acknowledgement, independent of any dependency.
pub async fn acknowledge() -> Json<AcknowledgeResponse> {
    Json(AcknowledgeResponse::default())
}

/// `OPTIONS /api/vapi/generate`: empty body with permissive CORS headers.
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization"),
        ],
    )
}
