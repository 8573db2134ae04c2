use serde::{Deserialize, Serialize};

/// Successful generation.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub questions: Vec<String>,
}

impl GenerateResponse {
    pub fn new(questions: Vec<String>) -> Self {
        Self {
            success: true,
            questions,
        }
    }
}

/// Fixed body of `GET /api/vapi/generate`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AcknowledgeResponse {
    pub success: bool,
    pub data: String,
}

impl Default for AcknowledgeResponse {
    fn default() -> Self {
        Self {
            success: true,
            data: "Thank you!".to_string(),
        }
    }
}

/// Failure payload shared by every error path of the endpoint.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            raw_response: None,
        }
    }

    pub fn with_raw_response(mut self, raw: impl Into<String>) -> Self {
        self.raw_response = Some(raw.into());
        self
    }
}
