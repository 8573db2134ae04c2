//! Interview request and persisted interview record.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Number of questions requested; callers send either a JSON number
/// (integer or float, e.g. `5` or `5.0`) or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(serde_json::Number),
    Text(String),
}

impl Amount {
    /// Zero and blank strings count as "not provided".
    pub fn is_present(&self) -> bool {
        match self {
            Amount::Number(n) => n.as_f64() != Some(0.0),
            Amount::Text(s) => !s.is_empty(),
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Number(0.into())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) => write!(f, "{}", n),
            Amount::Text(s) => f.write_str(s),
        }
    }
}

/// Body of `POST /api/vapi/generate`.
///
/// Every field is optional on the wire so an incomplete body is reported as
/// missing fields instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct InterviewRequest {
    #[serde(rename = "type")]
    #[validate(required, length(min = 1))]
    pub interview_type: Option<String>,

    #[validate(required, length(min = 1))]
    pub role: Option<String>,

    #[validate(required, length(min = 1))]
    pub level: Option<String>,

    #[validate(required, length(min = 1))]
    pub techstack: Option<String>,

    #[validate(required)]
    pub amount: Option<Amount>,

    #[validate(required, length(min = 1))]
    pub userid: Option<String>,
}

impl InterviewRequest {
    /// Names of fields that are absent or empty, sorted.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing: Vec<String> = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .field_errors()
                .keys()
                .map(|field| field.to_string())
                .collect(),
        };

        // `required` only checks presence; a zero count is still missing
        if matches!(&self.amount, Some(amount) if !amount.is_present()) {
            missing.push("amount".to_string());
        }

        missing.sort();
        missing.dedup();
        missing
    }

    /// Resolve into concrete parameters, substituting empty values for
    /// anything absent.
    pub fn into_params(self) -> InterviewParams {
        InterviewParams {
            interview_type: self.interview_type.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
            level: self.level.unwrap_or_default(),
            techstack: self.techstack.unwrap_or_default(),
            amount: self.amount.unwrap_or_default(),
            userid: self.userid.unwrap_or_default(),
        }
    }
}

/// Fully resolved generation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewParams {
    pub interview_type: String,
    pub role: String,
    pub level: String,
    pub techstack: String,
    pub amount: Amount,
    pub userid: String,
}

/// Split a comma-separated tech stack into trimmed names, one per comma
/// separated entry, in order. An empty input yields an empty list.
pub fn split_techstack(techstack: &str) -> Vec<String> {
    if techstack.is_empty() {
        return Vec::new();
    }

    techstack
        .split(',')
        .map(|tech| tech.trim().to_string())
        .collect()
}

/// The document written to the `interviews` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRecord {
    pub role: String,

    #[serde(rename = "type")]
    pub interview_type: String,

    pub level: String,

    pub techstack: Vec<String>,

    pub amount: Amount,

    pub questions: Vec<String>,

    pub user_id: String,

    /// Always true at creation.
    pub finalized: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    /// ISO-8601 UTC, millisecond precision.
    pub created_at: String,
}

impl InterviewRecord {
    /// Create a new record from resolved parameters and generated questions.
    pub fn new(
        params: InterviewParams,
        questions: Vec<String>,
        cover_image: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            techstack: split_techstack(&params.techstack),
            role: params.role,
            interview_type: params.interview_type,
            level: params.level,
            amount: params.amount,
            questions,
            user_id: params.userid,
            finalized: true,
            cover_image,
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
