//! Interview generation workflow.
//!
//! Validate, prompt the model, parse its answer, persist the record. Every
//! step is terminal on failure and nothing is retried. A failed parse never
//! reaches the store; a failed store write drops the generated questions.

use crate::config::HandlerProfile;
use crate::error::InterviewError;
use crate::models::{InterviewRecord, InterviewRequest};
use crate::services::covers::pick_cover;
use crate::services::metrics;
use crate::services::prompt::{build_prompt, questions_schema};
use crate::services::providers::{GenerationParams, TextProvider};
use crate::services::questions::parse_questions;
use crate::services::store::InterviewStore;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct InterviewGenerator {
    provider: Arc<dyn TextProvider>,
    store: Arc<dyn InterviewStore>,
    profile: HandlerProfile,
    cover_images: Arc<[String]>,
}

impl InterviewGenerator {
    pub fn new(
        provider: Arc<dyn TextProvider>,
        store: Arc<dyn InterviewStore>,
        profile: HandlerProfile,
        cover_images: Vec<String>,
    ) -> Self {
        Self {
            provider,
            store,
            profile,
            cover_images: cover_images.into(),
        }
    }

    pub fn profile(&self) -> HandlerProfile {
        self.profile
    }

    /// Run one generation request end to end and return the stored questions.
    #[tracing::instrument(
        skip(self, request),
        fields(provider = self.provider.name(), store = self.store.name())
    )]
    pub async fn generate(
        &self,
        request: InterviewRequest,
        request_id: Option<String>,
    ) -> Result<Vec<String>, InterviewError> {
        if self.profile.validate_request {
            let missing = request.missing_fields();
            if !missing.is_empty() {
                tracing::warn!(missing = ?missing, "Rejecting request with missing fields");
                return Err(InterviewError::MissingFields(missing));
            }
        }

        let params = request.into_params();
        tracing::info!(
            role = %params.role,
            level = %params.level,
            interview_type = %params.interview_type,
            techstack = %params.techstack,
            amount = %params.amount,
            user_id = %params.userid,
            "Incoming interview generation request"
        );

        let prompt = build_prompt(&params);
        let generation_params = GenerationParams {
            output_schema: Some(questions_schema()),
            request_id,
            ..Default::default()
        };

        let provider_name = self.provider.name();
        let model = self.provider.model().to_string();
        let start = Instant::now();
        let response = self
            .provider
            .generate(&prompt, &generation_params)
            .await
            .map_err(|e| {
                metrics::record_provider_error(provider_name, e.kind());
                tracing::error!(error = %e, "Question generation failed");
                e
            })?;
        metrics::record_provider_latency(provider_name, &model, start.elapsed().as_secs_f64());
        metrics::record_tokens(&model, response.input_tokens, response.output_tokens);

        tracing::debug!(
            raw = %response.text,
            finish_reason = response.finish_reason.as_str(),
            "Raw model response"
        );

        let questions = match parse_questions(&response.text) {
            Some(questions) => questions,
            None => {
                tracing::warn!(raw = %response.text, "Model response is not a JSON array of strings");
                return Err(InterviewError::InvalidResponseFormat { raw: response.text });
            }
        };

        tracing::info!(count = questions.len(), "Parsed generated questions");

        let cover_image = if self.profile.attach_cover_image {
            pick_cover(&self.cover_images)
        } else {
            None
        };

        let record = InterviewRecord::new(params, questions, cover_image, Utc::now());

        self.store.insert(&record).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to store generated interview");
            e
        })?;

        metrics::record_interview_generated(provider_name, &model);
        tracing::info!(user_id = %record.user_id, "Interview stored");

        Ok(record.questions)
    }
}
