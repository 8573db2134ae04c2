//! Mock provider implementation for testing and offline runs.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

const CANNED_QUESTIONS: &str = r#"["Tell me about a project you are proud of.","How do you approach debugging a production issue?","Describe a time you disagreed with a teammate and how you resolved it."]"#;

enum Outcome {
    Respond(String),
    Fail(String),
}

/// Scripted text provider.
///
/// Records every prompt it receives so callers can tell whether the model
/// was reached at all.
pub struct MockTextProvider {
    outcome: Outcome,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    /// Always answer with a canned three-question list.
    pub fn new() -> Self {
        Self::with_response(CANNED_QUESTIONS)
    }

    /// Always answer with `text`, verbatim.
    pub fn with_response(text: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Respond(text.into()))
    }

    /// Always fail with a network error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Fail(message.into()))
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts().len()
    }
}

impl Default for MockTextProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.to_string());

        match &self.outcome {
            Outcome::Respond(text) => Ok(ProviderResponse {
                text: text.clone(),
                input_tokens: prompt.len() as i32 / 4,
                output_tokens: text.len() as i32 / 4,
                finish_reason: FinishReason::Complete,
            }),
            Outcome::Fail(message) => Err(ProviderError::NetworkError(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_prompts_and_returns_script() {
        let provider = MockTextProvider::with_response("[\"Q1\"]");

        let response = provider
            .generate("first", &GenerationParams::default())
            .await
            .unwrap();

        assert_eq!(response.text, "[\"Q1\"]");
        assert_eq!(provider.prompts(), vec!["first".to_string()]);
    }

    #[tokio::test]
    async fn failing_provider_still_counts_the_call() {
        let provider = MockTextProvider::failing("boom");

        let err = provider
            .generate("p", &GenerationParams::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Network error: boom");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn canned_response_is_a_json_array() {
        let provider = MockTextProvider::new();
        let response = provider
            .generate("p", &GenerationParams::default())
            .await
            .unwrap();

        let questions: Vec<String> = serde_json::from_str(&response.text).unwrap();
        assert_eq!(questions.len(), 3);
    }
}
