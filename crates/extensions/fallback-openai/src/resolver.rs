//! Chat-completions backed [`FallbackResolver`].

use std::time::Duration;

use async_trait::async_trait;
use easyapply_protocols::{FallbackError, FallbackResolver};
use tracing::debug;

use crate::api::{ChatMessage, ChatRequest, ChatResponse};

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ANSWER_TOKENS: u32 = 32;

const SYSTEM_PROMPT: &str = "You fill in job application forms. \
Reply with only the value to type into the field: no explanation, no quotes, no units \
unless the question asks for them. Numeric fields take a bare number.";

/// Fallback resolver speaking the OpenAI chat-completions protocol.
pub struct OpenAiFallback {
    api_key: String,
    api_url: String,
    model: String,
    /// Applicant facts prepended to every question.
    context: Option<String>,
    client: reqwest::Client,
}

impl OpenAiFallback {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            context: None,
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Use a custom endpoint (for OpenAI-compatible APIs).
    pub fn with_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Applicant summary the model may draw answers from.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    fn build_request(&self, label: &str, input_type: &str) -> ChatRequest {
        let mut question = String::new();
        if let Some(context) = &self.context {
            question.push_str("About the applicant: ");
            question.push_str(context);
            question.push('\n');
        }
        question.push_str(&format!("Question: {label}\nInput type: {input_type}"));

        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(question)],
            max_tokens: Some(MAX_ANSWER_TOKENS),
            temperature: Some(0.0),
        }
    }
}

#[async_trait]
impl FallbackResolver for OpenAiFallback {
    async fn answer(&self, label: &str, input_type: &str) -> Result<String, FallbackError> {
        let request = self.build_request(label, input_type);

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| FallbackError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(FallbackError::Api { status, message });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| FallbackError::Request(e.to_string()))?;

        let answer = body.first_answer().ok_or(FallbackError::EmptyAnswer)?;
        debug!(label, answer = %answer, "Fallback answered");
        Ok(answer)
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
