use log::debug;
use reqwest::Client;

use crate::error::{AuditError, Result};
use crate::llm::types::{ChatMessage, ChatRequest, ChatResponse};

const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// The completion-service seam.
///
/// The pipeline only needs one synchronous-looking operation: send a prompt,
/// get a text completion back. Model selection, token limits, and transport
/// retry policy all live behind this trait.
pub trait CompletionBackend {
    fn complete(
        &self,
        model: &str,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Client for Groq's OpenAI-compatible chat completions endpoint.
///
/// Single-shot: no retries, no streaming. Any transport or protocol failure
/// surfaces as [`AuditError::CompletionUnavailable`].
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GroqClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: GROQ_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different OpenAI-compatible host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl CompletionBackend for GroqClient {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let payload = ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage::user(prompt)],
        };

        debug!("Requesting completion from {} (model {})", url, model);

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AuditError::CompletionUnavailable(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let err_text = res.text().await.unwrap_or_default();
            return Err(AuditError::CompletionUnavailable(format!(
                "completion endpoint returned status {}: {}",
                status, err_text
            )));
        }

        let body: ChatResponse = res
            .json()
            .await
            .map_err(|e| AuditError::CompletionUnavailable(e.to_string()))?;

        let content = body
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                AuditError::CompletionUnavailable("response contained no choices".to_string())
            })?;

        if content.trim().is_empty() {
            return Err(AuditError::CompletionUnavailable(
                "completion was empty".to_string(),
            ));
        }

        Ok(content)
    }
}
