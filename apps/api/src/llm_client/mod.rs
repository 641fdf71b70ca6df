//! LLM Client — the single point of entry for all chat-completion calls.
//!
//! Every remote provider speaks the OpenAI-compatible chat completions API:
//! `{model, messages, temperature, max_tokens}` with a bearer token, answer
//! read from `choices[0].message.content`. No other module may issue these
//! requests directly; everything goes through a `ChatProvider`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::ProviderSettings;
use crate::models::message::Message;

pub mod chain;
pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("No API key configured for provider '{0}'")]
    MissingApiKey(String),
}

impl LlmError {
    /// HTTP status reported by the provider, when the failure came with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True only for HTTP 402: the provider's quota or billing is exhausted.
    pub fn is_payment_required(&self) -> bool {
        self.status() == Some(StatusCode::PAYMENT_REQUIRED.as_u16())
    }
}

/// Sampling parameters sent with every completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A remote text-generation service. Implementations make exactly one
/// attempt per call; fallback policy lives in `chain`.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(
        &self,
        messages: &[Message],
        params: CompletionParams,
    ) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the text of the first choice, ignoring blank content.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// HTTP client for one OpenAI-compatible provider.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    settings: ProviderSettings,
}

impl LlmClient {
    pub fn new(settings: ProviderSettings, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            settings,
        }
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Makes a single call to the provider, returning the full response object.
    pub async fn call(
        &self,
        messages: &[Message],
        params: CompletionParams,
    ) -> Result<ChatResponse, LlmError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::MissingApiKey(self.settings.name.clone()))?;

        let request_body = ChatRequest {
            model: &self.settings.model,
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .client
            .post(&self.settings.api_url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let chat_response: ChatResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "{} call succeeded: prompt_tokens={}, completion_tokens={}",
                self.settings.name, usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl ChatProvider for LlmClient {
    fn name(&self) -> &str {
        &self.settings.name
    }

    async fn complete(
        &self,
        messages: &[Message],
        params: CompletionParams,
    ) -> Result<String, LlmError> {
        let response = self.call(messages, params).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}
