//! OpenRouter Chat-Completions Integration
//!
//! Thin client for an OpenAI-compatible `chat/completions` endpoint. Used for
//! both the hybrid-track candidate request and the complexity fallback, each
//! with its own model.

use std::time::Duration;

use crate::{CompletionProvider, LlmError, LlmResult};
use refactorhud_core::LlmSettings;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Request structure for the chat-completions API
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response structure from the chat-completions API
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageResponse,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions client bound to one model
#[derive(Clone)]
pub struct OpenRouterClient {
    api_url: String,
    model: String,
    api_key: Option<String>,
    client: Client,
}

impl OpenRouterClient {
    /// Create a client; requests fail with a configuration error while `api_key` is `None`
    pub fn new(api_url: impl Into<String>, model: impl Into<String>, api_key: Option<String>, timeout: Duration) -> LlmResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_url: api_url.into(),
            model: model.into(),
            api_key,
            client,
        })
    }

    /// Client for `model`, reading the bearer token from the configured environment variable
    pub fn from_settings(settings: &LlmSettings, model: &str) -> LlmResult<Self> {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());

        if api_key.is_none() {
            warn!("{} is not set; remote requests for {} will be skipped", settings.api_key_env, model);
        }

        Self::new(
            settings.api_url.clone(),
            model,
            api_key,
            Duration::from_secs(settings.timeout_secs),
        )
    }
}

#[async_trait::async_trait]
impl CompletionProvider for OpenRouterClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, system_prompt: &str, user_content: &str) -> LlmResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::Config("no API key configured".to_string()))?;

        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: system_prompt },
                ChatMessage { role: "user", content: user_content },
            ],
        };

        debug!("Requesting completion from {} ({} bytes of user content)", self.model, user_content.len());

        let response = self.client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Inference(format!("Completion API error ({status}): {error_text}")));
        }

        let chat_response: ChatResponse = response.json().await?;

        // Extract text from first choice
        chat_response.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::Inference(format!("No choices in response from {}", self.model)))
    }
}
