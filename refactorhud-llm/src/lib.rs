//! refactorhud LLM - Remote Completion Integration
//!
//! Everything that talks to the chat-completion service:
//! - [`OpenRouterClient`], the HTTP client behind [`CompletionProvider`]
//! - Hybrid-track candidate requests ([`SuggestionProvider`], [`HybridSuggester`])
//! - The complexity fallback used when the local analyzer fails
//!   ([`ComplexityEstimator`], [`ComplexityFallback`])
//! - Prompt template rendering and reply cleanup shared by both

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod openrouter;
pub mod prompt;
pub mod response;
pub mod suggestions;
pub mod complexity;

pub use openrouter::OpenRouterClient;
pub use prompt::PromptTemplate;
pub use response::{clean_json_output, extract_json_object, parse_final_candidates};
pub use suggestions::{HybridSuggester, SuggestionProvider};
pub use complexity::{ComplexityEstimator, ComplexityFallback};

/// Result type for LLM operations
pub type LlmResult<T> = std::result::Result<T, LlmError>;

/// Error types for LLM operations
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered, but not with anything usable
    #[error("Model inference error: {0}")]
    Inference(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One system + user exchange with a chat-completion model
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Model identifier, for logs
    fn model(&self) -> &str;

    /// Send one exchange and return the first choice's text
    async fn complete(&self, system_prompt: &str, user_content: &str) -> LlmResult<String>;
}

#[async_trait::async_trait]
impl<T: CompletionProvider + ?Sized> CompletionProvider for std::sync::Arc<T> {
    fn model(&self) -> &str {
        (**self).model()
    }

    async fn complete(&self, system_prompt: &str, user_content: &str) -> LlmResult<String> {
        (**self).complete(system_prompt, user_content).await
    }
}
