//! LLM client abstraction and provider selection.

use crate::types::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Generic LLM client trait for provider abstraction.
///
/// All chat providers implement this trait, allowing the conversation engine
/// to swap providers without code changes.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion from a single prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate with a full conversation as (role, content) pairs.
    ///
    /// Roles are `"system"`, `"user"` and `"assistant"`; unknown roles are
    /// treated as user messages.
    async fn generate_with_history(&self, messages: &[(String, String)]) -> Result<String>;

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;
}

/// Provider enum for runtime selection.
#[derive(Debug, Clone)]
pub enum Provider {
    /// OpenAI API provider (including Azure OpenAI and compatible APIs).
    OpenAI {
        api_key: String,
        api_base: String,
        model: String,
        temperature: Option<f32>,
    },

    /// Ollama local LLM provider.
    Ollama { base_url: String, model: String },
}

impl Provider {
    /// Create a client instance for this provider. Every remote call the
    /// client makes is bounded by `timeout`.
    pub fn create_client(&self, timeout: Duration) -> Box<dyn LLMClient> {
        match self {
            Provider::OpenAI {
                api_key,
                api_base,
                model,
                temperature,
            } => Box::new(super::openai::OpenAIClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
                *temperature,
                timeout,
            )),

            Provider::Ollama { base_url, model } => Box::new(super::ollama::OllamaClient::new(
                base_url.clone(),
                model.clone(),
                timeout,
            )),
        }
    }

    /// Get a human-readable name for this provider.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI { .. } => "OpenAI",
            Provider::Ollama { .. } => "Ollama",
        }
    }
}
