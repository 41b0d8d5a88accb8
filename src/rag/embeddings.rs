//! Embedding provider clients.
//!
//! Chunk and query embedding behind a capability trait, with OpenAI and
//! Ollama implementations selected by configuration. Each client reports a
//! `space_id` (provider + model) that the vector index records at build time,
//! so queries are provably embedded in the same space as the chunks they are
//! compared against.

use crate::types::{AppError, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::embeddings::{CreateEmbeddingRequestArgs, EmbeddingInput},
};
use async_trait::async_trait;
use ollama_rs::{
    Ollama,
    generation::embeddings::request::{EmbeddingsInput, GenerateEmbeddingsRequest},
};
use std::future::Future;
use std::time::Duration;

/// Text embedding capability.
///
/// `embed_batch` preserves order: `result[i]` is the embedding of `texts[i]`,
/// and the result has exactly as many vectors as there were inputs.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Embed a single text (used for queries).
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts in input order (used for chunks).
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Identifier of the embedding space these vectors live in.
    fn space_id(&self) -> &str;
}

/// Embedding provider selection, mirroring the chat `Provider` enum.
#[derive(Debug, Clone)]
pub enum EmbeddingProvider {
    OpenAI {
        api_key: String,
        api_base: String,
        model: String,
    },
    Ollama {
        base_url: String,
        model: String,
    },
}

impl EmbeddingProvider {
    /// Create a client for this provider. Every remote call the client makes
    /// is bounded by `timeout`.
    pub fn create_client(&self, timeout: Duration) -> Box<dyn EmbeddingClient> {
        match self {
            EmbeddingProvider::OpenAI {
                api_key,
                api_base,
                model,
            } => Box::new(OpenAIEmbeddingClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
                timeout,
            )),
            EmbeddingProvider::Ollama { base_url, model } => Box::new(
                OllamaEmbeddingClient::new(base_url.clone(), model.clone(), timeout),
            ),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EmbeddingProvider::OpenAI { .. } => "OpenAI",
            EmbeddingProvider::Ollama { .. } => "Ollama",
        }
    }
}

async fn with_timeout<T, F>(timeout: Duration, what: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| AppError::ProviderTimeout(format!("{} after {:?}", what, timeout)))?
}

// ============= OpenAI =============

pub struct OpenAIEmbeddingClient {
    client: Client<OpenAIConfig>,
    model: String,
    space_id: String,
    timeout: Duration,
}

impl OpenAIEmbeddingClient {
    pub fn new(api_key: String, api_base: String, model: String, timeout: Duration) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);

        let space_id = format!("openai/{}", model);
        Self {
            client: Client::with_config(config),
            model,
            space_id,
            timeout,
        }
    }

    async fn request(&self, input: EmbeddingInput, count: usize) -> Result<Vec<Vec<f32>>> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.model)
            .input(input)
            .build()
            .map_err(|e| AppError::Embedding(format!("Failed to build request: {}", e)))?;

        let response = with_timeout(self.timeout, "OpenAI embedding request", async {
            self.client
                .embeddings()
                .create(request)
                .await
                .map_err(|e| AppError::Embedding(format!("OpenAI API error: {}", e)))
        })
        .await?;

        if response.data.len() != count {
            return Err(AppError::Embedding(format!(
                "OpenAI returned {} embeddings for {} inputs",
                response.data.len(),
                count
            )));
        }

        // The API is allowed to return entries out of order; the index field
        // ties each embedding back to its input position.
        let mut data = response.data;
        data.sort_by_key(|e| e.index);
        Ok(data.into_iter().map(|e| e.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingClient for OpenAIEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self
            .request(EmbeddingInput::String(text.to_string()), 1)
            .await?;
        vectors
            .pop()
            .ok_or_else(|| AppError::Embedding("Empty embedding response".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(EmbeddingInput::StringArray(texts.to_vec()), texts.len())
            .await
    }

    fn space_id(&self) -> &str {
        &self.space_id
    }
}

// ============= Ollama =============

pub struct OllamaEmbeddingClient {
    client: Ollama,
    model: String,
    space_id: String,
    timeout: Duration,
}

impl OllamaEmbeddingClient {
    pub fn new(base_url: String, model: String, timeout: Duration) -> Self {
        let (host, port) = crate::llm::parse_base_url(&base_url);
        let space_id = format!("ollama/{}", model);
        Self {
            client: Ollama::new(host, port),
            model,
            space_id,
            timeout,
        }
    }

    async fn request(&self, input: EmbeddingsInput, count: usize) -> Result<Vec<Vec<f32>>> {
        let request = GenerateEmbeddingsRequest::new(self.model.clone(), input);

        let response = with_timeout(self.timeout, "Ollama embedding request", async {
            self.client
                .generate_embeddings(request)
                .await
                .map_err(|e| AppError::Embedding(format!("Ollama error: {}", e)))
        })
        .await?;

        if response.embeddings.len() != count {
            return Err(AppError::Embedding(format!(
                "Ollama returned {} embeddings for {} inputs",
                response.embeddings.len(),
                count
            )));
        }

        Ok(response.embeddings)
    }
}

#[async_trait]
impl EmbeddingClient for OllamaEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self
            .request(EmbeddingsInput::Single(text.to_string()), 1)
            .await?;
        vectors
            .pop()
            .ok_or_else(|| AppError::Embedding("Empty embedding response".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(EmbeddingsInput::Multiple(texts.to_vec()), texts.len())
            .await
    }

    fn space_id(&self) -> &str {
        &self.space_id
    }
}
