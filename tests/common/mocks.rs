//! Mock implementations for testing.
//!
//! Deterministic embedding and LLM stubs shared across test files, so
//! pipeline tests run without any network dependencies.

#![allow(dead_code)]

use async_trait::async_trait;
use docchat::llm::LLMClient;
use docchat::rag::chunker::TextChunker;
use docchat::rag::embeddings::EmbeddingClient;
use docchat::types::{AppError, Result};
use docchat::{AppState, Config, ConversationEngine};
use docchat::config::{LLMConfig, RAGConfig, ServerConfig};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const STUB_DIMENSIONS: usize = 16;

/// Deterministic bag-of-words embedder.
///
/// Each lowercased word is hashed into one of a few fixed buckets, so texts
/// sharing words get similar vectors and retrieval behaves meaningfully
/// without a real model.
pub struct StubEmbedder;

impl StubEmbedder {
    pub fn vector_for(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; STUB_DIMENSIONS];
        for word in text.to_lowercase().split_whitespace() {
            let word = word.trim_matches(|c: char| !c.is_alphanumeric());
            if word.is_empty() {
                continue;
            }
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            vector[(hasher.finish() as usize) % STUB_DIMENSIONS] += 1.0;
        }
        // Leave the all-zeros case scoreable
        if vector.iter().all(|v| *v == 0.0) {
            vector[0] = 1.0;
        }
        vector
    }
}

#[async_trait]
impl EmbeddingClient for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(Self::vector_for(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::vector_for(t)).collect())
    }

    fn space_id(&self) -> &str {
        "stub/bag-of-words"
    }
}

/// LLM stub that echoes the whole rendered conversation back as the answer,
/// so tests can assert on exactly what context and history reached the model.
pub struct EchoLLM;

#[async_trait]
impl LLMClient for EchoLLM {
    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(prompt.to_string())
    }

    async fn generate_with_history(&self, messages: &[(String, String)]) -> Result<String> {
        Ok(messages
            .iter()
            .map(|(role, content)| format!("{}: {}", role, content))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn model_name(&self) -> &str {
        "echo"
    }
}

/// LLM stub that fails the first `failures` calls, then answers.
pub struct FlakyLLM {
    failures: usize,
    calls: AtomicUsize,
}

impl FlakyLLM {
    pub fn failing_first(failures: usize) -> Self {
        Self {
            failures,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn attempt(&self) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err(AppError::Generation("stub provider failure".to_string()))
        } else {
            Ok("recovered answer".to_string())
        }
    }
}

#[async_trait]
impl LLMClient for FlakyLLM {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.attempt()
    }

    async fn generate_with_history(&self, _messages: &[(String, String)]) -> Result<String> {
        self.attempt()
    }

    fn model_name(&self) -> &str {
        "flaky"
    }
}

/// Engine wired with the stub embedder and a small chunker.
pub fn test_engine(llm: Arc<dyn LLMClient>) -> ConversationEngine {
    ConversationEngine::new(
        TextChunker::new(80, 16, "\n").unwrap(),
        Arc::new(StubEmbedder),
        llm,
        4,
    )
}

/// App state over a stub-backed engine, for driving the HTTP surface.
pub fn test_state(llm: Arc<dyn LLMClient>) -> AppState {
    AppState {
        config: Arc::new(test_config()),
        engine: Arc::new(test_engine(llm)),
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_upload_bytes: 1024 * 1024,
        },
        llm: LLMConfig {
            provider: "ollama".to_string(),
            openai_api_key: None,
            openai_api_base: "https://api.openai.com/v1".to_string(),
            openai_chat_model: "gpt-4o-mini".to_string(),
            openai_embedding_model: "text-embedding-3-small".to_string(),
            ollama_url: "http://localhost:11434".to_string(),
            ollama_chat_model: "llama3.2".to_string(),
            ollama_embedding_model: "nomic-embed-text".to_string(),
            temperature: None,
            timeout_secs: 5,
        },
        rag: RAGConfig {
            chunk_size: 80,
            chunk_overlap: 16,
            chunk_separator: "\n".to_string(),
            top_k: 4,
        },
    }
}
