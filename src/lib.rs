//! # docchat - Conversational Document Q&A Server
//!
//! Upload a set of PDF or plain-text documents and ask natural-language
//! questions that are answered only from those documents, with multi-turn
//! conversational context.
//!
//! ## Overview
//!
//! docchat can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `docchat-server` binary
//! 2. **As a library** - Import the pipeline components into your own project
//!
//! The pipeline is: extract text from the uploads, cut it into overlapping
//! chunks, embed the chunks, and build an in-memory vector index (the
//! `docchat-vector` crate). Each question is embedded in the same space, the
//! most similar chunks are retrieved, and a chat model generates the answer
//! from that context plus the conversation so far.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use docchat::engine::ConversationEngine;
//! use docchat::llm::Provider;
//! use docchat::rag::chunker::TextChunker;
//! use docchat::rag::embeddings::EmbeddingProvider;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let timeout = Duration::from_secs(60);
//!     let embedder = EmbeddingProvider::Ollama {
//!         base_url: "http://localhost:11434".to_string(),
//!         model: "nomic-embed-text".to_string(),
//!     }
//!     .create_client(timeout);
//!     let llm = Provider::Ollama {
//!         base_url: "http://localhost:11434".to_string(),
//!         model: "llama3.2".to_string(),
//!     }
//!     .create_client(timeout);
//!
//!     let engine = ConversationEngine::new(
//!         TextChunker::new(1000, 200, "\n")?,
//!         Arc::from(embedder),
//!         Arc::from(llm),
//!         4,
//!     );
//!
//!     engine.ingest(my_uploads).await?;
//!     let result = engine.answer("What is chapter 2 about?").await?;
//!     println!("{}", result.answer);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - Conversation engine and session state
//! - [`extract`] - Document text extraction
//! - [`rag`] - Chunking and embedding providers
//! - [`llm`] - Chat model clients
//! - [`api`] - REST API handlers and routes
//! - [`types`] - Common types and error handling

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Environment-based configuration.
pub mod config;
/// Conversation engine and session state.
pub mod engine;
/// Document text extraction.
pub mod extract;
/// LLM provider clients and abstractions.
pub mod llm;
/// Chunking and embedding providers.
pub mod rag;
/// Core types (requests, responses, errors).
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use engine::{AnswerResult, ConversationEngine, IngestSummary};
pub use llm::{LLMClient, Provider};
pub use rag::embeddings::{EmbeddingClient, EmbeddingProvider};
pub use types::{AppError, Result};

use axum::{Router, extract::DefaultBodyLimit};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Conversation engine owning the session
    pub engine: Arc<ConversationEngine>,
}

/// Build the full application router with middleware layers applied.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::routes::create_router())
        .layer(DefaultBodyLimit::max(state.config.server.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
