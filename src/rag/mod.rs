//! Retrieval Augmented Generation (RAG) pipeline components.
//!
//! - [`rag::chunker`](crate::rag::chunker) - Overlapping text chunking
//! - [`rag::embeddings`](crate::rag::embeddings) - Embedding provider clients
//!
//! The pipeline flow at ingestion time is extract -> chunk -> embed -> index
//! (the index itself lives in the `docchat-vector` crate); at question time
//! it is embed query -> retrieve -> prompt -> generate. Both halves are
//! orchestrated by [`crate::engine::ConversationEngine`].

pub mod chunker;
pub mod embeddings;
