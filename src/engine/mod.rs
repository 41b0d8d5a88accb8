//! Conversation engine.
//!
//! Owns the single chat session and orchestrates both halves of the RAG
//! pipeline: ingestion (extract -> chunk -> embed -> build index) and
//! question answering (embed query -> retrieve -> prompt -> generate ->
//! history update).
//!
//! The session moves between two states. Before the first successful
//! ingestion there is no index and `answer` fails with
//! [`AppError::NotReady`] without touching the session. After ingestion the
//! session holds an index and an append-only history; re-ingestion replaces
//! the index and clears the history in one step, so answers never mix
//! retrieval from one document set with conversation about another.
//!
//! Concurrency: ingestion does all provider work off the session lock and
//! takes it only for the final swap. `answer` holds the lock end to end, so
//! a rebuild cannot slip in between retrieval and the history append.

use crate::extract::extract_documents;
use crate::llm::LLMClient;
use crate::rag::chunker::TextChunker;
use crate::rag::embeddings::EmbeddingClient;
use crate::types::{AppError, DocumentUpload, Message, Result, Source};
use docchat_vector::{DistanceMetric, ScoredChunk, VectorIndex};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

const SYSTEM_PROMPT: &str = "You are an assistant that answers questions about the user's \
uploaded documents. Answer using only the context excerpts below. If the context does not \
contain the answer, say that you cannot find it in the documents.\n\nContext:\n";

/// Per-session conversational state.
#[derive(Default)]
struct Session {
    index: Option<Arc<VectorIndex>>,
    history: Vec<Message>,
}

/// Summary returned by a successful ingestion.
#[derive(Debug, Clone, Copy)]
pub struct IngestSummary {
    pub documents: usize,
    pub chunks: usize,
}

/// A generated answer together with its retrieval provenance and the updated
/// conversation history.
#[derive(Debug, Clone)]
pub struct AnswerResult {
    pub answer: String,
    pub sources: Vec<Source>,
    pub history: Vec<Message>,
}

pub struct ConversationEngine {
    chunker: TextChunker,
    embedder: Arc<dyn EmbeddingClient>,
    llm: Arc<dyn LLMClient>,
    top_k: usize,
    session: Mutex<Session>,
}

impl ConversationEngine {
    pub fn new(
        chunker: TextChunker,
        embedder: Arc<dyn EmbeddingClient>,
        llm: Arc<dyn LLMClient>,
        top_k: usize,
    ) -> Self {
        Self {
            chunker,
            embedder,
            llm,
            top_k,
            session: Mutex::new(Session::default()),
        }
    }

    /// Ingest a batch of documents, replacing any previous document set.
    ///
    /// Extraction, chunking, embedding and the index build all happen before
    /// the session is touched; any failure leaves the previous index and
    /// history fully intact. On success the new index is swapped in and the
    /// history is cleared atomically.
    pub async fn ingest(&self, uploads: Vec<DocumentUpload>) -> Result<IngestSummary> {
        let start = Instant::now();
        let build_id = Uuid::new_v4();
        let documents = uploads.len();

        // PDF parsing is CPU-bound; keep it off the async workers.
        let text = tokio::task::spawn_blocking(move || extract_documents(&uploads))
            .await
            .map_err(|e| AppError::Internal(format!("Extraction task failed: {}", e)))??;

        let chunks = self.chunker.chunk(&text);
        let chunk_count = chunks.len();

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let index = VectorIndex::build(
            self.embedder.space_id(),
            chunks,
            embeddings,
            DistanceMetric::Cosine,
        )?;

        {
            let mut session = self.session.lock().await;
            session.index = Some(Arc::new(index));
            session.history.clear();
        }

        info!(
            build_id = %build_id,
            documents,
            chunks = chunk_count,
            duration_ms = start.elapsed().as_millis() as u64,
            "Documents ingested"
        );

        Ok(IngestSummary {
            documents,
            chunks: chunk_count,
        })
    }

    /// Answer a question against the current document set.
    ///
    /// Fails with [`AppError::NotReady`] before the first ingestion. On
    /// success the question and answer are appended to the history as a
    /// pair, user message first; a generation failure leaves the history
    /// untouched.
    pub async fn answer(&self, question: &str) -> Result<AnswerResult> {
        if question.trim().is_empty() {
            return Err(AppError::InvalidInput("Question must not be empty".to_string()));
        }

        let start = Instant::now();
        let mut session = self.session.lock().await;
        let index = session.index.clone().ok_or(AppError::NotReady)?;

        let query_embedding = self.embedder.embed(question).await?;
        let retrieved = index.retrieve(&query_embedding, self.top_k)?;

        let messages = build_messages(&retrieved, &session.history, question);
        let answer = self.generate_with_retry(&messages).await?;

        session.history.push(Message::user(question));
        session.history.push(Message::assistant(answer.clone()));

        let sources: Vec<Source> = retrieved
            .iter()
            .map(|s| Source {
                chunk_id: s.chunk.id,
                score: s.score,
            })
            .collect();

        info!(
            retrieved = sources.len(),
            history_len = session.history.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Question answered"
        );

        Ok(AnswerResult {
            answer,
            sources,
            history: session.history.clone(),
        })
    }

    /// Snapshot of the current conversation history.
    pub async fn history(&self) -> Vec<Message> {
        self.session.lock().await.history.clone()
    }

    /// Whether documents have been ingested.
    pub async fn is_ready(&self) -> bool {
        self.session.lock().await.index.is_some()
    }

    /// One retry for transient generation failures; embedding calls are
    /// never retried.
    async fn generate_with_retry(&self, messages: &[(String, String)]) -> Result<String> {
        match self.llm.generate_with_history(messages).await {
            Err(err @ (AppError::Generation(_) | AppError::ProviderTimeout(_))) => {
                warn!(model = self.llm.model_name(), error = %err, "Generation failed, retrying once");
                self.llm.generate_with_history(messages).await
            }
            other => other,
        }
    }
}

/// Assemble the provider conversation: a system message carrying the
/// retrieved context, the prior turns, then the new question.
fn build_messages(
    retrieved: &[ScoredChunk],
    history: &[Message],
    question: &str,
) -> Vec<(String, String)> {
    let context = retrieved
        .iter()
        .map(|s| s.chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(("system".to_string(), format!("{}{}", SYSTEM_PROMPT, context)));
    for message in history {
        messages.push((message.role.as_str().to_string(), message.content.clone()));
    }
    messages.push(("user".to_string(), question.to_string()));
    messages
}
