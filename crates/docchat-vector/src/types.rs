//! Common types for docchat-vector.

use serde::{Deserialize, Serialize};

/// Byte range in the source text a chunk was cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteSpan {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl ByteSpan {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span is empty.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// A bounded-length slice of source text, the unit of embedding and retrieval.
///
/// Chunks are immutable once created: the chunker creates them, the index
/// stores them keyed by their embedding, and retrieval hands out clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Sequence index within the source text, starting at 0.
    pub id: usize,
    /// The chunk text.
    pub text: String,
    /// Byte range of `text` within the source, when known.
    pub span: Option<ByteSpan>,
}

impl TextChunk {
    /// Create a chunk without source-position information.
    pub fn new(id: usize, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            span: None,
        }
    }

    /// Create a chunk recording where in the source it was cut from.
    pub fn with_span(id: usize, text: impl Into<String>, span: ByteSpan) -> Self {
        Self {
            id,
            text: text.into(),
            span: Some(span),
        }
    }
}

/// A retrieved chunk with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// The matched chunk.
    pub chunk: TextChunk,
    /// Similarity score under the index's metric (higher = more similar).
    pub score: f32,
}
