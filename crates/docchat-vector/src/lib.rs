//! # docchat-vector
//!
//! A pure-Rust embedded vector index over document chunks, built for one
//! document-set-at-a-time retrieval: a session ingests a set of documents,
//! builds an index from their chunk embeddings, and queries it until the next
//! ingestion replaces it wholesale.
//!
//! ## Design
//!
//! - **Build-once, replace-only**: [`VectorIndex::build`] consumes the chunk
//!   and embedding lists and returns an immutable value. There is no insert,
//!   update, or delete; a new document set means a new index. Callers swap an
//!   `Arc<VectorIndex>` to get atomic replacement: a concurrent reader sees
//!   the fully-old or fully-new index, never a mix.
//! - **Exact search**: retrieval scores every entry under the index's fixed
//!   [`DistanceMetric`] (cosine by default) and ranks descending. A session's
//!   chunk count is small enough that approximate indexing buys nothing.
//! - **Single embedding space**: the index records the id of the embedding
//!   configuration that produced its vectors. Mixing vectors from different
//!   models makes similarity scores meaningless, so the build replaces all
//!   entries at once and records the id for callers to verify via
//!   [`VectorIndex::space_id`].
//!
//! ## Quick Start
//!
//! ```rust
//! use docchat_vector::{DistanceMetric, TextChunk, VectorIndex};
//!
//! let chunks = vec![TextChunk::new(0, "first"), TextChunk::new(1, "second")];
//! let embeddings = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
//!
//! let index = VectorIndex::build("example/model", chunks, embeddings, DistanceMetric::Cosine)
//!     .unwrap();
//!
//! let results = index.retrieve(&[1.0, 0.1], 4).unwrap();
//! assert_eq!(results[0].chunk.id, 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use distance::DistanceMetric;
pub use error::{Error, Result};
pub use types::{ByteSpan, ScoredChunk, TextChunk};

use tracing::debug;

/// Default number of chunks returned by retrieval when callers have no
/// stronger opinion.
pub const DEFAULT_TOP_K: usize = 4;

struct Entry {
    vector: Vec<f32>,
    chunk: TextChunk,
}

/// An immutable similarity index over the chunks of one document set.
///
/// See the crate-level docs for lifecycle and concurrency notes.
pub struct VectorIndex {
    space_id: String,
    dimensions: usize,
    metric: DistanceMetric,
    entries: Vec<Entry>,
}

impl VectorIndex {
    /// Build an index from parallel chunk and embedding lists.
    ///
    /// `space_id` identifies the embedding configuration (provider + model)
    /// that produced every vector; queries must be embedded with the same
    /// configuration. `chunks[i]` corresponds to `embeddings[i]`.
    ///
    /// # Errors
    ///
    /// - [`Error::LengthMismatch`] when the lists differ in length.
    /// - [`Error::DimensionMismatch`] when embeddings have uneven dimensions.
    /// - [`Error::InvalidVector`] for empty or non-finite embeddings.
    pub fn build(
        space_id: impl Into<String>,
        chunks: Vec<TextChunk>,
        embeddings: Vec<Vec<f32>>,
        metric: DistanceMetric,
    ) -> Result<Self> {
        if chunks.len() != embeddings.len() {
            return Err(Error::LengthMismatch {
                chunks: chunks.len(),
                embeddings: embeddings.len(),
            });
        }

        let dimensions = embeddings.first().map(Vec::len).unwrap_or(0);
        for (chunk, vector) in chunks.iter().zip(&embeddings) {
            if vector.is_empty() {
                return Err(Error::InvalidVector(format!(
                    "empty embedding for chunk {}",
                    chunk.id
                )));
            }
            if vector.len() != dimensions {
                return Err(Error::DimensionMismatch {
                    expected: dimensions,
                    actual: vector.len(),
                });
            }
            if vector.iter().any(|v| !v.is_finite()) {
                return Err(Error::InvalidVector(format!(
                    "non-finite value in embedding for chunk {}",
                    chunk.id
                )));
            }
        }

        let space_id = space_id.into();
        let entries = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, vector)| Entry { vector, chunk })
            .collect::<Vec<_>>();

        debug!(
            space = %space_id,
            entries = entries.len(),
            dimensions,
            metric = %metric,
            "Built vector index"
        );

        Ok(Self {
            space_id,
            dimensions,
            metric,
            entries,
        })
    }

    /// Retrieve the `k` chunks most similar to `query`.
    ///
    /// Results are ordered by descending similarity under the index's metric;
    /// equal scores are broken by lowest chunk id so ranking is deterministic.
    /// Returns at most `min(k, len)` results; an empty index yields an empty
    /// vec rather than an error.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] when `query` does not match the index
    /// dimensionality (a non-empty index only).
    pub fn retrieve(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }
        if query.len() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                score: self.metric.similarity(query, &entry.vector),
                chunk: entry.chunk.clone(),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.chunk.id.cmp(&b.chunk.id))
        });
        scored.truncate(k);

        debug!(results = scored.len(), k, "Retrieval completed");
        Ok(scored)
    }

    /// The embedding-space id this index was built from.
    pub fn space_id(&self) -> &str {
        &self.space_id
    }

    /// Dimensionality of the stored vectors (0 for an empty index).
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// The similarity metric fixed at build time.
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Number of chunks in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: usize, text: &str) -> TextChunk {
        TextChunk::new(id, text)
    }

    fn build_unit_index() -> VectorIndex {
        VectorIndex::build(
            "test/model",
            vec![chunk(0, "x axis"), chunk(1, "y axis"), chunk(2, "near x")],
            vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.9, 0.1, 0.0],
            ],
            DistanceMetric::Cosine,
        )
        .unwrap()
    }

    #[test]
    fn test_build_and_retrieve_ordering() {
        let index = build_unit_index();

        let results = index.retrieve(&[1.0, 0.0, 0.0], 10).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].chunk.id, 0);
        assert_eq!(results[1].chunk.id, 2);
        assert_eq!(results[2].chunk.id, 1);
        // Descending scores
        assert!(results[0].score >= results[1].score);
        assert!(results[1].score >= results[2].score);
    }

    #[test]
    fn test_retrieve_respects_k() {
        let index = build_unit_index();
        let results = index.retrieve(&[1.0, 0.0, 0.0], 2).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_k_larger_than_index_returns_all() {
        let index = build_unit_index();
        let results = index.retrieve(&[0.5, 0.5, 0.0], 100).unwrap();
        assert_eq!(results.len(), index.len());
    }

    #[test]
    fn test_tie_broken_by_lowest_chunk_id() {
        let index = VectorIndex::build(
            "test/model",
            vec![chunk(7, "later"), chunk(2, "earlier")],
            vec![vec![1.0, 0.0], vec![1.0, 0.0]],
            DistanceMetric::Cosine,
        )
        .unwrap();

        let results = index.retrieve(&[1.0, 0.0], 2).unwrap();
        assert_eq!(results[0].chunk.id, 2);
        assert_eq!(results[1].chunk.id, 7);
        assert_eq!(results[0].score, results[1].score);
    }

    #[test]
    fn test_empty_index_retrieval_is_empty_not_error() {
        let index = VectorIndex::build(
            "test/model",
            Vec::new(),
            Vec::new(),
            DistanceMetric::Cosine,
        )
        .unwrap();

        assert!(index.is_empty());
        let results = index.retrieve(&[1.0, 0.0], 4).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = VectorIndex::build(
            "test/model",
            vec![chunk(0, "one")],
            vec![vec![1.0], vec![2.0]],
            DistanceMetric::Cosine,
        );
        assert!(matches!(result, Err(Error::LengthMismatch { .. })));
    }

    #[test]
    fn test_uneven_dimensions_rejected() {
        let result = VectorIndex::build(
            "test/model",
            vec![chunk(0, "one"), chunk(1, "two")],
            vec![vec![1.0, 0.0], vec![1.0]],
            DistanceMetric::Cosine,
        );
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_non_finite_vector_rejected() {
        let result = VectorIndex::build(
            "test/model",
            vec![chunk(0, "one")],
            vec![vec![f32::NAN, 0.0]],
            DistanceMetric::Cosine,
        );
        assert!(matches!(result, Err(Error::InvalidVector(_))));
    }

    #[test]
    fn test_query_dimension_mismatch_rejected() {
        let index = build_unit_index();
        let result = index.retrieve(&[1.0, 0.0], 4);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_results_are_members_of_the_chunk_set() {
        let index = build_unit_index();
        let results = index.retrieve(&[0.3, 0.8, 0.0], 10).unwrap();
        for scored in &results {
            assert!(scored.chunk.id < 3);
        }
    }

    #[test]
    fn test_space_id_recorded() {
        let index = build_unit_index();
        assert_eq!(index.space_id(), "test/model");
        assert_eq!(index.dimensions(), 3);
        assert_eq!(index.metric(), DistanceMetric::Cosine);
    }
}
