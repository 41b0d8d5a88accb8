//! Overlapping text chunking.
//!
//! Splits extracted document text into bounded chunks for embedding. Cuts
//! prefer the configured separator so chunks end on natural boundaries, with
//! a hard character cut as fallback, and consecutive chunks share an overlap
//! so sentences split across a cut still appear whole in one chunk.

use crate::types::{AppError, Result};
use docchat_vector::{ByteSpan, TextChunk};

pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
    separator: String,
}

impl TextChunker {
    /// Create a chunker. Sizes are in characters.
    ///
    /// # Errors
    ///
    /// `AppError::Configuration` when `chunk_size` is zero or the overlap is
    /// not strictly smaller than the chunk size (equal overlap would loop on
    /// the same window forever).
    pub fn new(
        chunk_size: usize,
        chunk_overlap: usize,
        separator: impl Into<String>,
    ) -> Result<Self> {
        if chunk_size == 0 {
            return Err(AppError::Configuration(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        if chunk_overlap >= chunk_size {
            return Err(AppError::Configuration(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                chunk_overlap, chunk_size
            )));
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
            separator: separator.into(),
        })
    }

    /// Split `text` into chunks of at most `chunk_size` characters.
    ///
    /// Each cut lands just after the last separator inside the window when
    /// one exists past the window start, otherwise exactly at the window
    /// boundary. The next chunk starts `chunk_overlap` characters before the
    /// previous cut. Chunk ids are sequential from 0 and every chunk records
    /// the byte span it was cut from, so `text[span] == chunk.text` holds.
    pub fn chunk(&self, text: &str) -> Vec<TextChunk> {
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every char boundary, including the end of the text.
        let mut offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        offsets.push(text.len());
        let total_chars = offsets.len() - 1;

        let mut chunks = Vec::new();
        let mut start_char = 0usize;

        while start_char < total_chars {
            let window_end_char = (start_char + self.chunk_size).min(total_chars);
            let start_byte = offsets[start_char];
            let window_end_byte = offsets[window_end_char];

            let end_byte = if window_end_char == total_chars {
                window_end_byte
            } else {
                match self.last_separator_in(&text[start_byte..window_end_byte]) {
                    Some(pos) => start_byte + pos + self.separator.len(),
                    None => window_end_byte,
                }
            };

            // end_byte is always a char boundary, so it is present in offsets.
            let end_char = offsets.partition_point(|&b| b < end_byte);

            chunks.push(TextChunk::with_span(
                chunks.len(),
                &text[start_byte..end_byte],
                ByteSpan::new(start_byte, end_byte),
            ));

            if end_char >= total_chars {
                break;
            }

            let next_start = end_char.saturating_sub(self.chunk_overlap);
            start_char = if next_start > start_char {
                next_start
            } else {
                // Overlap would revisit the same window; step past the cut.
                end_char
            };
        }

        chunks
    }

    /// Position of the last separator in the window, excluding a separator at
    /// the very start (cutting there would produce an empty chunk body).
    fn last_separator_in(&self, window: &str) -> Option<usize> {
        if self.separator.is_empty() {
            return None;
        }
        match window.rfind(&self.separator) {
            Some(0) | None => None,
            Some(pos) => Some(pos),
        }
    }
}
