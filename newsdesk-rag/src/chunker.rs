//! Document chunking.
//!
//! Splitting is by fixed character windows with a fixed stride, so the
//! overlap between consecutive chunks of one document is always exactly
//! `chunk_overlap` characters and chunking is fully deterministic. Snapping
//! window edges to sentence or paragraph boundaries was considered and
//! rejected: it cannot be done without breaking the exact-overlap
//! guarantee that retrieval tests rely on.

use serde::{Deserialize, Serialize};

use newsdesk_core::Document;

use crate::config::RagConfig;
use crate::error::{RagError, Result};

/// A contiguous text span drawn from one document.
///
/// `position` is the chunk's stable index in the corpus chunk sequence
/// (0..N-1), assigned in document order and then left-to-right within a
/// document. Row `position` of the corpus index holds this chunk's vector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Stable index in the corpus chunk sequence.
    pub position: usize,
    /// The text of the span.
    pub text: String,
    /// `source_id` of the document this span was cut from.
    pub source_id: String,
}

/// Splits documents into overlapping fixed-size character windows.
///
/// Window size and overlap are counted in characters, never bytes, so a
/// window edge can never split a UTF-8 sequence. A document shorter than
/// the window produces exactly one chunk equal to its full body; an empty
/// document produces no chunks. The final window of a document may be
/// shorter than the rest.
#[derive(Debug, Clone)]
pub struct WindowChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl WindowChunker {
    /// Create a chunker with the given window size and overlap, in characters.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if `chunk_size` is zero or
    /// `chunk_overlap >= chunk_size` (the stride would not advance).
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RagError::Config("chunk_size must be greater than zero".to_string()));
        }
        if chunk_overlap >= chunk_size {
            return Err(RagError::Config(format!(
                "chunk_overlap ({chunk_overlap}) must be less than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { chunk_size, chunk_overlap })
    }

    /// Create a chunker from a [`RagConfig`].
    pub fn from_config(config: &RagConfig) -> Result<Self> {
        Self::new(config.chunk_size, config.chunk_overlap)
    }

    /// Split every document, preserving document order and then
    /// left-to-right order within each document.
    pub fn chunk(&self, documents: &[Document]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for document in documents {
            self.chunk_document(document, &mut chunks);
        }
        chunks
    }

    fn chunk_document(&self, document: &Document, out: &mut Vec<Chunk>) {
        if document.text.is_empty() {
            return;
        }

        // Byte offset of every char boundary; windows index into this so
        // slices always land on boundaries.
        let boundaries: Vec<usize> = document.text.char_indices().map(|(i, _)| i).collect();
        let char_count = boundaries.len();
        let stride = self.chunk_size - self.chunk_overlap;

        let mut start = 0;
        loop {
            let end = (start + self.chunk_size).min(char_count);
            let byte_start = boundaries[start];
            let byte_end = if end == char_count { document.text.len() } else { boundaries[end] };

            out.push(Chunk {
                position: out.len(),
                text: document.text[byte_start..byte_end].to_string(),
                source_id: document.source_id.clone(),
            });

            if end == char_count {
                break;
            }
            start += stride;
        }
    }
}
