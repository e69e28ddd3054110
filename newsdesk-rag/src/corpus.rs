//! The per-session corpus: chunks, index, and embedding provider as one
//! immutable value.

use std::sync::Arc;

use tracing::{debug, info};

use newsdesk_core::Document;

use crate::chunker::{Chunk, WindowChunker};
use crate::config::RagConfig;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::index::FlatL2Index;

/// An immutable bundle of chunks, their vector index, and the embedding
/// provider that produced the vectors.
///
/// The three parts must stay mutually consistent: row `i` of the index is
/// chunk `i`'s vector, and query vectors are only comparable when encoded
/// by the same provider. Bundling them into one value built in a single
/// step makes an inconsistent combination unrepresentable: a session
/// either holds a complete handle or none at all.
pub struct CorpusHandle {
    chunks: Vec<Chunk>,
    index: FlatL2Index,
    embedder: Arc<dyn EmbeddingProvider>,
    top_k: usize,
}

impl CorpusHandle {
    /// Chunk, embed, and index the given documents.
    ///
    /// All chunk texts go to the provider in one batch call, and the index
    /// is built over exactly those vectors, so the row count always equals
    /// the chunk count. The provider is retained in the handle for later
    /// query encoding.
    ///
    /// # Errors
    ///
    /// - [`RagError::EmptyCorpus`] if chunking produced no chunks.
    /// - [`RagError::Embedding`] if the provider fails or returns the
    ///   wrong number of vectors.
    /// - [`RagError::Config`] if the configuration is invalid.
    pub async fn build(
        documents: &[Document],
        config: &RagConfig,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        let chunker = WindowChunker::from_config(config)?;
        let chunks = chunker.chunk(documents);
        if chunks.is_empty() {
            return Err(RagError::EmptyCorpus);
        }
        debug!(document_count = documents.len(), chunk_count = chunks.len(), "chunked corpus");

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(RagError::Embedding {
                provider: embedder.name().to_string(),
                message: format!(
                    "provider returned {} vectors for {} chunks",
                    embeddings.len(),
                    chunks.len()
                ),
            });
        }

        let index = FlatL2Index::build(embedder.dimensions(), embeddings)?;
        info!(
            chunk_count = chunks.len(),
            dimensions = index.dimensions(),
            embedder = embedder.name(),
            "corpus indexed"
        );

        Ok(Self { chunks, index, embedder, top_k: config.top_k })
    }

    /// Retrieve the context for a query: the `top_k` nearest chunks'
    /// text, concatenated nearest-first.
    ///
    /// The query is encoded with the same provider that embedded the
    /// chunks. Equal distances resolve to ascending chunk position, and
    /// ranked chunks are concatenated as-is; identical texts are not
    /// deduplicated. The same query against the same handle always
    /// returns the same context.
    pub async fn retrieve(&self, query: &str) -> Result<String> {
        let query_embedding = self.embedder.embed(query).await?;
        let neighbors = self.index.search(&query_embedding, self.top_k)?;
        debug!(query_len = query.len(), hits = neighbors.len(), "retrieved context chunks");

        let mut context = String::new();
        for neighbor in &neighbors {
            context.push_str(&self.chunks[neighbor.position].text);
        }
        Ok(context)
    }

    /// Number of chunks (and index rows) in the corpus.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// The chunk sequence, in position order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// The vector index. Row `i` holds chunk `i`'s vector, so its length
    /// always equals [`chunk_count`](CorpusHandle::chunk_count).
    pub fn index(&self) -> &FlatL2Index {
        &self.index
    }

    /// Dimensionality of the corpus vector space.
    pub fn dimensions(&self) -> usize {
        self.index.dimensions()
    }
}

impl std::fmt::Debug for CorpusHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorpusHandle")
            .field("chunk_count", &self.chunks.len())
            .field("dimensions", &self.index.dimensions())
            .field("embedder", &self.embedder.name())
            .field("top_k", &self.top_k)
            .finish()
    }
}
