//! # newsdesk-rag
//!
//! The retrieval half of the newsdesk pipeline: split fetched documents
//! into overlapping character windows, embed every window with one
//! embedding provider, index the vectors for exact L2 nearest-neighbor
//! search, and assemble the retrieved context for a query.
//!
//! The central type is [`CorpusHandle`]: an immutable bundle of chunks,
//! index, and the embedding provider that produced the vectors. It is
//! built in one step from the fetched documents, so a half-built corpus
//! (chunks without an index, an index over a stale provider) is
//! unrepresentable.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use newsdesk_rag::{CorpusHandle, HashEmbeddingProvider, RagConfig};
//!
//! let config = RagConfig::default();
//! let embedder = Arc::new(HashEmbeddingProvider::new(384));
//! let corpus = CorpusHandle::build(&documents, &config, embedder).await?;
//! let context = corpus.retrieve("why did this happen?").await?;
//! ```

pub mod chunker;
pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod hash;
pub mod http;
pub mod index;

pub use chunker::{Chunk, WindowChunker};
pub use config::{RagConfig, RagConfigBuilder};
pub use corpus::CorpusHandle;
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use hash::HashEmbeddingProvider;
pub use http::HttpEmbeddingProvider;
pub use index::{FlatL2Index, Neighbor};
