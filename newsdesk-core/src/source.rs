//! Corpus source trait.

use async_trait::async_trait;

use crate::document::Document;
use crate::error::Result;

/// A provider of topic-relevant documents.
///
/// Implementations search some external corpus for a topic and return the
/// matching documents in a stable order. A failure to fetch or parse one
/// document must degrade to a placeholder body for that document rather
/// than failing the whole fetch; only a failure of the search itself is an
/// error. Returning zero documents is legal (a degenerate corpus) and left
/// to the caller to reject.
#[async_trait]
pub trait CorpusSource: Send + Sync {
    /// Fetch the documents for a topic, in source order.
    async fn fetch(&self, topic: &str) -> Result<Vec<Document>>;
}
