//! Source document type.

use serde::{Deserialize, Serialize};

/// A raw document fetched for a topic.
///
/// Immutable once fetched: the pipeline never edits document bodies, it
/// only derives chunks from them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// The full text body of the document.
    pub text: String,
    /// Identifier of where the text came from, usually a URL.
    pub source_id: String,
}

impl Document {
    /// Create a document from a body and a source identifier.
    pub fn new(text: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self { text: text.into(), source_id: source_id.into() }
    }
}
