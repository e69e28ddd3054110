//! Error types for session orchestration.

use thiserror::Error;

use newsdesk_core::CoreError;
use newsdesk_rag::RagError;

/// Errors surfaced by [`crate::Session`] operations.
///
/// Each variant names the stage that failed, so a caller can decide
/// whether retrying the whole pipeline makes sense. The session performs
/// no retries of its own.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A follow-up was requested before a successful pipeline run.
    #[error("session is uninitialized; run the topic pipeline first")]
    Uninitialized,

    /// A second pipeline run was requested on a session that already
    /// holds a corpus. Start a new session for a new topic instead.
    #[error("session already holds a corpus; start a new session for a new topic")]
    AlreadyInitialized,

    /// The corpus source failed as a whole.
    #[error("corpus fetch failed: {0}")]
    Fetch(#[source] CoreError),

    /// Chunking, embedding, indexing, or retrieval failed.
    #[error(transparent)]
    Rag(#[from] RagError),

    /// The model rejected the generation request before streaming began.
    #[error("generation request failed: {0}")]
    Model(#[source] CoreError),

    /// The model failed mid-stream. Deltas already delivered remain
    /// valid; `partial` carries their concatenation, which is also
    /// recorded in the conversation history with an error marker.
    #[error("generation stream failed: {message}")]
    Generation {
        /// Text accumulated before the failure.
        partial: String,
        /// Description of the underlying failure.
        message: String,
    },
}
