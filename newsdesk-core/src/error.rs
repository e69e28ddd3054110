//! Error type shared by the pipeline's external collaborators.

use thiserror::Error;

/// Errors reported by corpus sources and chat models.
///
/// Both collaborators sit behind trait objects, so their failures are
/// carried as messages rather than backend-specific types. The variant
/// names which collaborator failed; callers wrap these with their own
/// stage context before propagating further.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The corpus source failed as a whole (individual document failures
    /// are absorbed by the source and never surface here).
    #[error("corpus source error: {0}")]
    Source(String),

    /// The chat model failed to start or continue a generation.
    #[error("model error: {0}")]
    Model(String),
}

/// A convenience result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
