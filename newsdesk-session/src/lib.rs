//! # newsdesk-session
//!
//! The stateful coordinator of the newsdesk pipeline. A [`Session`] holds
//! one topic's corpus and conversation history: the first call builds the
//! corpus and streams an answer, follow-ups reuse the corpus and only
//! re-run retrieval and generation. The [`SessionManager`] keeps sessions
//! keyed by id so concurrent users never share one.

pub mod error;
pub mod manager;
pub mod prompt;
pub mod session;

pub use error::SessionError;
pub use manager::SessionManager;
pub use prompt::{SYSTEM_INSTRUCTION, build_prompt};
pub use session::{AnswerStream, GENERATION_INTERRUPTED_MARKER, Session};
