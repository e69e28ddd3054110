//! # newsdesk-model
//!
//! [`ChatModel`](newsdesk_core::ChatModel) implementations:
//!
//! - [`GroqChatModel`] — streaming completions from Groq or any other
//!   OpenAI-compatible chat API, decoded from server-sent events
//! - [`MockChatModel`] — scripted deltas for tests and offline demos

pub mod groq;
pub mod mock;

pub use groq::GroqChatModel;
pub use mock::MockChatModel;
