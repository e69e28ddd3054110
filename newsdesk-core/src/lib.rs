//! # newsdesk-core
//!
//! Shared vocabulary for the newsdesk pipeline: the [`Document`] and
//! [`Message`] data types, the [`CorpusSource`] and [`ChatModel`] traits
//! that the pipeline's external collaborators implement, and the
//! [`CoreError`] type they report failures through.
//!
//! The crates that build on this one:
//!
//! - `newsdesk-rag` — chunking, embedding, and exact nearest-neighbor retrieval
//! - `newsdesk-source` — a Google News backed [`CorpusSource`]
//! - `newsdesk-model` — streaming [`ChatModel`] implementations
//! - `newsdesk-session` — the per-topic session orchestrator

pub mod document;
pub mod error;
pub mod message;
pub mod model;
pub mod source;

pub use document::Document;
pub use error::{CoreError, Result};
pub use message::{Message, Role};
pub use model::{ChatModel, TextDeltaStream};
pub use source::CorpusSource;
