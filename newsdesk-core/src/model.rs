//! Chat model trait and streaming types.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::Result;
use crate::message::Message;

/// A stream of text deltas from a chat model.
///
/// Each item is a contiguous text fragment to append to the answer; no
/// other framing is guaranteed. The stream ends when the model signals
/// completion, or after the first `Err` item.
pub type TextDeltaStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// A chat completion model that streams its output.
///
/// # Example
///
/// ```rust,ignore
/// use futures::StreamExt;
///
/// let mut deltas = model.generate(messages).await?;
/// while let Some(delta) = deltas.next().await {
///     print!("{}", delta?);
/// }
/// ```
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// A human-readable identifier for the model, used in logs.
    fn name(&self) -> &str;

    /// Start a streaming completion for the given messages.
    ///
    /// Deltas are yielded in the order the model produces them. A failure
    /// before the first delta is returned as `Err` here; a failure
    /// mid-stream is yielded as an `Err` item after the deltas already
    /// delivered.
    async fn generate(&self, messages: Vec<Message>) -> Result<TextDeltaStream>;
}
