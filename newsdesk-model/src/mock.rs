//! Scripted chat model for tests and offline demos.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::stream;

use newsdesk_core::{ChatModel, CoreError, Message, Result, TextDeltaStream};

/// A [`ChatModel`] that replays a fixed script of deltas.
///
/// Records every request it receives and how often it was called, so
/// tests can assert both that a call happened and exactly what prompt it
/// carried. With [`failing_after`](MockChatModel::failing_after) the
/// stream yields that many deltas and then an error, for exercising
/// mid-stream failure handling.
pub struct MockChatModel {
    deltas: Vec<String>,
    fail_after: Option<usize>,
    calls: AtomicUsize,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl MockChatModel {
    /// Create a model that streams the given deltas and then completes.
    pub fn new<I, S>(deltas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            deltas: deltas.into_iter().map(Into::into).collect(),
            fail_after: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Make every stream fail after yielding `count` deltas.
    pub fn failing_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    /// Number of times [`ChatModel::generate`] was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The messages of every request received so far.
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }

    /// The non-streamed answer: all scripted deltas concatenated.
    pub fn full_text(&self) -> String {
        self.deltas.concat()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, messages: Vec<Message>) -> Result<TextDeltaStream> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(messages);

        let emit = self.fail_after.unwrap_or(self.deltas.len()).min(self.deltas.len());
        let mut items: Vec<Result<String>> =
            self.deltas[..emit].iter().cloned().map(Ok).collect();
        if self.fail_after.is_some() {
            items.push(Err(CoreError::Model("mock stream failure".into())));
        }

        Ok(Box::pin(stream::iter(items)))
    }
}
