//! The per-topic session state machine.

use std::pin::Pin;
use std::sync::Arc;

use async_stream::try_stream;
use futures::{Stream, StreamExt};
use tracing::{info, warn};
use uuid::Uuid;

use newsdesk_core::{ChatModel, CorpusSource, Message};
use newsdesk_rag::{CorpusHandle, EmbeddingProvider, RagConfig};

use crate::error::SessionError;
use crate::prompt::build_prompt;

/// Marker appended to a history entry whose generation failed mid-stream.
pub const GENERATION_INTERRUPTED_MARKER: &str = "[generation interrupted]";

/// A stream of answer deltas from one session operation.
pub type AnswerStream<'a> =
    Pin<Box<dyn Stream<Item = Result<String, SessionError>> + Send + 'a>>;

/// One topic interaction: corpus, conversation history, and the
/// collaborators that serve it.
///
/// A session is `uninitialized` until [`run_pipeline`](Session::run_pipeline)
/// succeeds, and `ready` afterwards; readiness is exactly "holds a
/// [`CorpusHandle`]", so a partially built corpus is unrepresentable. The
/// handle is installed in one step only after the index build completes:
/// cancelling an in-flight build (dropping the future) leaves the session
/// `uninitialized`, and cancelling mid-generation leaves the corpus intact
/// with the unfinished turn absent from history.
///
/// Operations take `&mut self`, so at most one pipeline or follow-up is in
/// flight per session. Sessions must not be shared across concurrent
/// users: create one per user interaction and look it up through a
/// [`crate::SessionManager`].
///
/// # Example
///
/// ```rust,ignore
/// use futures::StreamExt;
///
/// let mut session = Session::new(source, embedder, model, RagConfig::default());
/// let mut answer = session.run_pipeline("Operation Sindoor", "Summarize this context").await?;
/// while let Some(delta) = answer.next().await {
///     print!("{}", delta?);
/// }
/// ```
pub struct Session {
    id: String,
    topic: Option<String>,
    corpus: Option<Arc<CorpusHandle>>,
    history: Vec<Message>,
    source: Arc<dyn CorpusSource>,
    embedder: Arc<dyn EmbeddingProvider>,
    model: Arc<dyn ChatModel>,
    config: RagConfig,
}

impl Session {
    /// Create an uninitialized session around its collaborators.
    pub fn new(
        source: Arc<dyn CorpusSource>,
        embedder: Arc<dyn EmbeddingProvider>,
        model: Arc<dyn ChatModel>,
        config: RagConfig,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            topic: None,
            corpus: None,
            history: Vec::new(),
            source,
            embedder,
            model,
            config,
        }
    }

    /// The session's lookup key.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The topic this session was built for, once the pipeline has run.
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Whether the session holds a built corpus.
    pub fn is_ready(&self) -> bool {
        self.corpus.is_some()
    }

    /// The conversation history, oldest turn first.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Build the corpus for `topic` and stream an answer to it.
    ///
    /// Valid only while uninitialized. Fetches documents, chunks and
    /// embeds them, builds the index, then retrieves context for the
    /// topic itself and streams the generated answer. On build success
    /// the session becomes ready and stays ready even if generation later
    /// fails; on any fetch/chunk/embed failure it stays uninitialized and
    /// the error propagates.
    pub async fn run_pipeline(
        &mut self,
        topic: &str,
        task: &str,
    ) -> Result<AnswerStream<'_>, SessionError> {
        if self.corpus.is_some() {
            return Err(SessionError::AlreadyInitialized);
        }

        info!(session = %self.id, topic, "fetching corpus documents");
        let documents = self.source.fetch(topic).await.map_err(SessionError::Fetch)?;

        info!(document_count = documents.len(), "building corpus");
        let corpus = Arc::new(
            CorpusHandle::build(&documents, &self.config, Arc::clone(&self.embedder)).await?,
        );

        self.corpus = Some(Arc::clone(&corpus));
        self.topic = Some(topic.to_string());

        self.respond(corpus, topic, task).await
    }

    /// Answer a follow-up query against the existing corpus.
    ///
    /// Valid only while ready; fails with
    /// [`SessionError::Uninitialized`] otherwise, before any network or
    /// model call. No re-fetch and no re-embedding of the corpus happens:
    /// only the query is encoded, retrieval runs against the original
    /// index, and the answer streams back.
    pub async fn run_follow_up(
        &mut self,
        query: &str,
        task: &str,
    ) -> Result<AnswerStream<'_>, SessionError> {
        let corpus = match &self.corpus {
            Some(corpus) => Arc::clone(corpus),
            None => return Err(SessionError::Uninitialized),
        };

        info!(session = %self.id, "answering follow-up against existing corpus");
        self.respond(corpus, query, task).await
    }

    /// One retrieval → prompt → generate cycle, shared by both operations.
    async fn respond(
        &mut self,
        corpus: Arc<CorpusHandle>,
        query: &str,
        task: &str,
    ) -> Result<AnswerStream<'_>, SessionError> {
        let context = corpus.retrieve(query).await?;
        let messages = build_prompt(&context, task);

        info!(model = self.model.name(), "streaming model response");
        let mut deltas = self.model.generate(messages).await.map_err(SessionError::Model)?;

        self.history.push(Message::user(query));

        let stream = try_stream! {
            let mut answer = String::new();
            while let Some(item) = deltas.next().await {
                match item {
                    Ok(delta) => {
                        answer.push_str(&delta);
                        yield delta;
                    }
                    Err(error) => {
                        warn!(%error, partial_chars = answer.len(), "generation failed mid-stream");
                        let mut recorded = answer.clone();
                        if !recorded.is_empty() {
                            recorded.push('\n');
                        }
                        recorded.push_str(GENERATION_INTERRUPTED_MARKER);
                        self.history.push(Message::assistant(recorded));
                        yield Err(SessionError::Generation {
                            partial: std::mem::take(&mut answer),
                            message: error.to_string(),
                        })?;
                    }
                }
            }
            self.history.push(Message::assistant(answer));
        };

        Ok(Box::pin(stream))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("topic", &self.topic)
            .field("ready", &self.corpus.is_some())
            .field("history_len", &self.history.len())
            .finish()
    }
}
