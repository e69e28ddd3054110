//! State-machine and streaming tests for [`Session`].

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::StreamExt;

use newsdesk_core::{ChatModel, CorpusSource, Document, Message, Result as CoreResult};
use newsdesk_model::MockChatModel;
use newsdesk_rag::{EmbeddingProvider, RagConfig, RagError, Result as RagResult};
use newsdesk_session::{
    GENERATION_INTERRUPTED_MARKER, Session, SessionError, SessionManager,
};

/// A corpus source that serves a fixed document set and counts fetches.
struct StaticSource {
    documents: Vec<Document>,
    calls: AtomicUsize,
}

impl StaticSource {
    fn new(documents: Vec<Document>) -> Self {
        Self { documents, calls: AtomicUsize::new(0) }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CorpusSource for StaticSource {
    async fn fetch(&self, _topic: &str) -> CoreResult<Vec<Document>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.documents.clone())
    }
}

/// A deterministic hash embedder that counts how many texts it encodes.
struct CountingEmbedder {
    dimensions: usize,
    calls: AtomicUsize,
}

impl CountingEmbedder {
    fn new() -> Self {
        Self { dimensions: 32, calls: AtomicUsize::new(0) }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for CountingEmbedder {
    fn name(&self) -> &str {
        "counting"
    }

    async fn embed(&self, text: &str) -> RagResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut vector = vec![0.0f32; self.dimensions];
        for (i, v) in vector.iter_mut().enumerate() {
            *v = ((hash.wrapping_add(i as u64)) as f32).sin();
        }
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn news_documents() -> Vec<Document> {
    vec![
        Document::new(
            "The ceasefire was announced on Tuesday after a week of talks between both sides.",
            "https://news.test/a",
        ),
        Document::new(
            "Markets reacted cautiously while ministers briefed reporters on the agreement.",
            "https://news.test/b",
        ),
        Document::new(
            "Analysts expect the situation along the border to remain tense for months.",
            "https://news.test/c",
        ),
    ]
}

struct Fixture {
    source: Arc<StaticSource>,
    embedder: Arc<CountingEmbedder>,
    model: Arc<MockChatModel>,
    session: Session,
}

fn fixture(documents: Vec<Document>, model: MockChatModel) -> Fixture {
    let source = Arc::new(StaticSource::new(documents));
    let embedder = Arc::new(CountingEmbedder::new());
    let model = Arc::new(model);
    let session = Session::new(
        Arc::clone(&source) as Arc<dyn CorpusSource>,
        Arc::clone(&embedder) as Arc<dyn EmbeddingProvider>,
        Arc::clone(&model) as Arc<dyn ChatModel>,
        RagConfig::default(),
    );
    Fixture { source, embedder, model, session }
}

async fn collect(stream: &mut newsdesk_session::AnswerStream<'_>) -> (Vec<String>, Option<SessionError>) {
    let mut deltas = Vec::new();
    while let Some(item) = stream.next().await {
        match item {
            Ok(delta) => deltas.push(delta),
            Err(error) => return (deltas, Some(error)),
        }
    }
    (deltas, None)
}

#[tokio::test]
async fn follow_up_on_fresh_session_fails_without_any_calls() {
    let mut fx = fixture(news_documents(), MockChatModel::new(["unused"]));

    let result = fx.session.run_follow_up("Why did this happen?", "Answer the question.").await;
    assert!(matches!(result, Err(SessionError::Uninitialized)));

    assert_eq!(fx.source.calls(), 0);
    assert_eq!(fx.embedder.calls(), 0);
    assert_eq!(fx.model.calls(), 0);
    assert!(!fx.session.is_ready());
    assert!(fx.session.history().is_empty());
}

#[tokio::test]
async fn empty_corpus_aborts_pipeline_and_stays_uninitialized() {
    let mut fx = fixture(Vec::new(), MockChatModel::new(["unused"]));

    let result = fx.session.run_pipeline("ghost topic", "Summarize this context").await;
    assert!(matches!(result, Err(SessionError::Rag(RagError::EmptyCorpus))));

    assert!(!fx.session.is_ready());
    assert!(fx.session.history().is_empty());
    assert_eq!(fx.model.calls(), 0);
}

#[tokio::test]
async fn pipeline_streams_answer_and_records_history() {
    let mut fx =
        fixture(news_documents(), MockChatModel::new(["Head", "line: X. ", "Body text."]));

    let mut stream =
        fx.session.run_pipeline("ceasefire talks", "Summarize this context").await.unwrap();
    let (deltas, error) = collect(&mut stream).await;
    drop(stream);

    assert!(error.is_none());
    assert_eq!(deltas, vec!["Head", "line: X. ", "Body text."]);

    assert!(fx.session.is_ready());
    assert_eq!(fx.session.topic(), Some("ceasefire talks"));
    assert_eq!(
        fx.session.history(),
        &[Message::user("ceasefire talks"), Message::assistant("Headline: X. Body text.")]
    );
    assert_eq!(fx.source.calls(), 1);
}

#[tokio::test]
async fn concatenated_deltas_equal_the_unstreamed_answer() {
    let model = MockChatModel::new(["A ", "quiet ", "day ", "on ", "the ", "border."]);
    let expected = model.full_text();
    let mut fx = fixture(news_documents(), model);

    let mut stream = fx.session.run_pipeline("border", "Summarize this context").await.unwrap();
    let (deltas, error) = collect(&mut stream).await;
    drop(stream);

    assert!(error.is_none());
    assert_eq!(deltas.concat(), expected);
}

#[tokio::test]
async fn follow_up_reuses_the_corpus_without_refetching() {
    let mut fx = fixture(news_documents(), MockChatModel::new(["answer"]));

    let mut stream =
        fx.session.run_pipeline("ceasefire talks", "Summarize this context").await.unwrap();
    let _ = collect(&mut stream).await;
    drop(stream);

    let embeds_after_build = fx.embedder.calls();

    let mut stream = fx
        .session
        .run_follow_up("Why did this happen?", "Answer the question using the context.")
        .await
        .unwrap();
    let (deltas, error) = collect(&mut stream).await;
    drop(stream);

    assert!(error.is_none());
    assert_eq!(deltas, vec!["answer"]);

    // One fetch total, and only the query was re-encoded.
    assert_eq!(fx.source.calls(), 1);
    assert_eq!(fx.embedder.calls(), embeds_after_build + 1);

    assert_eq!(fx.session.history().len(), 4);
    assert_eq!(fx.session.history()[2], Message::user("Why did this happen?"));
    assert_eq!(fx.session.history()[3], Message::assistant("answer"));
}

#[tokio::test]
async fn identical_follow_ups_build_identical_prompts() {
    let mut fx = fixture(news_documents(), MockChatModel::new(["answer"]));

    let mut stream =
        fx.session.run_pipeline("ceasefire talks", "Summarize this context").await.unwrap();
    let _ = collect(&mut stream).await;
    drop(stream);

    for _ in 0..2 {
        let mut stream = fx
            .session
            .run_follow_up("Why did this happen?", "Answer the question.")
            .await
            .unwrap();
        let _ = collect(&mut stream).await;
        drop(stream);
    }

    let requests = fx.model.requests();
    assert_eq!(requests.len(), 3);
    // The two follow-ups retrieved identical context in identical order.
    assert_eq!(requests[1], requests[2]);
    assert!(
        requests[1][1]
            .content
            .starts_with("Here is the context\u{2014}do not hallucinate.\ncontext: ")
    );
}

#[tokio::test]
async fn mid_stream_failure_preserves_partial_text() {
    let model = MockChatModel::new(["Head", "line: X. ", "Body text."]).failing_after(3);
    let mut fx = fixture(news_documents(), model);

    let mut stream =
        fx.session.run_pipeline("ceasefire talks", "Summarize this context").await.unwrap();
    let (deltas, error) = collect(&mut stream).await;
    drop(stream);

    assert_eq!(deltas, vec!["Head", "line: X. ", "Body text."]);
    match error {
        Some(SessionError::Generation { partial, .. }) => {
            assert_eq!(partial, "Headline: X. Body text.");
        }
        other => panic!("expected Generation error, got {other:?}"),
    }

    // The corpus survived the failure and the history keeps the partial
    // answer with the marker.
    assert!(fx.session.is_ready());
    let last = fx.session.history().last().unwrap();
    assert_eq!(
        last.content,
        format!("Headline: X. Body text.\n{GENERATION_INTERRUPTED_MARKER}")
    );
}

#[tokio::test]
async fn second_pipeline_run_is_rejected() {
    let mut fx = fixture(news_documents(), MockChatModel::new(["answer"]));

    let mut stream =
        fx.session.run_pipeline("ceasefire talks", "Summarize this context").await.unwrap();
    let _ = collect(&mut stream).await;
    drop(stream);

    let result = fx.session.run_pipeline("another topic", "Summarize this context").await;
    assert!(matches!(result, Err(SessionError::AlreadyInitialized)));
    assert_eq!(fx.session.topic(), Some("ceasefire talks"));
}

#[tokio::test]
async fn manager_keys_sessions_and_discards_explicitly() {
    let manager = SessionManager::new();
    let fx = fixture(news_documents(), MockChatModel::new(["answer"]));

    let id = manager.insert(fx.session).await;
    assert_eq!(manager.len().await, 1);

    let handle = manager.get(&id).await.expect("session should be registered");
    {
        let mut session = handle.lock().await;
        let mut stream =
            session.run_pipeline("ceasefire talks", "Summarize this context").await.unwrap();
        let (deltas, error) = collect(&mut stream).await;
        drop(stream);
        assert!(error.is_none());
        assert_eq!(deltas, vec!["answer"]);
    }

    assert!(manager.get("no-such-id").await.is_none());
    assert!(manager.remove(&id).await);
    assert!(manager.is_empty().await);
}
