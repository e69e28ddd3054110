//! Command-line front end: fetch news for a topic, stream a summary, then
//! optionally stream an answer to one follow-up question against the same
//! corpus.
//!
//! ```text
//! GROQ_API_KEY=... newsdesk "Operation Sindoor" "Why did this happen?"
//! ```
//!
//! Generation needs `GROQ_API_KEY`. With `OPENAI_API_KEY` set, chunks are
//! embedded through the OpenAI embeddings API; without it a deterministic
//! offline embedder is used, which keeps the demo runnable but makes
//! retrieval keyword-blind.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use futures::StreamExt;
use tracing::warn;

use newsdesk_core::{ChatModel, CorpusSource};
use newsdesk_model::GroqChatModel;
use newsdesk_rag::{EmbeddingProvider, HashEmbeddingProvider, HttpEmbeddingProvider, RagConfig};
use newsdesk_session::{AnswerStream, Session, SessionManager};
use newsdesk_source::GoogleNewsSource;

async fn print_stream(stream: &mut AnswerStream<'_>) -> anyhow::Result<()> {
    while let Some(delta) = stream.next().await {
        print!("{}", delta?);
        std::io::stdout().flush()?;
    }
    println!();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let topic = args.next().context("usage: newsdesk <topic> [follow-up question]")?;
    let follow_up = args.next();

    let source: Arc<dyn CorpusSource> = Arc::new(GoogleNewsSource::new()?);
    let embedder: Arc<dyn EmbeddingProvider> = match HttpEmbeddingProvider::from_env() {
        Ok(provider) => Arc::new(provider),
        Err(_) => {
            warn!("OPENAI_API_KEY not set; falling back to offline hash embeddings");
            Arc::new(HashEmbeddingProvider::default())
        }
    };
    let model: Arc<dyn ChatModel> = Arc::new(GroqChatModel::from_env()?);

    let manager = SessionManager::new();
    let id = manager
        .insert(Session::new(source, embedder, model, RagConfig::default()))
        .await;
    let handle = manager.get(&id).await.context("session vanished from the registry")?;
    let mut session = handle.lock().await;

    println!("{topic}");
    let mut stream = session.run_pipeline(&topic, "Summarize this context").await?;
    print_stream(&mut stream).await?;
    drop(stream);

    if let Some(question) = follow_up {
        println!("{question}");
        let mut stream = session
            .run_follow_up(&question, "Answer the question using the context.")
            .await?;
        print_stream(&mut stream).await?;
    }

    Ok(())
}
