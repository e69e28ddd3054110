//! Groq / OpenAI-compatible streaming chat client.

use async_stream::try_stream;
use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use newsdesk_core::{ChatModel, CoreError, Message, Result, TextDeltaStream};

/// Default API base for Groq's OpenAI-compatible endpoint.
pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

const DEFAULT_MODEL: &str = "llama3-70b-8192";
const DEFAULT_TEMPERATURE: f32 = 0.2;
const DEFAULT_TOP_P: f32 = 1.0;

/// A streaming [`ChatModel`] over the OpenAI-compatible chat completions
/// protocol, pointed at Groq by default.
///
/// Responses are requested with `stream: true` and decoded from
/// server-sent events; each event carries one delta and the stream ends at
/// the `[DONE]` sentinel. Any OpenAI-compatible service works via
/// [`with_base_url`](GroqChatModel::with_base_url).
///
/// # Example
///
/// ```rust,ignore
/// use newsdesk_model::GroqChatModel;
///
/// let model = GroqChatModel::from_env()?.with_model("llama3-8b-8192");
/// let deltas = model.generate(messages).await?;
/// ```
pub struct GroqChatModel {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    top_p: f32,
}

impl GroqChatModel {
    /// Create a client with the given API key and default model.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Model`] if the key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(CoreError::Model("API key must not be empty".into()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: GROQ_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
        })
    }

    /// Create a client from the `GROQ_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| CoreError::Model("GROQ_API_KEY environment variable not set".into()))?;
        Self::new(api_key)
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the client at a different OpenAI-compatible service.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the nucleus sampling parameter.
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    top_p: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChunk {
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    delta: ChunkDelta,
}

#[derive(Debug, Deserialize, Default)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl ChatModel for GroqChatModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, messages: Vec<Message>) -> Result<TextDeltaStream> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
            top_p: self.top_p,
            stream: true,
        };
        let url = self.endpoint();
        let client = self.client.clone();
        let api_key = self.api_key.clone();
        let model = self.model.clone();

        let stream = try_stream! {
            debug!(%model, "starting streaming completion");

            let response = client
                .post(&url)
                .bearer_auth(&api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| CoreError::Model(format!("request failed: {e}")))?;

            if !response.status().is_success() {
                let status = response.status();
                let detail = response.text().await.unwrap_or_default();
                yield Err(CoreError::Model(format!("API returned {status}: {detail}")))?;
            }

            let mut events = response.bytes_stream().eventsource();
            while let Some(event) = events.next().await {
                let event =
                    event.map_err(|e| CoreError::Model(format!("stream error: {e}")))?;
                if event.data == "[DONE]" {
                    break;
                }

                let chunk: ChatCompletionChunk = serde_json::from_str(&event.data)
                    .map_err(|e| CoreError::Model(format!("malformed stream payload: {e}")))?;
                if let Some(delta) =
                    chunk.choices.into_iter().next().and_then(|c| c.delta.content)
                {
                    if !delta.is_empty() {
                        yield delta;
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_api_key() {
        assert!(GroqChatModel::new("").is_err());
    }

    #[test]
    fn request_body_is_openai_compatible() {
        let body = ChatRequest {
            model: DEFAULT_MODEL.to_string(),
            messages: vec![Message::system("sys"), Message::user("hi")],
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            stream: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama3-70b-8192");
        assert_eq!(json["stream"], true);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }

    #[test]
    fn delta_payload_parses() {
        let data = r#"{"id":"cmpl-1","choices":[{"index":0,"delta":{"content":"Head"}}]}"#;
        let chunk: ChatCompletionChunk = serde_json::from_str(data).unwrap();
        assert_eq!(chunk.choices[0].delta.content.as_deref(), Some("Head"));

        // Final chunks carry an empty delta.
        let data = r#"{"id":"cmpl-1","choices":[{"index":0,"delta":{},"finish_reason":"stop"}]}"#;
        let chunk: ChatCompletionChunk = serde_json::from_str(data).unwrap();
        assert!(chunk.choices[0].delta.content.is_none());
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let model = GroqChatModel::new("key").unwrap().with_base_url("http://localhost:1234/v1/");
        assert_eq!(model.endpoint(), "http://localhost:1234/v1/chat/completions");
    }
}
