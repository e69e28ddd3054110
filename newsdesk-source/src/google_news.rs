//! Google News backed corpus source.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use newsdesk_core::{CoreError, CorpusSource, Document, Result as CoreResult};

use crate::config::SourceConfig;
use crate::extract::extract_paragraphs;
use crate::rss::{self, NewsItem};

/// Body substituted for an article that could not be downloaded or parsed.
pub const FAILED_FETCH_PLACEHOLDER: &str = "Failed to retrieve the webpage.";

/// News sites reject the default client identifier outright.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; newsdesk/0.1; +https://github.com/newsdesk-rs)";

/// Failures internal to the source. Per-article failures are absorbed
/// into [`FAILED_FETCH_PLACEHOLDER`] bodies; only feed-level failures
/// escape through [`CorpusSource::fetch`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("feed error: {0}")]
    Feed(String),

    #[error("extraction error: {0}")]
    Extract(String),
}

/// A [`CorpusSource`] that searches the Google News RSS feed for a topic
/// and downloads the linked articles.
///
/// Duplicate headlines are dropped (keeping the freshest copy), redirect
/// tracking suffixes are stripped from links, and a politeness delay is
/// inserted between article downloads.
///
/// # Example
///
/// ```rust,ignore
/// use newsdesk_source::{GoogleNewsSource, SourceConfig};
///
/// let source = GoogleNewsSource::with_config(
///     SourceConfig::default().with_max_documents(5),
/// )?;
/// let documents = source.fetch("Operation Sindoor").await?;
/// ```
pub struct GoogleNewsSource {
    client: reqwest::Client,
    config: SourceConfig,
}

impl GoogleNewsSource {
    /// Create a source with the default configuration.
    pub fn new() -> CoreResult<Self> {
        Self::with_config(SourceConfig::default())
    }

    /// Create a source with the given configuration.
    pub fn with_config(config: SourceConfig) -> CoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CoreError::Source(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    async fn search_feed(&self, topic: &str) -> Result<Vec<NewsItem>, FetchError> {
        let mut url = reqwest::Url::parse(&self.config.base_url)
            .map_err(|e| FetchError::Feed(format!("invalid base URL: {e}")))?;
        url.set_path("/rss/search");
        url.query_pairs_mut().append_pair("q", topic);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }
        let body = response.text().await?;
        rss::parse_items(&body)
    }

    async fn download_article(&self, link: &str) -> Result<String, FetchError> {
        let response = self.client.get(link).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }
        let html = response.text().await?;
        extract_paragraphs(&html)
    }
}

#[async_trait]
impl CorpusSource for GoogleNewsSource {
    async fn fetch(&self, topic: &str) -> CoreResult<Vec<Document>> {
        info!(topic, "searching news feed");
        let items = self
            .search_feed(topic)
            .await
            .map_err(|e| CoreError::Source(format!("feed search failed: {e}")))?;

        let items = rss::dedupe_by_title(items);
        let selected: Vec<NewsItem> =
            items.into_iter().take(self.config.max_documents).collect();
        info!(article_count = selected.len(), "downloading articles");

        let mut documents = Vec::with_capacity(selected.len());
        for (i, item) in selected.iter().enumerate() {
            if i > 0 && !self.config.politeness_delay.is_zero() {
                tokio::time::sleep(self.config.politeness_delay).await;
            }

            let link = rss::clean_link(&item.link);
            let text = match self.download_article(link).await {
                Ok(text) => {
                    debug!(link, chars = text.len(), "article extracted");
                    text
                }
                Err(error) => {
                    warn!(link, %error, "article fetch failed, using placeholder");
                    FAILED_FETCH_PLACEHOLDER.to_string()
                }
            };
            documents.push(Document::new(text, link));
        }

        Ok(documents)
    }
}
