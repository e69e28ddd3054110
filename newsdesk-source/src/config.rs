//! Corpus source configuration.

use std::time::Duration;

/// Tunables for [`crate::GoogleNewsSource`].
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Base URL of the news feed service.
    pub base_url: String,
    /// Maximum number of articles to download per topic.
    pub max_documents: usize,
    /// Per-request timeout for feed and article downloads.
    pub request_timeout: Duration,
    /// Pause between consecutive article downloads.
    pub politeness_delay: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://news.google.com".to_string(),
            max_documents: 10,
            request_timeout: Duration::from_secs(10),
            politeness_delay: Duration::from_secs(1),
        }
    }
}

impl SourceConfig {
    /// Set the maximum number of articles to download per topic.
    pub fn with_max_documents(mut self, max_documents: usize) -> Self {
        self.max_documents = max_documents;
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the pause between consecutive article downloads.
    pub fn with_politeness_delay(mut self, delay: Duration) -> Self {
        self.politeness_delay = delay;
        self
    }

    /// Point the source at a different feed endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
