//! # newsdesk-source
//!
//! A [`CorpusSource`](newsdesk_core::CorpusSource) that turns a topic into
//! documents by searching the Google News RSS feed and downloading the
//! linked articles.
//!
//! Individual articles fail often (paywalls, timeouts, bot walls). Those
//! failures degrade to a placeholder body for that one document and the
//! fetch continues; only a failure of the feed search itself is an error.

pub mod config;
pub mod extract;
pub mod google_news;
pub mod rss;

pub use config::SourceConfig;
pub use google_news::{FAILED_FETCH_PLACEHOLDER, GoogleNewsSource};
