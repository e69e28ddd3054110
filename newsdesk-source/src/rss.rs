//! RSS feed parsing.

use serde::Deserialize;

use crate::google_news::FetchError;

/// One feed entry: a headline and the link to the full article.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
}

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Option<Channel>,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
}

/// Parse the items of an RSS search feed.
///
/// Entries without a link are dropped; a feed without a channel yields no
/// items rather than an error.
pub fn parse_items(xml: &str) -> Result<Vec<NewsItem>, FetchError> {
    let rss: Rss = quick_xml::de::from_str(xml)
        .map_err(|e| FetchError::Feed(format!("malformed RSS: {e}")))?;

    let items = rss
        .channel
        .map(|channel| channel.item)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| {
            let link = item.link?;
            Some(NewsItem { title: item.title.unwrap_or_default(), link })
        })
        .collect();
    Ok(items)
}

/// Drop entries whose headline repeats an earlier or later entry's
/// headline, keeping the last occurrence. Syndicated stories show up many
/// times under the same headline; keeping the freshest copy matches how
/// the feed orders updates.
pub fn dedupe_by_title(items: Vec<NewsItem>) -> Vec<NewsItem> {
    use std::collections::HashMap;

    let mut last_occurrence: HashMap<&str, usize> = HashMap::new();
    for (i, item) in items.iter().enumerate() {
        last_occurrence.insert(item.title.as_str(), i);
    }

    let keep: Vec<bool> =
        items.iter().enumerate().map(|(i, item)| last_occurrence[item.title.as_str()] == i).collect();

    items.into_iter().zip(keep).filter_map(|(item, keep)| keep.then_some(item)).collect()
}

/// Strip the redirect-tracking suffix some aggregators append to links.
pub fn clean_link(link: &str) -> &str {
    match link.split_once("&ved") {
        Some((head, _)) => head,
        None => link,
    }
}
