//! Article text extraction built on `lol_html`.

use std::cell::RefCell;
use std::sync::OnceLock;

use lol_html::{HtmlRewriter, Settings, text};
use regex::Regex;

use crate::google_news::FetchError;

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static pattern"))
}

/// Collect the text of every `<p>` element in an HTML page into one
/// whitespace-normalized string.
///
/// News pages keep the article body in paragraph elements; navigation,
/// scripts, and anything outside `<p>` is ignored. Runs of whitespace are
/// collapsed to single spaces so chunk windows are not wasted on
/// formatting.
pub fn extract_paragraphs(html: &str) -> Result<String, FetchError> {
    let collected = RefCell::new(String::new());

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![text!("p", |chunk| {
                let mut buffer = collected.borrow_mut();
                buffer.push_str(chunk.as_str());
                if chunk.last_in_text_node() {
                    buffer.push(' ');
                }
                Ok(())
            })],
            ..Settings::default()
        },
        |_: &[u8]| {},
    );

    rewriter
        .write(html.as_bytes())
        .and_then(|()| rewriter.end())
        .map_err(|e| FetchError::Extract(e.to_string()))?;

    let collected = collected.into_inner();
    Ok(whitespace_run().replace_all(&collected, " ").trim().to_string())
}
