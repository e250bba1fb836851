//! HTML text extraction.

use std::path::Path;

use crate::ExtractError;

pub fn extract(path: &Path) -> Result<String, ExtractError> {
    let html = std::fs::read_to_string(path)?;
    Ok(text_from_html(&html))
}

/// Collect the visible text of the document body: every text node outside
/// `script`/`style`/`noscript`, trimmed, non-empty chunks joined with
/// newlines. A body without text yields the empty string.
fn text_from_html(html: &str) -> String {
    let document = scraper::Html::parse_document(html);
    let body_sel = scraper::Selector::parse("body").unwrap();

    let Some(body) = document.select(&body_sel).next() else {
        return String::new();
    };

    let mut chunks: Vec<&str> = Vec::new();
    for node in body.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| matches!(e.name(), "script" | "style" | "noscript"))
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed);
        }
    }

    chunks.join("\n")
}
