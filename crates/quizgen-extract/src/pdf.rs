//! PDF text-layer extraction.

use std::path::Path;

use lopdf::Document;

use crate::ExtractError;

/// Extract the text layer of every page, in document order, joined with
/// newlines. Pages whose text layer is empty (scanned images, blank
/// pages) are skipped rather than contributing blank lines.
pub fn extract(path: &Path) -> Result<String, ExtractError> {
    let doc = Document::load(path).map_err(|e| ExtractError::Pdf(e.to_string()))?;

    let mut pages: Vec<String> = Vec::new();
    for page_num in doc.get_pages().keys() {
        let text = doc
            .extract_text(&[*page_num])
            .map_err(|e| ExtractError::Pdf(format!("page {page_num}: {e}")))?;
        let text = text.trim_end();
        if !text.is_empty() {
            pages.push(text.to_string());
        }
    }

    Ok(pages.join("\n"))
}
