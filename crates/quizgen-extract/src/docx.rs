//! DOCX paragraph extraction.
//!
//! Reads `word/document.xml` out of the OOXML zip container and parses it
//! with SAX-style event processing, emitting one line per paragraph. Empty
//! paragraphs are preserved as blank lines so the document's vertical
//! structure survives into the extracted text.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::ExtractError;

pub fn extract(path: &Path) -> Result<String, ExtractError> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;

    paragraphs_from_xml(&xml)
}

/// Parse WordprocessingML and join paragraph texts with newlines.
///
/// A paragraph's text is the concatenation of its `<w:t>` runs, with
/// `<w:tab/>` as a tab and `<w:br/>`/`<w:cr/>` as newlines. Paragraphs
/// nested inside another (text boxes) are folded into the enclosing one.
fn paragraphs_from_xml(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.config_mut().trim_text(false);

    let mut buf = Vec::with_capacity(4096);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    // Nesting level of <w:p>; text boxes put paragraphs inside paragraphs,
    // and only the outermost close may emit the accumulated line.
    let mut depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:p" => {
                    if depth == 0 {
                        current.clear();
                    }
                    depth += 1;
                }
                b"w:t" if depth > 0 => {
                    in_text = true;
                }
                _ => {}
            },

            Ok(Event::Empty(ref e)) if depth > 0 => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },

            // Self-closing paragraph: present but empty
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"w:p" => {
                paragraphs.push(String::new());
            }

            Ok(Event::Text(ref e)) => {
                if in_text {
                    if let Ok(text) = e.unescape() {
                        current.push_str(&text);
                    }
                }
            }

            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" if depth > 0 => {
                    depth -= 1;
                    if depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                _ => {}
            },

            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs.join("\n"))
}
