//! Artifact persistence: the generated question set written as a plain
//! text file and as a rendered PDF, both under derived filenames in the
//! configured results directory.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, Mm, PdfDocument, PdfLayerReference};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF render error: {0}")]
    Render(String),
}

// Page geometry in millimeters, mirroring the layout of the text cells:
// A4, 10mm side margins, 10mm line advance, 5mm gap between blocks.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const BOTTOM_MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 10.0;
const BLOCK_GAP_MM: f32 = 5.0;
const FONT_SIZE_PT: f32 = 12.0;
const MAX_LINE_CHARS: usize = 90;

/// Artifact stem for an upload: the fixed `mcqs_` tag plus the upload's
/// filename with its final extension dropped.
pub fn derived_stem(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    format!("mcqs_{stem}")
}

/// Split generated content on the literal `## MCQ` marker, trimming each
/// segment and dropping whitespace-only ones. The internal structure of
/// a segment is not interpreted.
pub fn split_blocks(content: &str) -> Vec<String> {
    content
        .split("## MCQ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Writes generated question sets into the results directory.
///
/// Writes are plain create-and-truncate: the same filename overwrites,
/// concurrent writers race with last-writer-wins, and nothing cleans up
/// a text artifact whose PDF sibling failed.
pub struct ResultWriter {
    results_dir: PathBuf,
}

impl ResultWriter {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    /// Write the content verbatim as UTF-8. Returns the artifact path.
    pub fn write_text(&self, content: &str, filename: &str) -> Result<PathBuf, WriteError> {
        let path = self.results_dir.join(filename);
        let mut file = File::create(&path)?;
        file.write_all(content.as_bytes())?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote text artifact");
        Ok(path)
    }

    /// Render the content as a PDF: one paragraph block per `## MCQ`
    /// segment, Helvetica 12pt, lines wrapped at word boundaries, a fixed
    /// gap after each block, and automatic page breaks.
    pub fn write_pdf(&self, content: &str, filename: &str) -> Result<PathBuf, WriteError> {
        let path = self.results_dir.join(filename);

        let (doc, first_page, first_layer) = PdfDocument::new(
            "Generated MCQs",
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "content",
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| WriteError::Render(e.to_string()))?;

        let mut layer = doc.get_page(first_page).get_layer(first_layer);
        let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

        for block in split_blocks(content) {
            for raw_line in block.lines() {
                if raw_line.trim().is_empty() {
                    y -= LINE_HEIGHT_MM;
                    continue;
                }
                for line in wrap_text(raw_line, MAX_LINE_CHARS) {
                    y -= LINE_HEIGHT_MM;
                    if y < BOTTOM_MARGIN_MM {
                        layer = add_page(&doc);
                        y = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM;
                    }
                    layer.use_text(line, FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
                }
            }
            y -= BLOCK_GAP_MM;
        }

        let file = File::create(&path)?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| WriteError::Render(e.to_string()))?;
        tracing::debug!(path = %path.display(), "wrote PDF artifact");
        Ok(path)
    }
}

fn add_page(doc: &printpdf::PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
    doc.get_page(page).get_layer(layer)
}

/// Wrap a single line at word boundaries to at most `max_chars`
/// characters, hard-splitting tokens longer than the limit.
fn wrap_text(line: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_chars) {
                if chunk.len() == max_chars {
                    lines.push(chunk.iter().collect());
                } else {
                    current = chunk.iter().collect();
                }
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word_len > max_chars {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
