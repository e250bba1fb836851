use std::path::Path;

use thiserror::Error;

pub mod docx;
pub mod html;
pub mod pdf;
pub mod table;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("DOCX container error: {0}")]
    Docx(String),
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A supported upload format, determined solely by the declared file
/// extension. The set is closed: anything outside it is handled as the
/// explicit "no extractable text" case, never as a fallback strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Pdf,
    Docx,
    Txt,
    Html,
    Xlsx,
    Csv,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 6] = [
        SourceFormat::Pdf,
        SourceFormat::Txt,
        SourceFormat::Docx,
        SourceFormat::Html,
        SourceFormat::Xlsx,
        SourceFormat::Csv,
    ];

    /// Resolve a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<SourceFormat> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(SourceFormat::Pdf),
            "docx" => Some(SourceFormat::Docx),
            "txt" => Some(SourceFormat::Txt),
            "html" => Some(SourceFormat::Html),
            "xlsx" => Some(SourceFormat::Xlsx),
            "csv" => Some(SourceFormat::Csv),
            _ => None,
        }
    }

    /// Resolve a format from the final extension of a path.
    pub fn from_path(path: &Path) -> Option<SourceFormat> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(SourceFormat::from_extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::Pdf => "pdf",
            SourceFormat::Docx => "docx",
            SourceFormat::Txt => "txt",
            SourceFormat::Html => "html",
            SourceFormat::Xlsx => "xlsx",
            SourceFormat::Csv => "csv",
        }
    }
}

/// Extract plain text from a stored upload, dispatching on the declared
/// extension.
///
/// An extension outside [`SourceFormat`] yields `Ok("")`: the caller
/// decides what an empty result means (the web layer rejects it). Content
/// is never sniffed; a `.txt` file containing PDF bytes is read as text.
pub fn extract(path: &Path, extension: &str) -> Result<String, ExtractError> {
    match SourceFormat::from_extension(extension) {
        Some(format) => extract_text(path, format),
        None => Ok(String::new()),
    }
}

/// Extract plain text with a known format.
pub fn extract_text(path: &Path, format: SourceFormat) -> Result<String, ExtractError> {
    tracing::debug!(?format, path = %path.display(), "extracting text");
    match format {
        SourceFormat::Pdf => pdf::extract(path),
        SourceFormat::Docx => docx::extract(path),
        SourceFormat::Txt => Ok(std::fs::read_to_string(path)?),
        SourceFormat::Html => html::extract(path),
        SourceFormat::Xlsx => table::extract_xlsx(path),
        SourceFormat::Csv => table::extract_csv(path),
    }
}
