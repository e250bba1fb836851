use std::path::Path;

use axum::extract::Multipart;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ApiError;

/// Parsed form fields from the multipart upload.
pub struct UploadForm {
    /// Sanitized filename, safe to join onto the upload directory.
    pub filename: String,
    /// Lowercased final extension of the sanitized filename, possibly empty.
    pub extension: String,
    pub data: Vec<u8>,
    /// Raw `num_questions` field; validated later in the pipeline.
    pub num_questions: Option<String>,
}

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.-]+").unwrap());

/// Reduce a client-supplied filename to a safe basename: drop any path
/// components, then replace runs of characters outside `[A-Za-z0-9_.-]`
/// with a single underscore.
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    UNSAFE_CHARS.replace_all(base, "_").into_owned()
}

/// Parse a multipart form upload into structured form fields.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut num_questions: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Multipart(e.to_string()))?
                    .to_vec();
                if !filename.is_empty() {
                    file = Some((filename, data));
                }
            }
            "num_questions" => {
                let val = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Multipart(e.to_string()))?;
                if !val.is_empty() {
                    num_questions = Some(val);
                }
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    let (raw_filename, data) = file.ok_or(ApiError::NoFileUploaded)?;

    let filename = sanitize_filename(&raw_filename);
    if filename.is_empty() {
        return Err(ApiError::NoFileUploaded);
    }
    let extension = Path::new(&filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    Ok(UploadForm {
        filename,
        extension,
        data,
        num_questions,
    })
}

#[cfg(test)]
mod tests {
    use super::sanitize_filename;

    #[test]
    fn strips_path_components() {
        assert_eq!(sanitize_filename("/etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(sanitize_filename("dir/sub/report.pdf"), "report.pdf");
    }

    #[test]
    fn replaces_unsafe_runs_with_underscore() {
        assert_eq!(sanitize_filename("my report (v2).pdf"), "my_report_v2_.pdf");
        assert_eq!(sanitize_filename("notes.txt"), "notes.txt");
        assert_eq!(sanitize_filename("a b  c.txt"), "a_b_c.txt");
    }

    #[test]
    fn preserves_dots_and_dashes() {
        assert_eq!(sanitize_filename("chapter.1-draft.docx"), "chapter.1-draft.docx");
    }
}
