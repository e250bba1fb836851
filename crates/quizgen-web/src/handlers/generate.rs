use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::response::Html;

use quizgen_core::{ResultWriter, WriteError, derived_stem};

use crate::error::ApiError;
use crate::state::AppState;
use crate::template;
use crate::upload;

/// Full upload-to-artifacts pipeline. The step order is observable
/// through error precedence: file presence, extension allow-list,
/// persistence, extraction, count validation, generation, artifacts.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Html<String>, ApiError> {
    let form = upload::parse_multipart(multipart).await?;

    if form.extension.is_empty() || !state.config.extension_allowed(&form.extension) {
        return Err(ApiError::InvalidFileFormat);
    }

    let upload_path = state.config.upload_dir.join(&form.filename);
    tokio::fs::write(&upload_path, &form.data)
        .await
        .map_err(ApiError::SaveUpload)?;
    tracing::info!(file = %form.filename, bytes = form.data.len(), "upload persisted");

    // Extraction runs before count validation; callers can rely on
    // "Failed to extract text" winning over "Invalid number of questions".
    let extension = form.extension.clone();
    let extract_path = upload_path.clone();
    let text = tokio::task::spawn_blocking(move || quizgen_extract::extract(&extract_path, &extension))
        .await
        .map_err(|e| ApiError::Internal(format!("Task join error: {}", e)))?
        .map_err(|e| {
            tracing::warn!(file = %form.filename, error = %e, "extraction failed");
            ApiError::ExtractionFailed
        })?;
    if text.is_empty() {
        return Err(ApiError::ExtractionFailed);
    }
    tracing::info!(file = %form.filename, chars = text.len(), "extraction complete");

    let count = match form
        .num_questions
        .as_deref()
        .and_then(|v| v.trim().parse::<u32>().ok())
    {
        Some(n) if n >= 1 => n,
        _ => return Err(ApiError::InvalidQuestionCount),
    };

    let mcqs = state.generator.generate(&text, count).await.map_err(|e| {
        tracing::error!(
            backend = state.generator.backend_name(),
            error = %e,
            transient = e.is_transient(),
            "generation failed"
        );
        ApiError::Generation(e)
    })?;
    tracing::info!(
        backend = state.generator.backend_name(),
        chars = mcqs.len(),
        "generation complete"
    );

    let stem = derived_stem(&form.filename);
    let txt_filename = format!("{}.txt", stem);
    let pdf_filename = format!("{}.pdf", stem);

    let writer = ResultWriter::new(state.config.results_dir.clone());
    let content = mcqs.clone();
    let (txt_name, pdf_name) = (txt_filename.clone(), pdf_filename.clone());
    tokio::task::spawn_blocking(move || -> Result<(), WriteError> {
        writer.write_text(&content, &txt_name)?;
        writer.write_pdf(&content, &pdf_name)?;
        Ok(())
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Task join error: {}", e)))??;

    tracing::info!(txt = %txt_filename, pdf = %pdf_filename, "artifacts written");

    Ok(template::render_results(&mcqs, &txt_filename, &pdf_filename))
}
