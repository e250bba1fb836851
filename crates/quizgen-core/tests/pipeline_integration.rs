//! End-to-end pipeline tests: extract a source document, generate
//! questions through the [`QuestionGenerator`], and write both result
//! artifacts.
//!
//! These tests use a [`MockGenerator`] backend so no HTTP requests are
//! made.

use std::sync::Arc;
use std::time::Duration;

use quizgen_core::mock::{MockGenerator, MockOutcome};
use quizgen_core::{GenerationError, QuestionGenerator, ResultWriter, derived_stem, split_blocks};
use quizgen_extract::SourceFormat;

/// Two-question response in the expected output format.
const STUB_MCQS: &str = "## MCQ\n\
    Question: What powers the water cycle?\n\
    A) Wind\n\
    B) The sun\n\
    C) Tides\n\
    D) Gravity\n\
    Correct Answer: B\n\n\
    ## MCQ\n\
    Question: What is condensation?\n\
    A) Vapor turning to liquid\n\
    B) Liquid turning to vapor\n\
    C) Ice melting\n\
    D) Rain falling\n\
    Correct Answer: A";

/// Build a generator backed by a mock that always returns [`STUB_MCQS`].
fn stub_generator() -> (Arc<MockGenerator>, QuestionGenerator) {
    let mock = Arc::new(MockGenerator::new(MockOutcome::Text(STUB_MCQS.to_string())));
    let generator = QuestionGenerator::new(mock.clone(), Duration::from_secs(5));
    (mock, generator)
}

#[tokio::test]
async fn text_document_flows_through_to_both_artifacts() {
    let source_dir = tempfile::tempdir().expect("create source dir");
    let results_dir = tempfile::tempdir().expect("create results dir");

    let source = source_dir.path().join("water_cycle.txt");
    std::fs::write(&source, "Evaporation lifts water into the atmosphere.")
        .expect("write source");

    let format = SourceFormat::from_path(&source).expect("txt is a known format");
    let text = quizgen_extract::extract_text(&source, format).expect("extract");
    assert!(text.contains("Evaporation"));

    let (mock, generator) = stub_generator();
    let mcqs = generator.generate(&text, 2).await.expect("generate");

    let stem = derived_stem("water_cycle.txt");
    let writer = ResultWriter::new(results_dir.path());
    let txt_path = writer
        .write_text(&mcqs, &format!("{stem}.txt"))
        .expect("write text artifact");
    let pdf_path = writer
        .write_pdf(&mcqs, &format!("{stem}.pdf"))
        .expect("write pdf artifact");

    assert_eq!(txt_path.file_name().unwrap(), "mcqs_water_cycle.txt");
    assert_eq!(pdf_path.file_name().unwrap(), "mcqs_water_cycle.pdf");

    let written = std::fs::read_to_string(&txt_path).expect("read back text");
    assert_eq!(written, STUB_MCQS);
    assert_eq!(split_blocks(&written).len(), 2);

    let pdf_bytes = std::fs::read(&pdf_path).expect("read back pdf");
    assert!(pdf_bytes.starts_with(b"%PDF"));

    // The prompt sent to the backend carries the extracted document text
    // and the requested count.
    let prompts = mock.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Generate 2 multiple-choice questions"));
    assert!(prompts[0].contains("Evaporation lifts water into the atmosphere."));
}

#[tokio::test]
async fn rate_limited_backend_surfaces_transient_error() {
    let mock = Arc::new(MockGenerator::new(MockOutcome::RateLimited));
    let generator = QuestionGenerator::new(mock.clone(), Duration::from_secs(5));

    let err = generator
        .generate("Some document text.", 3)
        .await
        .expect_err("rate limit should fail generation");
    assert!(matches!(err, GenerationError::RateLimited));
    assert!(err.is_transient());
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn rewriting_same_stem_replaces_previous_artifact() {
    let results_dir = tempfile::tempdir().expect("create results dir");
    let mock = Arc::new(MockGenerator::with_sequence(vec![
        MockOutcome::Text("## MCQ\nQuestion: First run?\nCorrect Answer: A".to_string()),
        MockOutcome::Text("## MCQ\nQuestion: Second run?\nCorrect Answer: B".to_string()),
    ]));
    let generator = QuestionGenerator::new(mock.clone(), Duration::from_secs(5));
    let writer = ResultWriter::new(results_dir.path());

    for _ in 0..2 {
        let mcqs = generator
            .generate("Lecture notes.", 1)
            .await
            .expect("generate");
        writer
            .write_text(&mcqs, "mcqs_notes.txt")
            .expect("write text artifact");
    }

    assert_eq!(mock.call_count(), 2);
    let written = std::fs::read_to_string(results_dir.path().join("mcqs_notes.txt"))
        .expect("read back text");
    assert!(written.contains("Second run?"));
    assert!(!written.contains("First run?"));
}
