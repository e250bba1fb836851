//! The generation seam: a backend trait over the remote LLM service and
//! the driver that feeds it the fixed prompt template.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

/// A generation failure, split into transient and permanent classes.
///
/// The service performs no retries; the split exists so callers and logs
/// can tell "try again later" apart from "fix your configuration".
#[derive(Error, Debug, Clone)]
pub enum GenerationError {
    /// HTTP 429 from the remote service.
    #[error("rate limited (429)")]
    RateLimited,
    /// Timeout or connection failure before a response arrived.
    #[error("request failed: {0}")]
    Transport(String),
    /// No API key configured.
    #[error("no API key configured for the generation service")]
    MissingApiKey,
    /// The service rejected the credentials (401/403).
    #[error("authentication rejected: HTTP {0}")]
    AuthRejected(u16),
    /// Any other non-success HTTP status.
    #[error("HTTP {0}")]
    Http(u16),
    /// Response body did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// Response carried no candidates.
    #[error("response contained no candidates")]
    Empty,
}

impl GenerationError {
    /// Whether an identical future call could plausibly succeed.
    /// Server-side statuses (5xx) count as transient; everything that
    /// needs operator or client action is permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            GenerationError::RateLimited | GenerationError::Transport(_) => true,
            GenerationError::Http(status) => *status >= 500,
            GenerationError::MissingApiKey
            | GenerationError::AuthRejected(_)
            | GenerationError::MalformedResponse(_)
            | GenerationError::Empty => false,
        }
    }
}

/// Seam over the remote generation service.
///
/// Implementations perform exactly one HTTP round-trip per call; there is
/// no retry policy at any layer.
pub trait GenerationBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        client: &'a reqwest::Client,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>>;
}

/// Build the generation prompt: the requested count and the full document
/// text embedded verbatim (never truncated), plus the output scaffold
/// whose `## MCQ` marker lines the artifact writer splits on.
pub fn build_prompt(text: &str, count: u32) -> String {
    format!(
        "Generate {count} multiple-choice questions (MCQs) based on the text below:\n\
         \n\
         \"\"{text}\"\"\n\
         \n\
         Format:\n\
         ## MCQ\n\
         Question: [Question]\n\
         A) [Option A]\n\
         B) [Option B]\n\
         C) [Option C]\n\
         D) [Option D]\n\
         Correct Answer: [Correct Option]"
    )
}

/// Drives a [`GenerationBackend`] with the fixed prompt template and a
/// shared HTTP client.
pub struct QuestionGenerator {
    backend: Arc<dyn GenerationBackend>,
    client: reqwest::Client,
    timeout: Duration,
}

impl QuestionGenerator {
    pub fn new(backend: Arc<dyn GenerationBackend>, timeout: Duration) -> Self {
        Self {
            backend,
            client: reqwest::Client::new(),
            timeout,
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// One remote call; returns the response text trimmed of surrounding
    /// whitespace. The output is not validated against `count`: the count
    /// shapes the prompt and nothing else. Callers validate `count >= 1`
    /// before reaching this point.
    pub async fn generate(&self, text: &str, count: u32) -> Result<String, GenerationError> {
        let prompt = build_prompt(text, count);
        tracing::debug!(
            backend = self.backend.name(),
            prompt_chars = prompt.len(),
            count,
            "requesting generation"
        );
        let raw = self
            .backend
            .generate(&prompt, &self.client, self.timeout)
            .await?;
        Ok(raw.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::mock::{MockGenerator, MockOutcome};

    use super::*;

    #[test]
    fn test_prompt_embeds_count_and_text() {
        let prompt = build_prompt("The sky is blue.", 7);
        assert!(prompt.starts_with("Generate 7 multiple-choice questions"));
        assert!(prompt.contains("\"\"The sky is blue.\"\""));
        assert!(prompt.contains("## MCQ"));
        assert!(prompt.contains("A) [Option A]"));
        assert!(prompt.contains("D) [Option D]"));
        assert!(prompt.contains("Correct Answer:"));
    }

    #[test]
    fn test_prompt_text_verbatim() {
        let text = "line one\n\n  indented\tand tabbed  ";
        let prompt = build_prompt(text, 1);
        assert!(prompt.contains(text));
    }

    #[tokio::test]
    async fn test_generate_trims_response() {
        let mock = Arc::new(MockGenerator::new(MockOutcome::Text(
            "\n  ## MCQ\nQuestion: Q1\n  ".to_string(),
        )));
        let generator = QuestionGenerator::new(mock.clone(), Duration::from_secs(5));

        let out = generator.generate("some text", 1).await.unwrap();
        assert_eq!(out, "## MCQ\nQuestion: Q1");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generate_whitespace_only_response_trims_to_empty() {
        let mock = Arc::new(MockGenerator::new(MockOutcome::Text(
            " \n\t  \n".to_string(),
        )));
        let generator = QuestionGenerator::new(mock, Duration::from_secs(5));

        let out = generator.generate("some text", 1).await.unwrap();
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn test_generate_passes_full_prompt() {
        let mock = Arc::new(MockGenerator::new(MockOutcome::Text("ok".to_string())));
        let generator = QuestionGenerator::new(mock.clone(), Duration::from_secs(5));

        generator.generate("document body", 3).await.unwrap();

        let prompts = mock.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Generate 3 multiple-choice"));
        assert!(prompts[0].contains("document body"));
    }

    #[tokio::test]
    async fn test_generate_propagates_backend_error() {
        let mock = Arc::new(MockGenerator::new(MockOutcome::RateLimited));
        let generator = QuestionGenerator::new(mock, Duration::from_secs(5));

        let err = generator.generate("text", 2).await.unwrap_err();
        assert!(matches!(err, GenerationError::RateLimited));
        assert!(err.is_transient());
    }

    #[test]
    fn test_transient_classification() {
        assert!(GenerationError::RateLimited.is_transient());
        assert!(GenerationError::Transport("connection refused".into()).is_transient());
        assert!(GenerationError::Http(503).is_transient());
        assert!(!GenerationError::Http(404).is_transient());
        assert!(!GenerationError::MissingApiKey.is_transient());
        assert!(!GenerationError::AuthRejected(403).is_transient());
        assert!(!GenerationError::Empty.is_transient());
        assert!(!GenerationError::MalformedResponse("bad json".into()).is_transient());
    }
}
