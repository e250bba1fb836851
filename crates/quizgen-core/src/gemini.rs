//! Gemini generation backend (`generateContent` REST endpoint).

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::config::Config;
use crate::generator::{GenerationBackend, GenerationError};

pub struct GeminiBackend {
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiBackend {
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key,
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_key.clone(),
            config.model.clone(),
            config.base_url.clone(),
        )
    }
}

impl GenerationBackend for GeminiBackend {
    fn name(&self) -> &str {
        "Gemini"
    }

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        client: &'a reqwest::Client,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>> {
        Box::pin(async move {
            let api_key = self.api_key.as_deref().ok_or(GenerationError::MissingApiKey)?;

            let url = format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url.trim_end_matches('/'),
                self.model
            );
            let body = serde_json::json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            });

            let resp = client
                .post(&url)
                .header("x-goog-api-key", api_key)
                .json(&body)
                .timeout(timeout)
                .send()
                .await
                .map_err(|e| GenerationError::Transport(e.to_string()))?;

            let status = resp.status();
            if status.as_u16() == 429 {
                return Err(GenerationError::RateLimited);
            }
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(GenerationError::AuthRejected(status.as_u16()));
            }
            if !status.is_success() {
                return Err(GenerationError::Http(status.as_u16()));
            }

            let data: serde_json::Value = resp
                .json()
                .await
                .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

            parse_generate_response(&data)
        })
    }
}

/// Pull the generated text out of a `generateContent` response body:
/// the text of every part of the first candidate, concatenated.
fn parse_generate_response(data: &serde_json::Value) -> Result<String, GenerationError> {
    let candidates = data["candidates"].as_array().ok_or_else(|| {
        GenerationError::MalformedResponse("missing candidates array".to_string())
    })?;
    if candidates.is_empty() {
        return Err(GenerationError::Empty);
    }

    let parts = candidates[0]["content"]["parts"].as_array().ok_or_else(|| {
        GenerationError::MalformedResponse("candidate has no content parts".to_string())
    })?;

    let text: String = parts
        .iter()
        .filter_map(|p| p["text"].as_str())
        .collect();

    Ok(text)
}
