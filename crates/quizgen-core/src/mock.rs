//! Mock generation backend for testing.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::generator::{GenerationBackend, GenerationError};

/// A configurable mock response for [`MockGenerator`].
#[derive(Clone, Debug)]
#[allow(dead_code)]
pub enum MockOutcome {
    /// Return this text as the generation result.
    Text(String),
    /// Simulate a 429 rate-limit response (transient).
    RateLimited,
    /// Simulate a permanent failure with this message.
    Error(String),
}

/// A hand-rolled mock implementing [`GenerationBackend`] for tests.
///
/// Supports:
/// - A fixed outcome (used for every call), **or**
/// - A sequence of outcomes (one per call, repeating the last if exhausted).
/// - Optional per-call latency.
/// - Call counting via [`call_count()`](MockGenerator::call_count) and
///   prompt capture via [`prompts()`](MockGenerator::prompts).
pub struct MockGenerator {
    /// If non-empty, each call pops the next outcome.
    outcomes: Mutex<Vec<MockOutcome>>,
    /// Fallback when the sequence is exhausted (or single-outcome mode).
    fallback: MockOutcome,
    delay: Option<Duration>,
    call_count: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    /// Create a mock that always produces `outcome`.
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            outcomes: Mutex::new(Vec::new()),
            fallback: outcome,
            delay: None,
            call_count: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that produces outcomes in order, repeating the last.
    #[allow(dead_code)]
    pub fn with_sequence(mut outcomes: Vec<MockOutcome>) -> Self {
        assert!(!outcomes.is_empty(), "sequence must have at least one outcome");
        // Reverse so we can pop() from the front cheaply.
        outcomes.reverse();
        let fallback = outcomes.first().cloned().unwrap();
        Self {
            outcomes: Mutex::new(outcomes),
            fallback,
            delay: None,
            call_count: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Set simulated network latency per call.
    #[allow(dead_code)]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times `generate()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Every prompt passed to `generate()`, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next_outcome(&self) -> MockOutcome {
        let mut seq = self.outcomes.lock().unwrap();
        if let Some(outcome) = seq.pop() {
            outcome
        } else {
            self.fallback.clone()
        }
    }
}

impl GenerationBackend for MockGenerator {
    fn name(&self) -> &str {
        "Mock"
    }

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        _client: &'a reqwest::Client,
        _timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        let outcome = self.next_outcome();
        let delay = self.delay;

        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }

            match outcome {
                MockOutcome::Text(text) => Ok(text),
                MockOutcome::RateLimited => Err(GenerationError::RateLimited),
                MockOutcome::Error(msg) => Err(GenerationError::MalformedResponse(msg)),
            }
        })
    }
}
