use quizgen_core::{Config, QuestionGenerator};

/// Shared application state, one instance behind an `Arc` for all handlers.
pub struct AppState {
    pub config: Config,
    pub generator: QuestionGenerator,
}
