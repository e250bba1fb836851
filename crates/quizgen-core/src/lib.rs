//! Core engine for document-to-MCQ generation: resolved configuration,
//! the generation backend seam with its Gemini implementation, and the
//! artifact writer that persists generated question sets as text and PDF.

pub mod artifact;
pub mod config;
pub mod config_file;
pub mod generator;
pub mod gemini;
pub mod mock;

pub use artifact::{ResultWriter, WriteError, derived_stem, split_blocks};
pub use config::{Config, DEFAULT_ALLOWED_EXTENSIONS};
pub use gemini::GeminiBackend;
pub use generator::{GenerationBackend, GenerationError, QuestionGenerator, build_prompt};
