use std::path::PathBuf;
use std::time::Duration;

use crate::config_file::{self, ConfigFile};

/// Upload extensions accepted when no allow-list is configured.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["pdf", "txt", "docx", "html", "xlsx", "csv"];

/// Resolved runtime configuration.
///
/// Built once at startup from defaults, config files and the environment,
/// then injected into the generator, the writer and the request handlers.
/// Nothing reads configuration from globals.
#[derive(Debug, Clone)]
pub struct Config {
    /// Key for the remote generation service. `None` means generation
    /// fails permanently at request time (startup still succeeds).
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Per-request timeout on the generation HTTP call.
    pub timeout: Duration,
    pub upload_dir: PathBuf,
    pub results_dir: PathBuf,
    /// Lowercased upload extension allow-list.
    pub allowed_extensions: Vec<String>,
    /// Request body cap for the web surface, in megabytes.
    pub max_upload_mb: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-1.5-pro".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(120),
            upload_dir: PathBuf::from("uploads"),
            results_dir: PathBuf::from("results"),
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            max_upload_mb: 50,
        }
    }
}

impl Config {
    /// Resolve configuration from all sources. Precedence, highest first:
    /// environment, CWD `quizgen.toml`, platform config file, defaults.
    pub fn load() -> Config {
        Config::from_file(config_file::load_config()).with_env_overrides()
    }

    /// Overlay an on-disk config over the defaults.
    pub fn from_file(file: ConfigFile) -> Config {
        let mut config = Config::default();

        if let Some(service) = file.service {
            if let Some(key) = service.api_key {
                config.api_key = Some(key);
            }
            if let Some(model) = service.model {
                config.model = model;
            }
            if let Some(url) = service.base_url {
                config.base_url = url;
            }
            if let Some(secs) = service.timeout_secs {
                config.timeout = Duration::from_secs(secs);
            }
        }
        if let Some(storage) = file.storage {
            if let Some(dir) = storage.upload_dir {
                config.upload_dir = PathBuf::from(dir);
            }
            if let Some(dir) = storage.results_dir {
                config.results_dir = PathBuf::from(dir);
            }
        }
        if let Some(uploads) = file.uploads {
            if let Some(exts) = uploads.allowed_extensions {
                config.allowed_extensions = exts.iter().map(|e| e.to_lowercase()).collect();
            }
            if let Some(mb) = uploads.max_upload_mb {
                config.max_upload_mb = mb;
            }
        }

        config
    }

    /// Overlay environment variables. `GEMINI_API_KEY` carries the service
    /// key; the rest are `QUIZGEN_`-prefixed.
    pub fn with_env_overrides(mut self) -> Config {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                self.api_key = Some(key);
            }
        }
        if let Ok(model) = std::env::var("QUIZGEN_MODEL") {
            if !model.is_empty() {
                self.model = model;
            }
        }
        if let Ok(url) = std::env::var("QUIZGEN_BASE_URL") {
            if !url.is_empty() {
                self.base_url = url;
            }
        }
        if let Ok(secs) = std::env::var("QUIZGEN_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                self.timeout = Duration::from_secs(secs);
            }
        }
        if let Ok(dir) = std::env::var("QUIZGEN_UPLOAD_DIR") {
            if !dir.is_empty() {
                self.upload_dir = PathBuf::from(dir);
            }
        }
        if let Ok(dir) = std::env::var("QUIZGEN_RESULTS_DIR") {
            if !dir.is_empty() {
                self.results_dir = PathBuf::from(dir);
            }
        }
        self
    }

    /// Case-insensitive allow-list membership check.
    pub fn extension_allowed(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.allowed_extensions.iter().any(|e| *e == ext)
    }
}
