use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub service: Option<ServiceConfig>,
    pub storage: Option<StorageConfig>,
    pub uploads: Option<UploadsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub upload_dir: Option<String>,
    pub results_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadsConfig {
    pub allowed_extensions: Option<Vec<String>>,
    pub max_upload_mb: Option<usize>,
}

/// Platform config directory path: `<config_dir>/quizgen/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("quizgen").join("config.toml"))
}

/// Load config by cascading CWD `quizgen.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from("quizgen.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        service: Some(ServiceConfig {
            api_key: overlay
                .service
                .as_ref()
                .and_then(|s| s.api_key.clone())
                .or_else(|| base.service.as_ref().and_then(|s| s.api_key.clone())),
            model: overlay
                .service
                .as_ref()
                .and_then(|s| s.model.clone())
                .or_else(|| base.service.as_ref().and_then(|s| s.model.clone())),
            base_url: overlay
                .service
                .as_ref()
                .and_then(|s| s.base_url.clone())
                .or_else(|| base.service.as_ref().and_then(|s| s.base_url.clone())),
            timeout_secs: overlay
                .service
                .as_ref()
                .and_then(|s| s.timeout_secs)
                .or_else(|| base.service.as_ref().and_then(|s| s.timeout_secs)),
        }),
        storage: Some(StorageConfig {
            upload_dir: overlay
                .storage
                .as_ref()
                .and_then(|s| s.upload_dir.clone())
                .or_else(|| base.storage.as_ref().and_then(|s| s.upload_dir.clone())),
            results_dir: overlay
                .storage
                .as_ref()
                .and_then(|s| s.results_dir.clone())
                .or_else(|| base.storage.as_ref().and_then(|s| s.results_dir.clone())),
        }),
        uploads: Some(UploadsConfig {
            allowed_extensions: overlay
                .uploads
                .as_ref()
                .and_then(|u| u.allowed_extensions.clone())
                .or_else(|| {
                    base.uploads
                        .as_ref()
                        .and_then(|u| u.allowed_extensions.clone())
                }),
            max_upload_mb: overlay
                .uploads
                .as_ref()
                .and_then(|u| u.max_upload_mb)
                .or_else(|| base.uploads.as_ref().and_then(|u| u.max_upload_mb)),
        }),
    }
}
