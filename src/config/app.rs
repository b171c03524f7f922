//! Application configuration (polychat.yaml)

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PolychatError, Result, config};
use crate::language::Language;

/// Configuration file name
pub const CONFIG_FILE: &str = "polychat.yaml";

/// Backend used when none is configured (the reference Flask backend's default)
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000/chat";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration (polychat.yaml)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    /// Chat endpoint receiving `{"text", "language"}` POSTs
    pub backend_url: String,

    pub request_timeout_secs: u64,

    /// Directory of packaged model bundles
    pub assets_dir: PathBuf,

    /// Local model root; platform default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models_dir: Option<PathBuf>,

    /// Bundles to provision, in order
    pub bundles: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            assets_dir: PathBuf::from("assets"),
            models_dir: None,
            bundles: Language::default_bundles(),
        }
    }
}

impl AppConfig {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration.
    ///
    /// An explicitly given file must exist. Without one, the default location
    /// is tried and built-in defaults are used if nothing is there.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match super::default_config_path() {
                Ok(path) => (path, false),
                Err(_) => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            if required {
                return Err(config::not_found(path.display().to_string()));
            }
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        let yaml = std::fs::read_to_string(&path).map_err(|e| PolychatError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_yaml(&yaml).map_err(|e| match e {
            PolychatError::ConfigParseFailed { reason, .. } => {
                config::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            return Err(config::invalid(format!(
                "backend_url must be an http(s) URL, got '{}'",
                self.backend_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(config::invalid("request_timeout_secs must be positive"));
        }
        if let Some(bad) = self.bundles.iter().find(|b| b.trim().is_empty()) {
            return Err(config::invalid(format!("empty bundle name '{bad}'")));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolve the local model root: flag, then `POLYCHAT_MODELS_DIR`,
    /// then the config file, then the platform default.
    pub fn models_dir(&self, flag: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = flag {
            return Ok(dir.to_path_buf());
        }
        if let Ok(dir) = std::env::var("POLYCHAT_MODELS_DIR") {
            return Ok(PathBuf::from(dir));
        }
        if let Some(dir) = &self.models_dir {
            return Ok(dir.clone());
        }
        super::default_models_dir()
    }

    /// Resolve the packaged assets directory: flag, then the config file
    pub fn assets_dir(&self, flag: Option<&Path>) -> PathBuf {
        flag.map_or_else(|| self.assets_dir.clone(), Path::to_path_buf)
    }
}
