//! Configuration file handling for polychat
//!
//! This module contains data structures for:
//! - `polychat.yaml` - Application configuration
//! - `prefs.yaml` - Persisted user preferences (selected language)
//!
//! Directory resolution, highest precedence first:
//! command-line flag, environment variable, configuration file, platform
//! default.

pub mod app;
pub mod prefs;

pub use app::AppConfig;
pub use prefs::Prefs;

use std::path::PathBuf;

use crate::error::{Result, config};

/// Application directory name under platform config/data directories
const APP_DIR: &str = "polychat";

/// Models subdirectory within the data directory
const MODELS_DIR: &str = "models";

/// Get the data directory
///
/// Uses the platform's data location with a `polychat` subdirectory.
/// Can be overridden with the `POLYCHAT_DATA_DIR` environment variable.
pub fn data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("POLYCHAT_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::data_dir().ok_or_else(|| config::no_base_dir("data"))?;
    Ok(base.join(APP_DIR))
}

/// Default local model root: `<data-dir>/models`
pub fn default_models_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join(MODELS_DIR))
}

/// Default configuration file path: `<config-dir>/polychat/polychat.yaml`
pub fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| config::no_base_dir("config"))?;
    Ok(base.join(APP_DIR).join(app::CONFIG_FILE))
}
