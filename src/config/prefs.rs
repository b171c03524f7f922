//! Persisted user preferences (prefs.yaml in the data directory)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, config, fs as fs_err};
use crate::language::Language;

pub const PREFS_FILE: &str = "prefs.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Prefs {
    pub language: Language,
}

impl Prefs {
    /// Preference file location inside `data_dir`
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(PREFS_FILE)
    }

    /// Load preferences; a missing file yields defaults (English)
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = Self::path_in(data_dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let yaml = fs::read_to_string(&path)
            .map_err(|e| fs_err::read_failed(path.display().to_string(), e.to_string()))?;
        serde_yaml::from_str(&yaml)
            .map_err(|e| config::parse_failed(path.display().to_string(), e.to_string()))
    }

    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let path = Self::path_in(data_dir);
        let write_failed =
            |e: &dyn std::fmt::Display| config::prefs_write_failed(path.display().to_string(), e.to_string());

        let yaml = serde_yaml::to_string(self).map_err(|e| write_failed(&e))?;
        fs::create_dir_all(data_dir).map_err(|e| write_failed(&e))?;
        fs::write(&path, yaml).map_err(|e| write_failed(&e))?;
        debug!(path = %path.display(), language = self.language.code(), "Saved preferences");
        Ok(())
    }
}
