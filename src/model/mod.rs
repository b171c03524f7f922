//! Local model directories, as seen by the recognition engine
//!
//! [`ModelDir::open`] is the check a recognizer runs before loading a model
//! from a provisioned local copy. [`inspect`] summarizes a local copy for
//! `polychat status`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{PolychatError, Result, model};
use crate::hash;
use crate::language::Language;

/// A loadable model directory
#[derive(Debug, Clone)]
pub struct ModelDir {
    bundle: String,
    path: PathBuf,
    entries: Vec<String>,
}

impl ModelDir {
    /// Open `<local_root>/<bundle>`, failing if it is missing or empty
    pub fn open(local_root: &Path, bundle: &str) -> Result<Self> {
        let path = local_root.join(bundle);
        debug!(bundle, path = %path.display(), "Attempting to load model");

        if !path.is_dir() {
            debug!(bundle, path = %path.display(), "Model directory does not exist");
            return Err(model::missing(bundle, path.display().to_string()));
        }

        let mut entries: Vec<String> = fs::read_dir(&path)?
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        if entries.is_empty() {
            debug!(bundle, path = %path.display(), "Model directory is empty");
            return Err(model::empty(bundle, path.display().to_string()));
        }
        entries.sort();
        debug!(bundle, "Model directory contains: {}", entries.join(", "));

        Ok(Self {
            bundle: bundle.to_string(),
            path,
            entries,
        })
    }

    /// Open the model bundle bound to `language`
    pub fn for_language(local_root: &Path, language: Language) -> Result<Self> {
        Self::open(local_root, language.model_bundle())
    }

    pub fn bundle(&self) -> &str {
        &self.bundle
    }

    /// Path handed to the recognition engine
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Top-level entry names, sorted
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

/// State of a bundle's local copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyState {
    Ready,
    Empty,
    Missing,
    /// Present but could not be read in full
    Unreadable,
}

/// Summary of a bundle's local copy
#[derive(Debug, Clone)]
pub struct LocalCopyStatus {
    pub bundle: String,
    pub path: PathBuf,
    pub state: CopyState,
    pub files: usize,
    pub bytes: u64,
    pub digest: Option<String>,
    /// Why the copy could not be read, for [`CopyState::Unreadable`]
    pub problem: Option<String>,
}

impl LocalCopyStatus {
    /// Human-readable total size
    pub fn formatted_size(&self) -> String {
        format_size(self.bytes)
    }
}

/// Inspect `<local_root>/<bundle>` without modifying it.
///
/// Read failures are reported in the returned state rather than as an
/// error, so one bad copy does not hide the others.
pub fn inspect(local_root: &Path, bundle: &str) -> LocalCopyStatus {
    let path = local_root.join(bundle);
    let mut status = LocalCopyStatus {
        bundle: bundle.to_string(),
        path: path.clone(),
        state: CopyState::Missing,
        files: 0,
        bytes: 0,
        digest: None,
        problem: None,
    };

    match ModelDir::open(local_root, bundle) {
        Ok(_) => {}
        Err(PolychatError::ModelMissing { .. }) => return status,
        Err(PolychatError::ModelEmpty { .. }) => {
            status.state = CopyState::Empty;
            return status;
        }
        Err(e) => return unreadable(status, &e),
    }

    for entry in WalkDir::new(&path).into_iter().filter_map(|e| e.ok()) {
        if entry.file_type().is_file() {
            status.files += 1;
            status.bytes += entry.metadata().map(|m| m.len()).unwrap_or(0);
        }
    }

    match hash::hash_directory(&path) {
        Ok(digest) => {
            status.state = CopyState::Ready;
            status.digest = Some(digest);
            status
        }
        Err(e) => unreadable(status, &e),
    }
}

fn unreadable(mut status: LocalCopyStatus, error: &PolychatError) -> LocalCopyStatus {
    warn!(bundle = %status.bundle, path = %status.path.display(), "Cannot read local copy: {error}");
    status.state = CopyState::Unreadable;
    status.problem = Some(error.to_string());
    status
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    #[allow(clippy::cast_precision_loss)]
    let b = bytes as f64;
    if bytes >= GB {
        format!("{:.2} GB", b / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", b / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", b / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
