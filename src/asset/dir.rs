//! Asset source backed by a directory on disk

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::{AssetSource, EntryKind};

/// Packaged assets laid out as a plain directory tree
#[derive(Debug, Clone)]
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an asset path onto the filesystem.
    ///
    /// Returns `None` for paths that would escape the root.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let mut resolved = self.root.clone();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if segment == "." || segment == ".." || segment.contains('\\') {
                return None;
            }
            resolved.push(segment);
        }
        Some(resolved)
    }
}

impl AssetSource for DirAssetSource {
    fn list_entries(&self, path: &str) -> Vec<String> {
        let Some(dir) = self.resolve(path) else {
            return Vec::new();
        };
        let Ok(read_dir) = fs::read_dir(&dir) else {
            return Vec::new();
        };

        let mut names: Vec<String> = read_dir
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        // Listing order is the copy order, keep it stable across platforms
        names.sort();
        names
    }

    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
        let resolved = self.resolve(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("asset path escapes source root: {path}"),
            )
        })?;
        if fs::symlink_metadata(&resolved)?.file_type().is_symlink() && resolved.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("symbolic link to a directory is not copied: {path}"),
            ));
        }
        Ok(Box::new(File::open(resolved)?))
    }

    /// Links are never followed into, so a link cycle cannot recurse
    fn entry_kind(&self, path: &str) -> Option<EntryKind> {
        let metadata = fs::symlink_metadata(self.resolve(path)?).ok()?;
        if metadata.is_dir() {
            Some(EntryKind::Directory)
        } else {
            Some(EntryKind::File)
        }
    }
}
