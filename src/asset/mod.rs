//! Read-only packaged asset sources
//!
//! An asset source is a hierarchical, named byte-blob store addressed by
//! slash-separated paths relative to its root, e.g.
//! `vosk-model-small-en-us-0.15/am/final.mdl`. The empty path is the root.
//!
//! Sources answer listing and read queries. They may also answer an explicit
//! entry-type query; when they cannot, callers fall back to
//! [`classify_by_listing`].

mod dir;

pub use dir::DirAssetSource;

use std::io::Read;

/// Kind of an entry in an asset source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A read-only, hierarchical asset store
pub trait AssetSource {
    /// List the names of the direct children of `path`.
    ///
    /// Missing paths and plain files list as empty.
    fn list_entries(&self, path: &str) -> Vec<String>;

    /// Open the blob at `path` for reading
    fn open(&self, path: &str) -> std::io::Result<Box<dyn Read + '_>>;

    /// Explicit entry-type query; `None` when the source cannot tell.
    fn entry_kind(&self, _path: &str) -> Option<EntryKind> {
        None
    }
}

/// Join an asset path and a child name
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Classify an entry by trying to list it as a directory.
///
/// A non-empty listing means directory; an empty or missing one means file.
/// Empty directories are therefore indistinguishable from files here.
pub fn classify_by_listing(source: &dyn AssetSource, path: &str) -> EntryKind {
    if source.list_entries(path).is_empty() {
        EntryKind::File
    } else {
        EntryKind::Directory
    }
}

/// Entry kind from the source's explicit query, or the listing heuristic
pub fn entry_kind(source: &dyn AssetSource, path: &str) -> EntryKind {
    source
        .entry_kind(path)
        .unwrap_or_else(|| classify_by_listing(source, path))
}
