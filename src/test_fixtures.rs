//! Test fixtures and utilities for reducing test setup duplication.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{create_temp_dir, write_tree, MemoryAssetSource};
//!
//! #[test]
//! fn my_test() {
//!     let temp = create_temp_dir();
//!     write_tree(temp.path(), &[("model/a.bin", "a")]);
//!
//!     let source = MemoryAssetSource::new().with_file("model/a.bin", b"a");
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Cursor, Read};
use std::path::Path;
use std::time::Duration;

use tempfile::TempDir;
use walkdir::WalkDir;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

use crate::asset::{AssetSource, EntryKind};

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Write `(relative path, contents)` pairs under `root`, creating parents.
///
/// # Panics
///
/// Panics if any file cannot be written.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }
}

/// Collect every file under `root` as `relative/path -> bytes`.
///
/// # Panics
///
/// Panics if the tree cannot be read.
#[must_use]
pub fn read_tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(|e| e.expect("Failed to walk tree"))
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e
                .path()
                .strip_prefix(root)
                .expect("Walked path outside root")
                .to_string_lossy()
                .replace('\\', "/");
            let bytes = std::fs::read(e.path()).expect("Failed to read file");
            (rel, bytes)
        })
        .collect()
}

/// In-memory asset source.
///
/// Answers entry-type queries only when built with
/// [`with_entry_kinds`](Self::with_entry_kinds), so tests exercise the
/// listing heuristic by default.
#[derive(Debug, Default, Clone)]
pub struct MemoryAssetSource {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
    unreadable: BTreeSet<String>,
    answers_kinds: bool,
}

impl MemoryAssetSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: &str, bytes: &[u8]) -> Self {
        self.files.insert(path.to_string(), bytes.to_vec());
        self
    }

    #[must_use]
    pub fn with_dir(mut self, path: &str) -> Self {
        self.dirs.insert(path.to_string());
        self
    }

    /// A file that lists like any other but fails when opened
    #[must_use]
    pub fn with_unreadable_file(mut self, path: &str) -> Self {
        self.files.insert(path.to_string(), Vec::new());
        self.unreadable.insert(path.to_string());
        self
    }

    #[must_use]
    pub fn with_entry_kinds(mut self) -> Self {
        self.answers_kinds = true;
        self
    }

    fn all_paths(&self) -> impl Iterator<Item = &String> {
        self.files.keys().chain(self.dirs.iter())
    }
}

impl AssetSource for MemoryAssetSource {
    fn list_entries(&self, path: &str) -> Vec<String> {
        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{path}/")
        };
        let names: BTreeSet<String> = self
            .all_paths()
            .filter_map(|p| p.strip_prefix(&prefix))
            .filter_map(|rest| rest.split('/').next())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        names.into_iter().collect()
    }

    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
        if self.unreadable.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("asset is unreadable: {path}"),
            ));
        }
        self.files
            .get(path)
            .map(|bytes| Box::new(Cursor::new(bytes.as_slice())) as Box<dyn Read + '_>)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
    }

    fn entry_kind(&self, path: &str) -> Option<EntryKind> {
        if !self.answers_kinds {
            return None;
        }
        if self.files.contains_key(path) {
            return Some(EntryKind::File);
        }
        let prefix = format!("{path}/");
        if self.dirs.contains(path) || self.all_paths().any(|p| p.starts_with(&prefix)) {
            return Some(EntryKind::Directory);
        }
        None
    }
}

/// Chat backend on localhost answering every `POST /chat` the same way
pub struct MockChatBackend {
    // Declared first so the server shuts down while its runtime is alive
    server: MockServer,
    runtime: tokio::runtime::Runtime,
}

impl MockChatBackend {
    /// Reply with `status` and the JSON `body`
    #[must_use]
    pub fn replying(status: u16, body: &str) -> Self {
        Self::start(ResponseTemplate::new(status).set_body_raw(body, "application/json"))
    }

    /// Reply with `{"response":"late"}` only after `delay`
    #[must_use]
    pub fn delayed(delay: Duration) -> Self {
        Self::start(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"response":"late"}"#, "application/json")
                .set_delay(delay),
        )
    }

    fn start(response: ResponseTemplate) -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to build test runtime");
        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            Mock::given(matchers::method("POST"))
                .and(matchers::path("/chat"))
                .respond_with(response)
                .mount(&server)
                .await;
            server
        });
        Self { server, runtime }
    }

    #[must_use]
    pub fn url(&self) -> String {
        format!("{}/chat", self.server.uri())
    }

    /// JSON bodies of every request received so far
    ///
    /// # Panics
    ///
    /// Panics if a body is not JSON.
    #[must_use]
    pub fn request_bodies(&self) -> Vec<serde_json::Value> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).expect("Request body is not JSON"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_listing() {
        let source = MemoryAssetSource::new()
            .with_file("m/a.bin", b"a")
            .with_file("m/sub/b.bin", b"b")
            .with_file("other/c.bin", b"c");

        assert_eq!(source.list_entries(""), vec!["m", "other"]);
        assert_eq!(source.list_entries("m"), vec!["a.bin", "sub"]);
        assert!(source.list_entries("m/a.bin").is_empty());
        assert!(source.list_entries("missing").is_empty());
    }

    #[test]
    fn test_memory_source_unreadable() {
        let source = MemoryAssetSource::new().with_unreadable_file("m/bad.bin");
        assert_eq!(source.list_entries("m"), vec!["bad.bin"]);
        assert!(source.open("m/bad.bin").is_err());
    }

    #[test]
    fn test_write_and_read_tree() {
        let temp = create_temp_dir();
        write_tree(temp.path(), &[("a.txt", "a"), ("sub/b.txt", "b")]);

        let tree = read_tree(temp.path());
        assert_eq!(tree.len(), 2);
        assert_eq!(tree["sub/b.txt"], b"b");
    }
}
