//! BLAKE3 digests of local model copies

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;
use walkdir::WalkDir;

use crate::error::{PolychatError, Result, fs};

/// Hash prefix for BLAKE3 digests
pub const HASH_PREFIX: &str = "blake3:";

/// Digest of a directory tree.
///
/// Covers every file's relative path and contents, sorted by path, so two
/// trees with the same files and bytes always produce the same digest.
pub fn hash_directory(path: &Path) -> Result<String> {
    if !path.is_dir() {
        return Err(fs::read_failed(
            path.display().to_string(),
            "not a directory",
        ));
    }

    let mut hasher = Hasher::new();
    let mut files: Vec<_> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .collect();

    files.sort_by_key(|e| e.path().to_path_buf());

    for entry in files {
        let file_path = entry.path();

        let relative_path = file_path
            .strip_prefix(path)
            .unwrap_or(file_path)
            .to_string_lossy()
            .replace('\\', "/");
        hasher.update(relative_path.as_bytes());
        hasher.update(b"\0");

        hash_file_into(&mut hasher, file_path)?;

        hasher.update(b"\0");
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

fn hash_file_into(hasher: &mut Hasher, path: &Path) -> Result<()> {
    let read_failed = |e: std::io::Error| PolychatError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let mut reader = BufReader::new(File::open(path).map_err(read_failed)?);
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(read_failed)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(())
}

/// Shorten a digest for display (`blake3:0123abcd`)
pub fn short(digest: &str) -> &str {
    let end = (HASH_PREFIX.len() + 8).min(digest.len());
    &digest[..end]
}
