//! Filesystem helpers that sit outside the `Filesystem` port: hashing,
//! size accounting, name-based search and JSON config files.

use std::fs;
use std::path::{Path, PathBuf};

use r3_core::{
    application::ApplicationError,
    error::{ScaffoldError, ScaffoldResult},
};
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

/// Lowercase hex SHA-256 of `content`.
pub fn hash_content(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Lowercase hex SHA-256 of the file at `path`.
pub fn file_hash(path: &Path) -> ScaffoldResult<String> {
    let bytes = fs::read(path).map_err(|e| io_error(path, "read file", e))?;
    Ok(hash_content(&bytes))
}

/// Total size in bytes of every regular file under `root`.
pub fn directory_size(root: &Path) -> ScaffoldResult<u64> {
    let mut size = 0;
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| io_error(root, "traverse directory", e))?;
        if entry.file_type().is_file() {
            let meta = entry
                .metadata()
                .map_err(|e| io_error(entry.path(), "stat file", e))?;
            size += meta.len();
        }
    }
    Ok(size)
}

/// Files under `root` whose file name satisfies `matches`, sorted.
pub fn find_files<F>(root: &Path, mut matches: F) -> ScaffoldResult<Vec<PathBuf>>
where
    F: FnMut(&str) -> bool,
{
    let mut found = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| io_error(root, "traverse directory", e))?;
        if entry.file_type().is_file() && matches(&entry.file_name().to_string_lossy()) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

/// Human-readable size with two decimals: `1536` -> `"1.50 KB"`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.2} {}", UNITS[unit])
}

/// Parse a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> ScaffoldResult<T> {
    let text = fs::read_to_string(path).map_err(|e| io_error(path, "read file", e))?;
    serde_json::from_str(&text).map_err(|e| io_error(path, "parse JSON", e))
}

fn io_error(path: &Path, operation: &str, e: impl std::fmt::Display) -> ScaffoldError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}
