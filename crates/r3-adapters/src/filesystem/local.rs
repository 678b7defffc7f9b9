//! Local filesystem adapter using std::fs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use r3_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{ScaffoldError, ScaffoldResult},
};
use tracing::trace;
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> ScaffoldResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> ScaffoldResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> ScaffoldResult<String> {
        fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn remove_file(&self, path: &Path) -> ScaffoldResult<()> {
        fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_empty_dir(&self, path: &Path) -> ScaffoldResult<bool> {
        if path.is_file() {
            return Ok(false);
        }
        match fs::read_dir(path) {
            Ok(mut entries) => Ok(entries.next().is_none()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(map_io_error(path, e, "read directory")),
        }
    }

    fn walk_files(&self, root: &Path) -> ScaffoldResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| map_walk_error(root, e))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn copy_dir(&self, from: &Path, to: &Path) -> ScaffoldResult<usize> {
        let mut copied = 0;
        for entry in WalkDir::new(from).min_depth(1).follow_links(false) {
            let entry = entry.map_err(|e| map_walk_error(from, e))?;
            let rel = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| ScaffoldError::Internal {
                    message: format!("walk escaped {}: {e}", from.display()),
                })?;
            let dest = to.join(rel);

            if entry.file_type().is_dir() {
                self.create_dir_all(&dest)?;
            } else if entry.file_type().is_file() {
                if let Some(parent) = dest.parent() {
                    self.create_dir_all(parent)?;
                }
                fs::copy(entry.path(), &dest).map_err(|e| map_io_error(&dest, e, "copy file"))?;
                trace!(from = %entry.path().display(), to = %dest.display(), "Copied");
                copied += 1;
            }
        }
        Ok(copied)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ScaffoldError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

fn map_walk_error(root: &Path, e: walkdir::Error) -> ScaffoldError {
    let path = e.path().unwrap_or(root).to_path_buf();
    ApplicationError::FilesystemError {
        path,
        reason: format!("Failed to traverse directory: {e}"),
    }
    .into()
}
