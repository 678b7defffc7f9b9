//! In-memory filesystem adapter for testing.
//!
//! Besides plain storage it can be told to fail writes to, or removals of,
//! specific paths, which is how the renderer's per-file atomicity is tested.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use r3_core::{
    application::{ApplicationError, ports::Filesystem},
    error::ScaffoldResult,
};

/// In-memory filesystem for testing.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    failing_writes: HashSet<PathBuf>,
    failing_removes: HashSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_ancestors(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                inner.add_ancestors(parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Make every subsequent write to `path` fail.
    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.failing_writes.insert(path.into());
        }
        self
    }

    /// Make every subsequent removal of `path` fail.
    pub fn fail_removes_of(&self, path: impl Into<PathBuf>) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.failing_removes.insert(path.into());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// Every file path, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether `path` is a known directory.
    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path.as_ref()))
            .unwrap_or(false)
    }

    /// Clear all contents and injected faults.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            *inner = MemoryFilesystemInner::default();
        }
    }

    fn read(&self) -> ScaffoldResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }

    fn write(&self) -> ScaffoldResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn fs_error(path: &Path, reason: &str) -> ApplicationError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> ScaffoldResult<()> {
        let mut inner = self.write()?;
        if inner.files.contains_key(path) {
            return Err(fs_error(path, "A file exists at this path").into());
        }
        inner.add_ancestors(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> ScaffoldResult<()> {
        let mut inner = self.write()?;

        if inner.failing_writes.contains(path) {
            return Err(fs_error(path, "Failed to write file: injected fault").into());
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(fs_error(path, "Parent directory does not exist").into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> ScaffoldResult<String> {
        let inner = self.read()?;
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| fs_error(path, "No such file").into())
    }

    fn remove_file(&self, path: &Path) -> ScaffoldResult<()> {
        let mut inner = self.write()?;
        if inner.failing_removes.contains(path) {
            return Err(fs_error(path, "Failed to remove file: injected fault").into());
        }
        inner
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| fs_error(path, "No such file").into())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_empty_dir(&self, path: &Path) -> ScaffoldResult<bool> {
        let inner = self.read()?;
        if inner.files.contains_key(path) {
            return Ok(false);
        }
        let has_child = |p: &PathBuf| p.parent() == Some(path);
        Ok(!inner.files.keys().any(has_child) && !inner.directories.iter().any(has_child))
    }

    fn walk_files(&self, root: &Path) -> ScaffoldResult<Vec<PathBuf>> {
        let inner = self.read()?;
        if !inner.directories.contains(root) {
            return Err(fs_error(root, "Failed to traverse directory: not found").into());
        }
        Ok(inner
            .files
            .keys()
            .filter(|p| p.starts_with(root))
            .cloned()
            .collect())
    }

    fn copy_dir(&self, from: &Path, to: &Path) -> ScaffoldResult<usize> {
        let mut inner = self.write()?;
        if !inner.directories.contains(from) {
            return Err(fs_error(from, "Source directory does not exist").into());
        }

        let dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter_map(|d| d.strip_prefix(from).ok().map(|rel| to.join(rel)))
            .collect();
        let files: Vec<(PathBuf, String)> = inner
            .files
            .iter()
            .filter_map(|(p, c)| p.strip_prefix(from).ok().map(|rel| (to.join(rel), c.clone())))
            .collect();

        for dir in dirs {
            inner.add_ancestors(&dir);
        }
        let copied = files.len();
        for (path, content) in files {
            if inner.failing_writes.contains(&path) {
                return Err(fs_error(&path, "Failed to copy file: injected fault").into());
            }
            inner.files.insert(path, content);
        }
        Ok(copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/p/a.txt"), "x").is_err());
        fs.create_dir_all(Path::new("/p")).unwrap();
        fs.write_file(Path::new("/p/a.txt"), "x").unwrap();
        assert_eq!(fs.read_file("/p/a.txt").as_deref(), Some("x"));
    }

    #[test]
    fn empty_dir_semantics() {
        let fs = MemoryFilesystem::new();
        let empty = |p: &str| fs.is_empty_dir(Path::new(p)).unwrap();
        assert!(empty("/missing"));
        fs.create_dir_all(Path::new("/p")).unwrap();
        assert!(empty("/p"));
        fs.create_dir_all(Path::new("/p/sub")).unwrap();
        assert!(!empty("/p"));
        fs.add_file("/q/file", "x");
        assert!(!empty("/q"));
        assert!(!empty("/q/file"));
    }

    #[test]
    fn injected_faults_fire() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/p/a.txt", "x");
        fs.fail_writes_to("/p/b.txt").fail_removes_of("/p/a.txt");

        assert!(fs.write_file(Path::new("/p/b.txt"), "y").is_err());
        assert!(fs.remove_file(Path::new("/p/a.txt")).is_err());
        assert_eq!(fs.read_file("/p/a.txt").as_deref(), Some("x"));
    }

    #[test]
    fn walk_files_is_scoped_to_root() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/p/a", "1").add_file("/p/sub/b", "2").add_file("/other/c", "3");
        let files = fs.walk_files(Path::new("/p")).unwrap();
        assert_eq!(files, vec![PathBuf::from("/p/a"), PathBuf::from("/p/sub/b")]);
    }

    #[test]
    fn copy_dir_reroots_tree() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/tpl/a.tpl", "A").add_file("/tpl/x/b.ejs", "B");
        fs.create_dir_all(Path::new("/proj")).unwrap();

        assert_eq!(fs.copy_dir(Path::new("/tpl"), Path::new("/proj")).unwrap(), 2);
        assert_eq!(fs.read_file("/proj/x/b.ejs").as_deref(), Some("B"));
        assert!(fs.is_dir("/proj/x"));
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let other = fs.clone();
        fs.add_file("/p/a", "1");
        assert!(other.exists(Path::new("/p/a")));
    }
}
