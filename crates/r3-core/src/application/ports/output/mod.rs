//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `r3-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{ProjectTemplate, ProjectType, TemplateContext};
use crate::error::ScaffoldResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `r3_adapters::filesystem::LocalFilesystem` (production)
/// - `r3_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Succeeds if it exists.
    fn create_dir_all(&self, path: &Path) -> ScaffoldResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> ScaffoldResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> ScaffoldResult<String>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> ScaffoldResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// `true` if `path` does not exist, or is a directory with zero entries.
    /// A directory that cannot be listed is an error, not "non-empty".
    fn is_empty_dir(&self, path: &Path) -> ScaffoldResult<bool>;

    /// Every regular file under `root`, depth-first, each exactly once.
    /// Symlinks are not followed.
    fn walk_files(&self, root: &Path) -> ScaffoldResult<Vec<PathBuf>>;

    /// Recursively copy the tree at `from` into `to`. Returns files copied.
    fn copy_dir(&self, from: &Path, to: &Path) -> ScaffoldResult<usize>;
}

/// What a render pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Output paths written, in processing order.
    pub rendered: Vec<PathBuf>,
    /// Non-template files seen and left alone.
    pub skipped: usize,
}

impl RenderReport {
    pub fn rendered_count(&self) -> usize {
        self.rendered.len()
    }
}

/// Port for in-place template rendering.
///
/// Implemented by:
/// - `r3_adapters::renderer::PlaceholderRenderer` (`{{key}}` substitution)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render every template file under `root` and replace it with its output.
    fn render(&self, root: &Path, context: &TemplateContext) -> ScaffoldResult<RenderReport>;

    /// Read a named template from the renderer's template directory,
    /// caching the content.
    fn load_template(&self, name: &str) -> ScaffoldResult<String>;
}

/// A child process to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// Combined stdout + stderr allowance in bytes.
    pub max_output: usize,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            max_output: usize::MAX,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn max_output(mut self, bytes: usize) -> Self {
        self.max_output = bytes;
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
            ..Self::default()
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Short human-readable failure reason.
    pub fn failure_reason(&self) -> String {
        let status = match self.code {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".to_string(),
        };
        match self.stderr.lines().rev().find(|l| !l.trim().is_empty()) {
            Some(line) => format!("{status}: {}", line.trim()),
            None => status,
        }
    }
}

/// Port for spawning external programs.
///
/// `Ok` means the process ran to completion, successfully or not; callers
/// inspect [`CommandOutput::success`]. `Err` means it could not be spawned
/// or broke the output allowance.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, spec: &CommandSpec) -> ScaffoldResult<CommandOutput>;
}

/// Port for the template catalog.
///
/// Implemented by:
/// - `r3_adapters::template_store::InMemoryStore` (built-in catalog)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Get the entry for a project type.
    fn get(&self, project_type: ProjectType) -> ScaffoldResult<ProjectTemplate>;

    /// List all entries in catalog order.
    fn list(&self) -> ScaffoldResult<Vec<ProjectTemplate>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_spec_displays_as_command_line() {
        let spec = CommandSpec::new("git", "/tmp")
            .arg("commit")
            .args(["-m", "Initial commit"]);
        assert_eq!(spec.to_string(), "git commit -m Initial commit");
    }

    #[test]
    fn failure_reason_uses_last_stderr_line() {
        let out = CommandOutput::failed(1, "npm ERR! a\nnpm ERR! missing script: build\n\n");
        assert_eq!(out.failure_reason(), "exit status 1: npm ERR! missing script: build");
    }

    #[test]
    fn failure_reason_without_stderr() {
        let out = CommandOutput {
            success: false,
            code: None,
            ..CommandOutput::default()
        };
        assert_eq!(out.failure_reason(), "terminated by signal");
    }
}
