//! Application layer errors.
//!
//! These errors represent failures in orchestration, I/O and child
//! processes, not validation. Validation errors are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The scaffold target exists and already has entries.
    #[error("Directory {path} already exists and is not empty")]
    TargetNotEmpty { path: PathBuf },

    /// A template file could not be rendered in place.
    #[error("Failed to render template {path}: {reason}")]
    RenderFailed { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A child process could not be spawned or exited unsuccessfully.
    #[error("Command `{command}` failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// A named manifest script failed.
    #[error("Script \"{script}\" failed: {reason}")]
    ScriptFailed { script: String, reason: String },

    /// A child process wrote more than the allowed output.
    #[error("Command `{command}` exceeded the {limit} byte output limit")]
    OutputLimitExceeded { command: String, limit: usize },

    /// A named template does not exist.
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Template store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TargetNotEmpty { path } => vec![
                format!("Directory is not empty: {}", path.display()),
                "Choose a different project name or --path".into(),
                "Or use `r3 init` inside an existing project".into(),
            ],
            Self::RenderFailed { path, .. } => vec![
                format!("Template left in place: {}", path.display()),
                "Check that the file is UTF-8 text and writable".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("Make sure `{}` is installed and on PATH", program_of(command)),
                "Re-run with --skip-install to scaffold without installing".into(),
            ],
            Self::ScriptFailed { script, .. } => vec![
                format!("Check that \"{script}\" is defined under \"scripts\" in package.json"),
            ],
            Self::OutputLimitExceeded { .. } => vec![
                "Raise toolchain.max_output_bytes in your config file".into(),
            ],
            Self::TemplateNotFound { .. } => vec![
                "Try: r3 list-templates to see available templates".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TargetNotEmpty { .. } => ErrorCategory::Validation,
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::CommandFailed { .. }
            | Self::ScriptFailed { .. }
            | Self::OutputLimitExceeded { .. } => ErrorCategory::External,
            Self::RenderFailed { .. } | Self::FilesystemError { .. } | Self::StoreLockError => {
                ErrorCategory::Internal
            }
        }
    }
}

fn program_of(command: &str) -> &str {
    command.split_whitespace().next().unwrap_or(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_not_empty_names_path() {
        let err = ApplicationError::TargetNotEmpty {
            path: PathBuf::from("/tmp/demo-app"),
        };
        assert!(err.to_string().contains("/tmp/demo-app"));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn command_suggestion_names_program() {
        let err = ApplicationError::CommandFailed {
            command: "npm install".into(),
            reason: "not found".into(),
        };
        assert!(err.suggestions()[0].contains("`npm`"));
    }

    #[test]
    fn script_failure_names_script() {
        let err = ApplicationError::ScriptFailed {
            script: "build".into(),
            reason: "exit status 1".into(),
        };
        assert!(err.to_string().contains("\"build\""));
        assert_eq!(err.category(), ErrorCategory::External);
    }
}
