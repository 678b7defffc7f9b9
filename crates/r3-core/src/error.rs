//! Unified error handling for R3 Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, plus the pipeline stage a failure happened in.

use std::fmt;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// A step of the scaffold pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaffoldStage {
    ValidateTargetEmpty,
    CreateDirectories,
    WriteSeedFiles,
    CopyTemplateSource,
    RenderTemplates,
    /// Named in logs only: version-control failures become
    /// `VcsOutcome::Failed` warnings and never carry an error.
    InitVersionControl,
    InstallDependencies,
}

impl ScaffoldStage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidateTargetEmpty => "validate target",
            Self::CreateDirectories => "create directories",
            Self::WriteSeedFiles => "write seed files",
            Self::CopyTemplateSource => "copy template source",
            Self::RenderTemplates => "render templates",
            Self::InitVersionControl => "init version control",
            Self::InstallDependencies => "install dependencies",
        }
    }
}

impl fmt::Display for ScaffoldStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root error type for R3 Core operations.
#[derive(Debug, Error, Clone)]
pub enum ScaffoldError {
    /// Errors from the domain layer (validation).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O, processes, orchestration).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// A pipeline stage failed.
    #[error("Stage '{stage}' failed: {source}")]
    Stage {
        stage: ScaffoldStage,
        source: Box<ScaffoldError>,
    },

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl ScaffoldError {
    /// Wrap `self` as the failure of `stage`. Already-staged errors keep the
    /// innermost stage.
    pub fn at_stage(self, stage: ScaffoldStage) -> Self {
        match self {
            Self::Stage { .. } => self,
            other => Self::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// The stage this error was raised in, if any.
    pub fn stage(&self) -> Option<ScaffoldStage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The error with any stage wrapping removed.
    pub fn root_cause(&self) -> &ScaffoldError {
        match self {
            Self::Stage { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Stage { source, .. } => source.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Check your config file with: r3 config path".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in R3".into(),
                "Re-run with -vvv and include the output when reporting it".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Stage { .. } => ErrorCategory::Pipeline,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Pipeline,
    External,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Turn any std error into an internal error with a message prefix.
    fn context(self, msg: impl Into<String>) -> ScaffoldResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> ScaffoldResult<T> {
        self.map_err(|e| ScaffoldError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

/// Tag a pipeline result with the stage that produced it.
pub trait StageContext<T> {
    fn stage(self, stage: ScaffoldStage) -> ScaffoldResult<T>;
}

impl<T, E> StageContext<T> for Result<T, E>
where
    E: Into<ScaffoldError>,
{
    fn stage(self, stage: ScaffoldStage) -> ScaffoldResult<T> {
        self.map_err(|e| e.into().at_stage(stage))
    }
}
