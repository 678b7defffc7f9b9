// ============================================================================
// domain/error.rs - VALIDATION ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside `ScaffoldError`, which is `Clone`)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project name '{name}': {}", errors.join(", "))]
    InvalidProjectName { name: String, errors: Vec<String> },

    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("Unknown project type: {0}")]
    UnknownProjectType(String),

    #[error("Unknown license: {0}")]
    UnknownLicense(String),

    #[error("Duplicate path in project structure: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { errors, .. } => {
                let mut out: Vec<String> = errors.iter().map(|e| format!("• {e}")).collect();
                out.push("Use lowercase letters, digits, '-' and '_' (e.g. my-app)".into());
                out.push("Scoped names look like @scope/my-app".into());
                out
            }
            Self::InvalidVersion { .. } => vec![
                "Versions follow semantic versioning: MAJOR.MINOR.PATCH".into(),
                "Example: 0.1.0".into(),
            ],
            Self::UnknownProjectType(_) => vec![
                "Supported types: webapp, api, fullstack, cli, library, mobile, desktop".into(),
                "Try: r3 list-templates".into(),
            ],
            Self::UnknownLicense(_) => vec![
                "Supported licenses: MIT, Apache-2.0, GPL-3.0, BSD-3-Clause, None".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. }
            | Self::InvalidVersion { .. }
            | Self::UnknownProjectType(_)
            | Self::UnknownLicense(_)
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::DuplicatePath { .. } | Self::AbsolutePathNotAllowed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
