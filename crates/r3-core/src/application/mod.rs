//! Application layer for R3.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, ProjectBuilder,
//!   TemplateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! validation rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    DEFAULT_MAX_OUTPUT, InitReport, InstallOutcome, ProjectBuilder, ScaffoldOptions,
    ScaffoldReport, ScaffoldService, TemplateService, ToolchainSettings, VcsOutcome,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    CommandOutput, CommandRunner, CommandSpec, Filesystem, RenderReport, TemplateRenderer,
    TemplateStore,
};

pub use error::ApplicationError;
