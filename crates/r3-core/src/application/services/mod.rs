//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a project" or "run a build script".

pub mod project_builder;
pub mod scaffold_service;
pub mod template_service;

pub use project_builder::{
    DEFAULT_MAX_OUTPUT, InstallOutcome, ProjectBuilder, ToolchainSettings, VcsOutcome,
};
pub use scaffold_service::{InitReport, ScaffoldOptions, ScaffoldReport, ScaffoldService};
pub use template_service::TemplateService;
