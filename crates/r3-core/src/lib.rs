//! R3 Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the R3
//! project scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              r3-cli (CLI)               │
//! │     (Builds config, maps exit codes)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService, ProjectBuilder, ...) │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ (Filesystem, TemplateRenderer, Command) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       r3-adapters (Infrastructure)      │
//! │ (LocalFilesystem, PlaceholderRenderer)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use r3_core::prelude::*;
//!
//! let config = ProjectConfig::builder("demo-app")
//!     .project_type(ProjectType::Cli)
//!     .build()?;
//!
//! let service = ScaffoldService::new(filesystem, renderer, builder);
//! let report = service.create(&ScaffoldOptions::new(config, "/tmp/demo-app"))?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CommandRunner, Filesystem, ProjectBuilder, ScaffoldOptions, ScaffoldReport,
        ScaffoldService, TemplateRenderer, TemplateService, TemplateStore, ToolchainSettings,
    };
    pub use crate::domain::{
        License, ProjectConfig, ProjectStructure, ProjectTemplate, ProjectType, TemplateContext,
        Validator,
    };
    pub use crate::error::{ScaffoldError, ScaffoldResult, ScaffoldStage};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
