//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `r3-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateRenderer`: In-place rendering of template files
//!   - `CommandRunner`: Child processes (git, npm)
//!   - `TemplateStore`: The template catalog
//!
//! - **Driving (Input) Ports**: the services themselves, called by the CLI

pub mod output;

pub use output::{
    CommandOutput, CommandRunner, CommandSpec, Filesystem, RenderReport, TemplateRenderer,
    TemplateStore,
};

#[cfg(test)]
pub use output::{MockCommandRunner, MockFilesystem, MockTemplateRenderer, MockTemplateStore};
