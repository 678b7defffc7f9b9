//! Infrastructure adapters for R3.
//!
//! This crate implements the ports defined in `r3_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod filesystem;
pub mod renderer;
pub mod runner;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::PlaceholderRenderer;
pub use runner::{RecordingRunner, SystemCommandRunner};
pub use template_store::InMemoryStore;
