//! Filesystem adapters.

mod local;
mod memory;
pub mod utils;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
