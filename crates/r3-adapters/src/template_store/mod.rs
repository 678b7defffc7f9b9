//! Template catalog stores.

mod memory;

pub use memory::InMemoryStore;
