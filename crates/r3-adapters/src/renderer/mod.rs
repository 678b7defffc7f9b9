//! Template renderer adapters.

mod placeholder;

pub use placeholder::PlaceholderRenderer;
