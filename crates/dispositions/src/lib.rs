//! Disposition registry: operator-defined call outcomes and the follow-up
//! action each one triggers.

pub mod registry;

pub use registry::{DispositionRegistry, DEFAULT_CLASSIFICATION_PROMPT};
