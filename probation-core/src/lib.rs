//! # probation-core
//!
//! Foundation crate for the file-validity probation stage.
//! Defines the batch/shape model, traits, errors, and config.
//! The stage crate depends on this; it contains no stage logic itself.

pub mod batch;
pub mod config;
pub mod errors;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use batch::{Arity, BatchShape, CandidatePath, ElementKind, PathToken};
pub use config::StageConfig;
pub use errors::{ConfigError, ReadError, StageError};
