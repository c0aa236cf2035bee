//! Error module orchestrator.

mod types;

pub use types::{Result, StorageError};
