//! Undoes the previous pass so every pass starts from the host's own state.

mod core;

pub use self::core::{PassLedger, SnapshotRestorer};
