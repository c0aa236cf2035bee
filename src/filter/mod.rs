//! Long-lived visibility flags and their persistence policy.

mod core;

pub use self::core::{FilterState, Persistence};
