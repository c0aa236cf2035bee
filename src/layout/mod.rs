//! Layout module orchestrator.
//!
//! `pack` decides rows and columns without touching the host; `core` turns
//! that plan into widget mutations.

mod core;
pub mod pack;

pub use self::core::{DividerPool, LayoutEngine, PassReport};
pub use pack::{PackPlan, Placement, RowSlot, pack_rows};
