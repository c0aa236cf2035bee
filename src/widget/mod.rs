//! Host widget access.
//!
//! The widget tree belongs to the host. The engine reaches it only through
//! [`WidgetHost`] and remembers what it touched as [`OwnedWidgetRef`]s.

mod host;
mod owned;
pub mod sim;

pub use host::{DividerSpec, HoverShade, WidgetHost, WidgetKind};
pub use owned::OwnedWidgetRef;
pub use sim::{SetWidgets, SimWidget, SimulatedHost, Slot, WidgetId};
