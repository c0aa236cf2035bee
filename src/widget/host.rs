use std::fmt::Debug;
use std::hash::Hash;

use serde::Serialize;

use crate::classify::FillState;
use crate::geometry::{PositionMode, SizeMode};

/// Widget categories the classifier distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WidgetKind {
    Layer,
    Rectangle,
    Text,
    Graphic,
    Other,
}

/// Opacity pair swapped on pointer enter/leave.
///
/// Bound to one outline widget; it never reaches back into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HoverShade {
    pub normal: u8,
    pub hover: u8,
}

impl HoverShade {
    pub fn on_enter(&self) -> u8 {
        self.hover
    }

    pub fn on_leave(&self) -> u8 {
        self.normal
    }
}

/// Shape of a vertical divider between two half-width sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DividerSpec {
    pub x: i32,
    pub width: i32,
    pub height: i32,
}

/// Capability interface over the host's live widget tree.
///
/// Implementations must be called from the host's UI thread; the engine
/// assumes exclusive access for the duration of a pass.
pub trait WidgetHost {
    type Handle: Copy + Eq + Hash + Debug;

    /// The scrollable container holding every storage set, if loaded.
    fn sets_container(&self) -> Option<Self::Handle>;
    /// Text of the screen's title bar, if loaded.
    fn title_text(&self) -> Option<String>;
    fn children(&self, parent: Self::Handle) -> Vec<Self::Handle>;

    fn kind(&self, widget: Self::Handle) -> WidgetKind;
    fn text(&self, widget: Self::Handle) -> Option<String>;
    fn x(&self, widget: Self::Handle) -> i32;
    fn y(&self, widget: Self::Handle) -> i32;
    fn width(&self, widget: Self::Handle) -> i32;
    fn height(&self, widget: Self::Handle) -> i32;
    fn opacity(&self, widget: Self::Handle) -> u8;
    fn visual_id(&self, widget: Self::Handle) -> i32;
    fn is_hidden(&self, widget: Self::Handle) -> bool;
    fn width_mode(&self, widget: Self::Handle) -> SizeMode;
    fn x_position_mode(&self, widget: Self::Handle) -> PositionMode;
    fn scroll_height(&self, container: Self::Handle) -> i32;

    fn set_x(&mut self, widget: Self::Handle, x: i32);
    fn set_y(&mut self, widget: Self::Handle, y: i32);
    fn set_width(&mut self, widget: Self::Handle, width: i32);
    fn set_opacity(&mut self, widget: Self::Handle, opacity: u8);
    fn set_visual_id(&mut self, widget: Self::Handle, visual_id: i32);
    fn set_hidden(&mut self, widget: Self::Handle, hidden: bool);
    fn set_width_mode(&mut self, widget: Self::Handle, mode: SizeMode);
    fn set_x_position_mode(&mut self, widget: Self::Handle, mode: PositionMode);
    /// Installs (or with `None`, removes) pointer-driven opacity swapping.
    fn set_hover_shade(&mut self, widget: Self::Handle, shade: Option<HoverShade>);
    fn set_scroll_height(&mut self, container: Self::Handle, height: i32);

    /// Recomputes a widget's resolved geometry after attribute writes.
    fn revalidate(&mut self, widget: Self::Handle);
    /// Recomputes the scroll area and refreshes its scrollbar.
    fn revalidate_scroll(&mut self, container: Self::Handle);

    fn create_divider(&mut self, container: Self::Handle, spec: DividerSpec) -> Self::Handle;
    /// Grows (or shrinks) the screen chrome above the sets container.
    fn adjust_chrome_height(&mut self, delta: i32);
    /// Creates the labelled checkbox toggling visibility of one fill state.
    fn create_filter_control(&mut self, fill: FillState, checked: bool) -> Self::Handle;
    fn set_filter_control_checked(&mut self, control: Self::Handle, checked: bool);
}
