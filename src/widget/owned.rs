use crate::geometry::{PositionMode, SizeMode};

use super::host::WidgetHost;

/// A host widget the engine may mutate, plus the attributes it had when
/// first captured. The captured values are the restore target and are never
/// rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedWidgetRef<W> {
    handle: W,
    x: i32,
    y: i32,
    width: i32,
    opacity: u8,
    visual_id: i32,
    hidden: bool,
    width_mode: SizeMode,
    x_position_mode: PositionMode,
}

impl<W: Copy> OwnedWidgetRef<W> {
    pub fn capture<H>(host: &H, handle: W) -> Self
    where
        H: WidgetHost<Handle = W>,
    {
        Self {
            handle,
            x: host.x(handle),
            y: host.y(handle),
            width: host.width(handle),
            opacity: host.opacity(handle),
            visual_id: host.visual_id(handle),
            hidden: host.is_hidden(handle),
            width_mode: host.width_mode(handle),
            x_position_mode: host.x_position_mode(handle),
        }
    }

    pub fn handle(&self) -> W {
        self.handle
    }

    pub fn original_x(&self) -> i32 {
        self.x
    }

    pub fn original_y(&self) -> i32 {
        self.y
    }

    pub fn original_width(&self) -> i32 {
        self.width
    }

    pub fn original_opacity(&self) -> u8 {
        self.opacity
    }

    pub fn original_visual_id(&self) -> i32 {
        self.visual_id
    }

    pub fn original_hidden(&self) -> bool {
        self.hidden
    }

    /// Item slots keep their rendering attributes under host control.
    pub fn is_icon(&self, item_width: i32) -> bool {
        self.width == item_width
    }

    /// Writes the captured state back onto the live widget.
    pub fn restore<H>(&self, host: &mut H, item_width: i32)
    where
        H: WidgetHost<Handle = W>,
    {
        host.set_x(self.handle, self.x);
        host.set_y(self.handle, self.y);
        host.set_hidden(self.handle, self.hidden);

        if !self.is_icon(item_width) {
            host.set_opacity(self.handle, self.opacity);
            host.set_visual_id(self.handle, self.visual_id);
            host.set_width(self.handle, self.width);
            host.set_width_mode(self.handle, self.width_mode);
            host.set_x_position_mode(self.handle, self.x_position_mode);
            host.set_hover_shade(self.handle, None);
        }

        host.revalidate(self.handle);
    }

    /// Puts back only the horizontal position, for parked junk widgets.
    pub fn restore_x<H>(&self, host: &mut H)
    where
        H: WidgetHost<Handle = W>,
    {
        host.set_x(self.handle, self.x);
        host.revalidate(self.handle);
    }
}
