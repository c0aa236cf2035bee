use serde::{Deserialize, Serialize};

/// How a widget's stored width resolves against its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeMode {
    /// Width is taken as-is.
    Absolute,
    /// Width is the parent's width minus the stored value.
    Minus,
    /// Width is a fraction of the parent's width.
    Proportional,
}

/// Which parent edge a widget's stored x is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionMode {
    Left,
    Center,
    Right,
}

/// Horizontal geometry written onto a frame widget in one go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub x: Option<i32>,
    pub width: i32,
    pub width_mode: SizeMode,
    pub x_mode: PositionMode,
}

impl Span {
    pub const fn new(width: i32, width_mode: SizeMode, x_mode: PositionMode) -> Self {
        Self {
            x: None,
            width,
            width_mode,
            x_mode,
        }
    }

    pub const fn at(mut self, x: i32) -> Self {
        self.x = Some(x);
        self
    }
}
