use std::fmt;

use crate::foundation::error::{VdslError, VdslResult};

pub use kurbo::{Circle, Line, Point, Rect, Vec2};

/// Pixel rectangle placing a spatial command inside the shared canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ItemBounds {
    /// Left edge in pixels.
    pub left: f64,
    /// Top edge in pixels.
    pub top: f64,
    /// Right edge in pixels.
    pub right: f64,
    /// Bottom edge in pixels.
    pub bottom: f64,
}

impl ItemBounds {
    /// Build bounds, rejecting non-finite or inverted edges.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> VdslResult<Self> {
        if ![left, top, right, bottom].iter().all(|v| v.is_finite()) {
            return Err(VdslError::validation("bounds edges must be finite"));
        }
        if left >= right || top >= bottom {
            return Err(VdslError::validation(
                "bounds must satisfy left < right and top < bottom",
            ));
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Bounds anchored at the origin covering a canvas.
    pub fn from_canvas(canvas: CanvasSize) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            right: canvas.width,
            bottom: canvas.height,
        }
    }

    /// Width in pixels.
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    /// Height in pixels.
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    /// Top-left corner.
    pub fn origin(self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Same rectangle as a [`kurbo::Rect`].
    pub fn to_rect(self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom)
    }
}

impl fmt::Display for ItemBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Nominal canvas size declared by a `CANVAS` command.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl CanvasSize {
    /// Canvas used when a frame declares none.
    pub const DEFAULT: CanvasSize = CanvasSize {
        width: 800.0,
        height: 800.0,
    };
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
