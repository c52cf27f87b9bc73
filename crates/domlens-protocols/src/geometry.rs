//! Viewport geometry: bounding rectangles and viewport size.

use serde::{Deserialize, Serialize};

/// Axis-aligned, viewport-relative rectangle occupied by a rendered node.
///
/// `right` and `bottom` are derived from the other four edges and are
/// recomputed on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RectInput")]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub right: f64,
    pub bottom: f64,
}

#[derive(Deserialize)]
struct RectInput {
    #[serde(default)]
    top: f64,
    #[serde(default)]
    left: f64,
    #[serde(default)]
    width: f64,
    #[serde(default)]
    height: f64,
}

impl From<RectInput> for Rect {
    fn from(input: RectInput) -> Self {
        Rect::new(input.top, input.left, input.width, input.height)
    }
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
            right: left + width,
            bottom: top + height,
        }
    }

    /// Shift by a scroll delta (positive values scroll the page down/right).
    pub fn scrolled_by(&self, dx: f64, dy: f64) -> Self {
        Rect::new(self.top - dy, self.left - dx, self.width, self.height)
    }

    /// Clip the rectangle so its top-left corner is never negative.
    pub fn clamp_to_origin(&self) -> Self {
        let top = self.top.max(0.0);
        let left = self.left.max(0.0);
        let width = (self.right - left).max(0.0);
        let height = (self.bottom - top).max(0.0);
        Rect::new(top, left, width, height)
    }

    /// Check if a point is inside this rectangle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}
