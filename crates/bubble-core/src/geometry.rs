//! Axis-aligned geometry shared by the tracker, integrator and hit testing.
//!
//! All coordinates are CSS pixels relative to the viewport's top-left corner,
//! matching what `getBoundingClientRect` and pointer `clientX/clientY` report.

use glam::Vec2;

/// Visible area the field lives in.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Largest top-left corner that keeps a square of `size` fully inside.
    ///
    /// Collapses to zero on an axis where the square does not fit at all.
    #[inline]
    pub fn max_corner(&self, size: f32) -> Vec2 {
        Vec2::new(
            (self.width - size).max(0.0),
            (self.height - size).max(0.0),
        )
    }

    /// Clamp a top-left corner so the square of `size` stays inside.
    #[inline]
    pub fn clamp_corner(&self, corner: Vec2, size: f32) -> Vec2 {
        corner.clamp(Vec2::ZERO, self.max_corner(size))
    }
}

/// Axis-aligned rectangle described by its top-left corner and extent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Grow the rectangle by `pad` on every side.
    #[inline]
    pub fn inflate(&self, pad: f32) -> Rect {
        Rect {
            left: self.left - pad,
            top: self.top - pad,
            width: self.width + 2.0 * pad,
            height: self.height + 2.0 * pad,
        }
    }

    /// Strict overlap with the square whose top-left is `corner`.
    ///
    /// Touching edges do not count, so a square pushed exactly onto a face is
    /// considered resolved.
    #[inline]
    pub fn overlaps_square(&self, corner: Vec2, size: f32) -> bool {
        corner.x < self.right()
            && corner.x + size > self.left
            && corner.y < self.bottom()
            && corner.y + size > self.top
    }

    /// True when some part of the rectangle lies within `[0, height]` vertically.
    #[inline]
    pub fn intersects_rows(&self, height: f32) -> bool {
        self.bottom() > 0.0 && self.top < height
    }
}

/// Circle containment used by pointer hit testing.
#[inline]
pub fn circle_contains(center: Vec2, radius: f32, point: Vec2) -> bool {
    center.distance_squared(point) <= radius * radius
}
