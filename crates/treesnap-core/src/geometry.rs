#![forbid(unsafe_code)]

//! Geometric primitives in host pixel space.
//!
//! Pointer offsets and element bounds come from the host's event source and
//! are fractional (CSS pixels, scaled canvas units, ...). Everything here is
//! plain `f64` arithmetic with no rounding until a caller asks for it.

use serde::{Deserialize, Serialize};

/// A point or a displacement in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[inline]
    pub fn delta_from(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Whether either axis moved strictly more than `epsilon` away from `other`.
    #[inline]
    pub fn moved_beyond(self, other: Point, epsilon: f64) -> bool {
        (self.x - other.x).abs() > epsilon || (self.y - other.y).abs() > epsilon
    }

    /// Both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Which half of a row the pointer occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalHalf {
    Upper,
    Lower,
}

/// An axis-aligned rectangle in host pixels (bounding client rect).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge. Alias for `self.x`.
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge. Alias for `self.y`.
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if the rectangle has no area (or is not a real rectangle).
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Classify a client-space point against the vertical middle of the rect.
    ///
    /// A point exactly on the middle counts as [`VerticalHalf::Lower`]: when
    /// both "insert before" and "insert after" apply, the later one wins.
    /// Returns `None` for empty rects or non-finite points.
    pub fn vertical_half(&self, point: Point) -> Option<VerticalHalf> {
        if self.is_empty() || !point.is_finite() {
            return None;
        }
        let middle = self.height / 2.0;
        let offset = point.y - self.y;
        if offset < middle {
            Some(VerticalHalf::Upper)
        } else {
            Some(VerticalHalf::Lower)
        }
    }
}
