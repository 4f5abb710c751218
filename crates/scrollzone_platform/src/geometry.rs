//! Geometry primitives shared by hosts and the controller
//!
//! All values are in the coordinate space of pointer events (client
//! coordinates on the web, window coordinates on desktop).

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle `{x, y, w, h}`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Origin of the rectangle along `axis`
    pub fn origin(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Extent of the rectangle along `axis`
    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.w,
            Axis::Vertical => self.h,
        }
    }

    /// Whether `value` lies within the closed span of this rect on `axis`
    pub fn spans(&self, axis: Axis, value: f32) -> bool {
        let origin = self.origin(axis);
        value >= origin && value <= origin + self.extent(axis)
    }

    /// Closed containment test (edges count as inside)
    pub fn contains(&self, point: Point) -> bool {
        self.spans(Axis::Horizontal, point.x) && self.spans(Axis::Vertical, point.y)
    }
}

/// A pointer or touch position
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Coordinate along `axis`
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

/// Scroll axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis
    pub fn cross(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}
