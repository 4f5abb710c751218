//! Edge strength functions
//!
//! A strength function maps a pointer position inside a container to a
//! signed scroll velocity on one axis:
//!
//! ```text
//!  x          x + buffer              x + w - buffer          x + w
//!  |-----------|-------------------------|---------------------|
//! -1   ramp    0        dead zone        0        ramp        +1
//! ```
//!
//! The buffer is capped at half the container's extent so the two ramps
//! never overlap. Points outside the container produce 0.

use std::rc::Rc;

use scrollzone_platform::{Axis, Point, Rect};
use serde::{Deserialize, Serialize};

/// Default distance from each edge where scrolling kicks in
pub const DEFAULT_BUFFER: f32 = 150.0;

/// Shared strength function, as stored by the controller
pub type StrengthFn = Rc<dyn Fn(Rect, Point) -> f32>;

/// How strictly a point must be inside the container to produce strength
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainmentPolicy {
    /// The point must be inside the whole rectangle
    #[default]
    FullRect,
    /// The point only has to be within the rectangle's span on the scored axis
    AxisOnly,
}

/// Signed strength in `[-1, 1]` for `point` along `axis`
///
/// A zero-sized container or a zero buffer yields 0 rather than dividing by
/// zero.
pub fn strength(
    buffer: f32,
    rect: Rect,
    point: Point,
    axis: Axis,
    containment: ContainmentPolicy,
) -> f32 {
    let origin = rect.origin(axis);
    let extent = rect.extent(axis);
    let position = point.along(axis);

    if !rect.spans(axis, position) {
        return 0.0;
    }
    if containment == ContainmentPolicy::FullRect
        && !rect.spans(axis.cross(), point.along(axis.cross()))
    {
        return 0.0;
    }

    let buffer = (extent / 2.0).min(buffer);
    // Also rejects NaN
    if !(buffer > 0.0) {
        return 0.0;
    }

    if position < origin + buffer {
        (position - origin - buffer) / buffer
    } else if position > origin + extent - buffer {
        -((origin + extent - position - buffer) / buffer)
    } else {
        0.0
    }
}

/// Strength function for one axis bound to a buffer and containment policy
pub fn create_strength(
    buffer: f32,
    axis: Axis,
    containment: ContainmentPolicy,
) -> impl Fn(Rect, Point) -> f32 + Clone {
    move |rect, point| strength(buffer, rect, point, axis, containment)
}

/// Horizontal strength function with `buffer`
pub fn create_horizontal_strength(buffer: f32) -> impl Fn(Rect, Point) -> f32 + Clone {
    create_strength(buffer, Axis::Horizontal, ContainmentPolicy::FullRect)
}

/// Vertical strength function with `buffer`
pub fn create_vertical_strength(buffer: f32) -> impl Fn(Rect, Point) -> f32 + Clone {
    create_strength(buffer, Axis::Vertical, ContainmentPolicy::FullRect)
}

/// Horizontal strength function with an explicit containment policy
pub fn create_horizontal_strength_with_containment(
    buffer: f32,
    containment: ContainmentPolicy,
) -> impl Fn(Rect, Point) -> f32 + Clone {
    create_strength(buffer, Axis::Horizontal, containment)
}

/// Vertical strength function with an explicit containment policy
pub fn create_vertical_strength_with_containment(
    buffer: f32,
    containment: ContainmentPolicy,
) -> impl Fn(Rect, Point) -> f32 + Clone {
    create_strength(buffer, Axis::Vertical, containment)
}

/// Horizontal strength with [`DEFAULT_BUFFER`]
pub fn default_horizontal_strength(rect: Rect, point: Point) -> f32 {
    strength(
        DEFAULT_BUFFER,
        rect,
        point,
        Axis::Horizontal,
        ContainmentPolicy::FullRect,
    )
}

/// Vertical strength with [`DEFAULT_BUFFER`]
pub fn default_vertical_strength(rect: Rect, point: Point) -> f32 {
    strength(
        DEFAULT_BUFFER,
        rect,
        point,
        Axis::Vertical,
        ContainmentPolicy::FullRect,
    )
}
