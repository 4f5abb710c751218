//! Pointer sampling
//!
//! Positional events arrive far more often than velocity needs to change.
//! The sampler admits at most one event per throttle window (leading edge)
//! and turns it into a [`Velocity`] using the container's current bounding
//! box.

use std::time::Duration;

use scrollzone_platform::{Point, Rect};

use crate::state::Velocity;
use crate::strength::StrengthFn;
use crate::throttle::Throttle;

/// Throttled velocity recomputation
pub struct PointerSampler {
    throttle: Throttle,
    horizontal: StrengthFn,
    vertical: StrengthFn,
}

impl PointerSampler {
    pub fn new(interval: Duration, horizontal: StrengthFn, vertical: StrengthFn) -> Self {
        Self {
            throttle: Throttle::new(interval),
            horizontal,
            vertical,
        }
    }

    /// Strength functions for a sample at `now`, or `None` when the sample
    /// falls inside the current throttle window.
    ///
    /// The functions are cloned so callers can run them without holding a
    /// borrow of the sampler.
    pub fn admit(&mut self, now: Duration) -> Option<(StrengthFn, StrengthFn)> {
        if !self.throttle.admit(now) {
            return None;
        }
        Some((self.horizontal.clone(), self.vertical.clone()))
    }
}

/// Velocity for `point` inside `rect`
pub fn measure(
    horizontal: &dyn Fn(Rect, Point) -> f32,
    vertical: &dyn Fn(Rect, Point) -> f32,
    rect: Rect,
    point: Point,
) -> Velocity {
    Velocity::new(horizontal(rect, point), vertical(rect, point))
}
