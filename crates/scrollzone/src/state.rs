//! Scroll state shared by the sampler, tracker, and engine

use scrollzone_platform::FrameHandle;

/// Scroll velocity, each component in `[-1, 1]`
///
/// Negative values scroll toward the origin (left/top).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity {
        scale_x: 0.0,
        scale_y: 0.0,
    };

    pub fn new(scale_x: f32, scale_y: f32) -> Self {
        Self { scale_x, scale_y }
    }

    pub fn is_zero(&self) -> bool {
        self.scale_x == 0.0 && self.scale_y == 0.0
    }
}

/// Mutable controller state
///
/// Owned by the controller and lent to each component by `&mut`; never
/// copied.
#[derive(Debug, Default)]
pub struct ScrollState {
    /// Pending frame; `Some` exactly while the loop is scheduled
    pub frame: Option<FrameHandle>,
    /// Ticks since the loop last started
    pub tick: u64,
    /// Whether the active-tracking listener tier is registered
    pub attached: bool,
    /// Whether a drag is in progress
    pub dragging: bool,
    /// Velocity read by each tick
    pub velocity: Velocity,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the animation loop is scheduled
    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }
}
