//! Scrollzone
//!
//! Edge-triggered autoscroll for drag interactions. While something is being
//! dragged and the pointer sits near an edge of a scroll container, the
//! container scrolls toward that edge, faster the closer the pointer is.
//!
//! # Architecture
//!
//! - [`strength`] - Pure edge-strength functions (`[-1, 1]` per axis)
//! - [`tracker`] - Follows the host's drag monitor
//! - [`sampler`] - Throttled pointer sampling into a [`Velocity`]
//! - [`engine`] - Per-frame scrolling driven by the velocity
//! - [`strategy`] - Which events are listened to, where, and when
//! - [`Scrollzone`] - The controller tying all of the above to a
//!   [`Host`](scrollzone_platform::Host)
//!
//! # Example
//!
//! ```
//! use scrollzone::prelude::*;
//! use scrollzone_platform::headless::HeadlessHost;
//! use scrollzone_platform::{EventScope, InputEvent, Rect, ScrollContainer};
//!
//! let host = HeadlessHost::new(Rect::new(0.0, 0.0, 600.0, 600.0), 600.0, 2400.0);
//! host.root().scroll_to(0.0, 500.0);
//!
//! let zone = Scrollzone::builder(ScrollzoneConfig::default())
//!     .mount(&host)
//!     .unwrap();
//!
//! host.begin_drag();
//! host.dispatch_from(EventScope::Container, &InputEvent::drag_over(300.0, 0.0));
//! host.step_frame();
//!
//! assert!(zone.is_scrolling());
//! assert_eq!(host.root().scroll_top(), 470.0);
//! ```

mod clamp;
pub mod config;
mod controller;
pub mod engine;
mod error;
pub mod sampler;
mod state;
pub mod strategy;
pub mod strength;
mod throttle;
pub mod tracker;

#[cfg(test)]
mod tests;

pub use clamp::clamp_int;
pub use config::{
    AttachPolicy, ContainerSource, EventSources, ScrollzoneConfig, TrackingTarget,
    DEFAULT_STRENGTH_MULTIPLIER, DEFAULT_THROTTLE_MS,
};
pub use controller::{ContainerResolver, Scrollzone, ScrollzoneBuilder};
pub use engine::{ScrollChangeCallback, ScrollEngine, TickOutcome};
pub use error::{Result, ScrollzoneError};
pub use sampler::PointerSampler;
pub use state::{ScrollState, Velocity};
pub use strategy::{Binding, Bindings, ListenerStrategy, StandardStrategy};
pub use strength::{
    create_horizontal_strength, create_horizontal_strength_with_containment, create_strength,
    create_vertical_strength, create_vertical_strength_with_containment,
    default_horizontal_strength, default_vertical_strength, ContainmentPolicy, StrengthFn,
    DEFAULT_BUFFER,
};
pub use throttle::Throttle;
pub use tracker::{DragSignalTracker, DragTransition};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{AttachPolicy, EventSources, ScrollzoneConfig, TrackingTarget};
    pub use crate::controller::{Scrollzone, ScrollzoneBuilder};
    pub use crate::error::{Result, ScrollzoneError};
    pub use crate::state::Velocity;
    pub use crate::strategy::{ListenerStrategy, StandardStrategy};
    pub use crate::strength::{
        create_horizontal_strength, create_vertical_strength, ContainmentPolicy,
    };
}
