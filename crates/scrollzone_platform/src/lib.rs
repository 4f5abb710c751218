//! Scrollzone Platform Abstraction Layer
//!
//! This crate provides the host-facing traits and types that the autoscroll
//! controller in `scrollzone` is written against. A host UI layer (a DOM
//! binding, a native toolkit, or the [`headless`] host used in tests)
//! implements these traits once and the controller stays framework agnostic.
//!
//! # Architecture
//!
//! The abstraction is built around a handful of small traits:
//!
//! - [`ScrollContainer`] - Bounding box, scroll offsets, and scroll extents of one element
//! - [`EventTarget`] - Somewhere listeners can be registered (container, body, document, window)
//! - [`DragMonitor`] - Reports whether a drag is in progress and notifies on changes
//! - [`FrameScheduler`] - `requestAnimationFrame`-style frame callbacks
//! - [`Clock`] - Monotonic time for rate limiting
//! - [`Host`] - Bundles all of the above for one mounted controller
//!
//! Listener registrations and monitor subscriptions are returned as owned
//! handles ([`ListenerHandle`], [`Subscription`]) that unregister themselves
//! when detached or dropped.
//!
//! # Example
//!
//! ```
//! use scrollzone_platform::headless::HeadlessHost;
//! use scrollzone_platform::prelude::*;
//!
//! let host = HeadlessHost::new(Rect::new(0.0, 0.0, 600.0, 600.0), 600.0, 2400.0);
//! let container = host.container();
//!
//! assert_eq!(container.max_scroll_top(), 1800.0);
//! assert!(!host.drag_monitor().map_or(false, |m| m.is_dragging()));
//! ```

mod clock;
mod container;
mod error;
mod event;
mod frame;
mod geometry;
pub mod headless;
mod host;
mod monitor;
mod target;

// Re-export all public types
pub use clock::{Clock, SystemClock};
pub use container::ScrollContainer;
pub use error::PlatformError;
pub use event::{EventKind, EventScope, InputEvent, Touch, TouchList};
pub use frame::{FrameCallback, FrameHandle, FrameScheduler};
pub use geometry::{Axis, Point, Rect};
pub use host::Host;
pub use monitor::{DragMonitor, StateChangeCallback, Subscription, SubscriptionId};
pub use target::{EventTarget, Listener, ListenerHandle, ListenerId};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::clock::{Clock, SystemClock};
    pub use crate::container::ScrollContainer;
    pub use crate::error::PlatformError;
    pub use crate::event::{EventKind, EventScope, InputEvent, Touch, TouchList};
    pub use crate::frame::{FrameCallback, FrameHandle, FrameScheduler};
    pub use crate::geometry::{Axis, Point, Rect};
    pub use crate::host::Host;
    pub use crate::monitor::{DragMonitor, StateChangeCallback, Subscription};
    pub use crate::target::{EventTarget, Listener, ListenerHandle};
}
