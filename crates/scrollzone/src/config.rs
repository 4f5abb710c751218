//! Controller configuration
//!
//! Everything here is plain data, immutable once a controller is mounted,
//! and loadable from TOML:
//!
//! ```toml
//! buffer = 120.0
//! speed = 40.0
//! attach = "eager"
//! event_sources = "drag_only"
//! ```
//!
//! Closures (strength overrides, the scroll-change callback, container
//! resolution) are passed to [`ScrollzoneBuilder`](crate::ScrollzoneBuilder)
//! instead.

use std::fs;
use std::path::Path;
use std::time::Duration;

use scrollzone_platform::{EventKind, EventScope};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrollzoneError};
use crate::strength::{ContainmentPolicy, DEFAULT_BUFFER};

/// Default scroll speed in pixels per mutating tick at full strength
pub const DEFAULT_STRENGTH_MULTIPLIER: f32 = 30.0;

/// Default pointer sampling interval
pub const DEFAULT_THROTTLE_MS: u64 = 100;

/// When the active-tracking listener tier is attached
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachPolicy {
    /// On the first probe event over the container while dragging
    #[default]
    Lazy,
    /// As soon as the drag monitor reports a drag
    Eager,
}

/// Which positional events feed the sampler
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSources {
    /// HTML5 `dragover` only
    DragOnly,
    /// `dragover`, `mousemove`, and `touchmove`
    #[default]
    PointerAndTouch,
}

impl EventSources {
    /// Whether positional events of `kind` are sampled
    pub fn includes(self, kind: EventKind) -> bool {
        match self {
            EventSources::DragOnly => kind == EventKind::DragOver,
            EventSources::PointerAndTouch => kind.is_positional(),
        }
    }

    pub fn includes_touch(self) -> bool {
        self.includes(EventKind::TouchMove)
    }
}

/// Where the active-tracking tier listens
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingTarget {
    #[default]
    Window,
    Body,
}

impl TrackingTarget {
    pub fn scope(self) -> EventScope {
        match self {
            TrackingTarget::Window => EventScope::Window,
            TrackingTarget::Body => EventScope::Body,
        }
    }
}

/// Which element is scrolled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerSource {
    /// The wrapped component's own root node
    #[default]
    Root,
    /// The host's document-level scrolling element
    ScrollingElement,
}

/// Configuration for one controller
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollzoneConfig {
    /// Distance from each edge where scrolling starts
    pub buffer: f32,
    /// Pixels per mutating tick at full strength. 0 disables scrolling.
    #[serde(alias = "speed")]
    pub strength_multiplier: f32,
    /// Minimum interval between pointer samples (ms)
    pub throttle_ms: u64,
    /// Containment rule of the default strength functions
    pub containment: ContainmentPolicy,
    /// When to attach the active-tracking tier
    pub attach: AttachPolicy,
    /// Positional events that are sampled
    pub event_sources: EventSources,
    /// Where the active-tracking tier listens
    pub tracking_target: TrackingTarget,
    /// Which element is scrolled
    pub container: ContainerSource,
}

impl Default for ScrollzoneConfig {
    fn default() -> Self {
        Self {
            buffer: DEFAULT_BUFFER,
            strength_multiplier: DEFAULT_STRENGTH_MULTIPLIER,
            throttle_ms: DEFAULT_THROTTLE_MS,
            containment: ContainmentPolicy::FullRect,
            attach: AttachPolicy::Lazy,
            event_sources: EventSources::PointerAndTouch,
            tracking_target: TrackingTarget::Window,
            container: ContainerSource::Root,
        }
    }
}

impl ScrollzoneConfig {
    /// Native HTML5 drag and drop: `dragover` on the body, lazy attach
    pub fn html5() -> Self {
        Self {
            event_sources: EventSources::DragOnly,
            tracking_target: TrackingTarget::Body,
            attach: AttachPolicy::Lazy,
            ..Default::default()
        }
    }

    /// Touch and mouse-emulating backends: everything on the window, eager
    /// attach since `touchmove` does not bubble across sibling elements
    pub fn touch() -> Self {
        Self {
            event_sources: EventSources::PointerAndTouch,
            tracking_target: TrackingTarget::Window,
            attach: AttachPolicy::Eager,
            ..Default::default()
        }
    }

    /// Set the edge buffer.
    pub fn with_buffer(mut self, buffer: f32) -> Self {
        self.buffer = buffer;
        self
    }

    /// Set the strength multiplier (scroll speed).
    pub fn with_strength_multiplier(mut self, multiplier: f32) -> Self {
        self.strength_multiplier = multiplier;
        self
    }

    /// Set the sampling interval.
    pub fn with_throttle_ms(mut self, ms: u64) -> Self {
        self.throttle_ms = ms;
        self
    }

    /// Set the containment policy.
    pub fn with_containment(mut self, containment: ContainmentPolicy) -> Self {
        self.containment = containment;
        self
    }

    /// Set the attach policy.
    pub fn with_attach(mut self, attach: AttachPolicy) -> Self {
        self.attach = attach;
        self
    }

    /// Set the sampled event sources.
    pub fn with_event_sources(mut self, sources: EventSources) -> Self {
        self.event_sources = sources;
        self
    }

    /// Set the tracking target.
    pub fn with_tracking_target(mut self, target: TrackingTarget) -> Self {
        self.tracking_target = target;
        self
    }

    /// Set the container source.
    pub fn with_container(mut self, container: ContainerSource) -> Self {
        self.container = container;
        self
    }

    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    /// Reject negative or non-finite numbers
    pub fn validate(&self) -> Result<()> {
        if !self.buffer.is_finite() || self.buffer < 0.0 {
            return Err(ScrollzoneError::InvalidConfig(format!(
                "buffer must be a non-negative number, got {}",
                self.buffer
            )));
        }
        if !self.strength_multiplier.is_finite() || self.strength_multiplier < 0.0 {
            return Err(ScrollzoneError::InvalidConfig(format!(
                "strength_multiplier must be a non-negative number, got {}",
                self.strength_multiplier
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ScrollzoneConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
