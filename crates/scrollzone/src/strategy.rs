//! Listener strategies
//!
//! Browsers and input backends disagree on which events arrive where during a
//! drag: Firefox only reports positions through `dragover`, Safari drops
//! `dragover` on an element that scrolled in the same frame, and `touchmove`
//! is only delivered to the element the touch started on. A
//! [`ListenerStrategy`] isolates those differences so the controller only
//! ever asks "what do I listen to, and where".
//!
//! Listeners come in two tiers:
//!
//! - **probe** - cheap, attached for the controller's whole life; notices a
//!   drag reaching the container
//! - **tracking** - attached only while scrolling is possible; samples the
//!   pointer page-wide and force-stops on `dragend`/`drop`

use scrollzone_platform::{EventKind, EventScope};
use smallvec::{smallvec, SmallVec};

use crate::config::{AttachPolicy, EventSources, ScrollzoneConfig, TrackingTarget};

/// One listener registration: an event kind on a scope
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Binding {
    pub scope: EventScope,
    pub kind: EventKind,
}

impl Binding {
    pub const fn new(scope: EventScope, kind: EventKind) -> Self {
        Self { scope, kind }
    }
}

/// A set of bindings for one tier
pub type Bindings = SmallVec<[Binding; 8]>;

/// Decides which events the controller listens to and when
pub trait ListenerStrategy {
    /// Edge-probe tier, attached at mount
    fn probe_bindings(&self) -> Bindings;

    /// Active-tracking tier, attached once scrolling is possible
    fn tracking_bindings(&self) -> Bindings;

    /// Attach the tracking tier as soon as a drag starts instead of waiting
    /// for a probe event
    fn attach_on_drag_start(&self) -> bool;

    /// Whether positional events of `kind` are sampled
    fn accepts(&self, kind: EventKind) -> bool;
}

/// Strategy assembled from configuration values
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StandardStrategy {
    pub sources: EventSources,
    pub target: TrackingTarget,
    pub attach: AttachPolicy,
}

impl StandardStrategy {
    pub fn from_config(config: &ScrollzoneConfig) -> Self {
        Self {
            sources: config.event_sources,
            target: config.tracking_target,
            attach: config.attach,
        }
    }

    /// Native HTML5 drag and drop
    pub fn html5() -> Self {
        Self::from_config(&ScrollzoneConfig::html5())
    }

    /// Touch and mouse-emulating drag backends
    pub fn touch() -> Self {
        Self::from_config(&ScrollzoneConfig::touch())
    }
}

impl ListenerStrategy for StandardStrategy {
    fn probe_bindings(&self) -> Bindings {
        let mut bindings: Bindings = smallvec![Binding::new(
            EventScope::Container,
            EventKind::DragOver
        )];
        if self.sources.includes(EventKind::MouseMove) {
            bindings.push(Binding::new(EventScope::Container, EventKind::MouseMove));
        }
        if self.sources.includes_touch() {
            // touchmove stays on the element the touch started on
            bindings.push(Binding::new(EventScope::Document, EventKind::TouchMove));
        }
        bindings
    }

    fn tracking_bindings(&self) -> Bindings {
        let scope = self.target.scope();
        let mut bindings = Bindings::new();
        for kind in [EventKind::DragOver, EventKind::MouseMove, EventKind::TouchMove] {
            if self.sources.includes(kind) {
                bindings.push(Binding::new(scope, kind));
            }
        }
        bindings.push(Binding::new(scope, EventKind::DragEnd));
        bindings.push(Binding::new(scope, EventKind::Drop));
        bindings
    }

    fn attach_on_drag_start(&self) -> bool {
        self.attach == AttachPolicy::Eager
    }

    fn accepts(&self, kind: EventKind) -> bool {
        self.sources.includes(kind)
    }
}
