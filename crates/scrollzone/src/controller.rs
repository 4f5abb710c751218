//! Scrollzone controller
//!
//! Ties the tracker, sampler, and engine to a host. The controller is shared
//! between the owner and the listeners it registers:
//!
//! ```text
//! Scrollzone ──Rc──> RefCell<Inner> <──Weak── listener / frame / monitor callbacks
//! ```
//!
//! Callbacks upgrade their weak reference on every call, so a dropped
//! controller is never kept alive by its own listeners. No borrow of
//! `Inner` is held while host code runs (strength functions,
//! `on_scroll_change`), which lets that code call back into the controller,
//! including disposing it.

use std::cell::RefCell;
use std::mem;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;
use scrollzone_platform::{
    Axis, Clock, EventScope, EventTarget, Host, InputEvent, Listener, ListenerHandle,
    PlatformError, Point, Rect, ScrollContainer, Subscription,
};
use tracing::{debug, trace};

use crate::config::{ContainerSource, ScrollzoneConfig};
use crate::engine::{ScrollChangeCallback, ScrollEngine, TickOutcome};
use crate::error::Result;
use crate::sampler::{measure, PointerSampler};
use crate::state::{ScrollState, Velocity};
use crate::strategy::{ListenerStrategy, StandardStrategy};
use crate::strength::{create_strength, StrengthFn};
use crate::tracker::{DragSignalTracker, DragTransition};

/// Maps the resolved container to the element that is actually scrolled
pub type ContainerResolver = Rc<dyn Fn(Rc<dyn ScrollContainer>) -> Rc<dyn ScrollContainer>>;

// ============================================================================
// Builder
// ============================================================================

/// Builder for a [`Scrollzone`]
///
/// ```
/// use scrollzone::prelude::*;
/// use scrollzone_platform::headless::HeadlessHost;
/// use scrollzone_platform::Rect;
///
/// let host = HeadlessHost::new(Rect::new(0.0, 0.0, 600.0, 600.0), 600.0, 2400.0);
/// let zone = Scrollzone::builder(ScrollzoneConfig::html5())
///     .on_scroll_change(|left, top| println!("scrolled to {left}, {top}"))
///     .mount(&host)
///     .unwrap();
///
/// assert!(!zone.is_scrolling());
/// ```
pub struct ScrollzoneBuilder {
    config: ScrollzoneConfig,
    horizontal_strength: Option<StrengthFn>,
    vertical_strength: Option<StrengthFn>,
    on_scroll_change: Option<ScrollChangeCallback>,
    container_resolver: Option<ContainerResolver>,
    strategy: Option<Rc<dyn ListenerStrategy>>,
}

impl ScrollzoneBuilder {
    pub fn new(config: ScrollzoneConfig) -> Self {
        Self {
            config,
            horizontal_strength: None,
            vertical_strength: None,
            on_scroll_change: None,
            container_resolver: None,
            strategy: None,
        }
    }

    /// Replace the horizontal strength function
    pub fn horizontal_strength(mut self, strength: impl Fn(Rect, Point) -> f32 + 'static) -> Self {
        self.horizontal_strength = Some(Rc::new(strength));
        self
    }

    /// Replace the vertical strength function
    pub fn vertical_strength(mut self, strength: impl Fn(Rect, Point) -> f32 + 'static) -> Self {
        self.vertical_strength = Some(Rc::new(strength));
        self
    }

    /// Called with the new `(left, top)` offsets after every scroll step
    pub fn on_scroll_change(mut self, callback: impl Fn(f32, f32) + 'static) -> Self {
        self.on_scroll_change = Some(Rc::new(callback));
        self
    }

    /// Scroll a different element than the one selected by the config
    pub fn container_resolver(
        mut self,
        resolver: impl Fn(Rc<dyn ScrollContainer>) -> Rc<dyn ScrollContainer> + 'static,
    ) -> Self {
        self.container_resolver = Some(Rc::new(resolver));
        self
    }

    /// Use a custom listener strategy instead of one derived from the config
    pub fn strategy(mut self, strategy: impl ListenerStrategy + 'static) -> Self {
        self.strategy = Some(Rc::new(strategy));
        self
    }

    /// Mount against `host`
    ///
    /// Fails if the config is invalid, the configured container does not
    /// exist, or the host lacks an event target a binding needs. On success
    /// the probe tier is attached and the controller follows the host's drag
    /// monitor until disposed.
    pub fn mount(self, host: &dyn Host) -> Result<Scrollzone> {
        let ScrollzoneBuilder {
            config,
            horizontal_strength,
            vertical_strength,
            on_scroll_change,
            container_resolver,
            strategy,
        } = self;

        config.validate()?;

        let container = match config.container {
            ContainerSource::Root => host.container(),
            ContainerSource::ScrollingElement => host.scrolling_element().ok_or_else(|| {
                PlatformError::ContainerUnavailable("host has no scrolling element".to_string())
            })?,
        };
        let container = match container_resolver {
            Some(resolve) => resolve(container),
            None => container,
        };

        let strategy = strategy.unwrap_or_else(|| {
            Rc::new(StandardStrategy::from_config(&config)) as Rc<dyn ListenerStrategy>
        });

        let mut targets: FxHashMap<EventScope, Rc<dyn EventTarget>> = FxHashMap::default();
        for binding in strategy
            .probe_bindings()
            .into_iter()
            .chain(strategy.tracking_bindings())
        {
            if targets.contains_key(&binding.scope) {
                continue;
            }
            let target = host
                .target(binding.scope)
                .ok_or(PlatformError::TargetUnavailable(binding.scope))?;
            targets.insert(binding.scope, target);
        }

        let horizontal = horizontal_strength.unwrap_or_else(|| {
            Rc::new(create_strength(
                config.buffer,
                Axis::Horizontal,
                config.containment,
            )) as StrengthFn
        });
        let vertical = vertical_strength.unwrap_or_else(|| {
            Rc::new(create_strength(
                config.buffer,
                Axis::Vertical,
                config.containment,
            )) as StrengthFn
        });

        let tracker = DragSignalTracker::new(host.drag_monitor());
        if !tracker.has_monitor() {
            debug!("host has no drag monitor, scrollzone will stay inactive");
        }

        let inner = Rc::new(RefCell::new(Inner {
            engine: ScrollEngine::new(container, host.frames(), config.strength_multiplier),
            sampler: PointerSampler::new(config.throttle_interval(), horizontal, vertical),
            clock: host.clock(),
            state: ScrollState::new(),
            tracker,
            strategy,
            targets,
            probe: Vec::new(),
            tracking: Vec::new(),
            subscription: None,
            on_scroll_change,
            disposed: false,
            config,
        }));

        let weak = Rc::downgrade(&inner);
        let subscription = inner.borrow().tracker.subscribe(Rc::new(move || {
            if let Some(inner) = weak.upgrade() {
                on_drag_state_change(&inner);
            }
        }));
        inner.borrow_mut().subscription = subscription;

        attach_probe(&inner);
        // Drag may already be in progress
        on_drag_state_change(&inner);

        {
            let guard = inner.borrow();
            debug!(
                "scrollzone mounted (rect {:?}, buffer {}, multiplier {}, {} probe listeners)",
                guard.engine.container().bounding_rect(),
                guard.config.buffer,
                guard.config.strength_multiplier,
                guard.probe.len()
            );
        }

        Ok(Scrollzone { inner })
    }
}

// ============================================================================
// Controller
// ============================================================================

/// A mounted autoscroll controller
///
/// Dropping the controller disposes it.
pub struct Scrollzone {
    inner: Rc<RefCell<Inner>>,
}

struct Inner {
    config: ScrollzoneConfig,
    state: ScrollState,
    engine: ScrollEngine,
    sampler: PointerSampler,
    tracker: DragSignalTracker,
    strategy: Rc<dyn ListenerStrategy>,
    clock: Rc<dyn Clock>,
    targets: FxHashMap<EventScope, Rc<dyn EventTarget>>,
    probe: Vec<ListenerHandle>,
    tracking: Vec<ListenerHandle>,
    subscription: Option<Subscription>,
    on_scroll_change: Option<ScrollChangeCallback>,
    disposed: bool,
}

#[derive(Clone, Copy)]
enum Tier {
    Probe,
    Tracking,
}

impl Scrollzone {
    pub fn builder(config: ScrollzoneConfig) -> ScrollzoneBuilder {
        ScrollzoneBuilder::new(config)
    }

    /// Re-read the drag monitor
    ///
    /// Registered with the monitor at mount; hosts without a subscribable
    /// monitor can call it directly.
    pub fn handle_drag_state_change(&self) {
        on_drag_state_change(&self.inner);
    }

    /// A probe-tier event (pointer over the container)
    pub fn handle_probe_event(&self, event: &InputEvent) {
        on_probe(&self.inner, event);
    }

    /// A tracking-tier event (page-wide pointer, `dragend`, `drop`)
    pub fn handle_tracking_event(&self, event: &InputEvent) {
        on_tracking(&self.inner, event);
    }

    /// Unsubscribe, detach every listener, and cancel the loop
    ///
    /// Idempotent. Safe to call from inside any callback.
    pub fn dispose(&self) {
        dispose(&self.inner);
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().disposed
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().state.dragging
    }

    /// Whether the tracking tier is registered
    pub fn is_attached(&self) -> bool {
        self.inner.borrow().state.attached
    }

    /// Whether the loop is scheduled
    pub fn is_scrolling(&self) -> bool {
        self.inner.borrow().state.is_running()
    }

    pub fn velocity(&self) -> Velocity {
        self.inner.borrow().state.velocity
    }

    /// The element being scrolled
    pub fn container(&self) -> Rc<dyn ScrollContainer> {
        Rc::clone(self.inner.borrow().engine.container())
    }

    pub fn config(&self) -> ScrollzoneConfig {
        self.inner.borrow().config.clone()
    }
}

impl Drop for Scrollzone {
    fn drop(&mut self) {
        dispose(&self.inner);
    }
}

impl std::fmt::Debug for Scrollzone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Scrollzone")
            .field("state", &inner.state)
            .field("disposed", &inner.disposed)
            .finish()
    }
}

// ============================================================================
// Event flow
// ============================================================================

fn listener(weak: &Weak<RefCell<Inner>>, tier: Tier) -> Listener {
    let weak = weak.clone();
    Rc::new(move |event: &InputEvent| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        match tier {
            Tier::Probe => on_probe(&inner, event),
            Tier::Tracking => on_tracking(&inner, event),
        }
    })
}

fn attach_probe(rc: &Rc<RefCell<Inner>>) {
    let weak = Rc::downgrade(rc);
    let mut guard = rc.borrow_mut();
    let inner = &mut *guard;
    for binding in inner.strategy.probe_bindings() {
        if let Some(target) = inner.targets.get(&binding.scope) {
            inner.probe.push(ListenerHandle::attach(
                target,
                binding.kind,
                listener(&weak, Tier::Probe),
            ));
        }
    }
}

fn attach_tracking(rc: &Rc<RefCell<Inner>>) {
    let weak = Rc::downgrade(rc);
    let mut guard = rc.borrow_mut();
    let inner = &mut *guard;
    if inner.disposed || inner.state.attached {
        return;
    }
    for binding in inner.strategy.tracking_bindings() {
        if let Some(target) = inner.targets.get(&binding.scope) {
            inner.tracking.push(ListenerHandle::attach(
                target,
                binding.kind,
                listener(&weak, Tier::Tracking),
            ));
        }
    }
    inner.state.attached = true;
    debug!("tracking tier attached ({} listeners)", inner.tracking.len());
}

fn on_drag_state_change(rc: &Rc<RefCell<Inner>>) {
    let (transition, eager) = {
        let mut guard = rc.borrow_mut();
        let inner = &mut *guard;
        if inner.disposed {
            return;
        }
        (
            inner.tracker.refresh(&mut inner.state),
            inner.strategy.attach_on_drag_start(),
        )
    };

    match transition {
        DragTransition::Started => {
            debug!("drag started");
            if eager {
                attach_tracking(rc);
            }
        }
        DragTransition::Ended => {
            debug!("drag ended");
            force_stop(rc);
        }
        DragTransition::Unchanged => {}
    }
}

fn on_probe(rc: &Rc<RefCell<Inner>>, event: &InputEvent) {
    let armed = {
        let inner = rc.borrow();
        !inner.disposed
            && inner.state.dragging
            && !inner.state.attached
            && inner.strategy.accepts(event.kind())
    };
    if !armed {
        return;
    }
    attach_tracking(rc);
    sample(rc, event);
}

fn on_tracking(rc: &Rc<RefCell<Inner>>, event: &InputEvent) {
    let kind = event.kind();
    if kind.is_terminal() {
        debug!("{} received, stopping", kind);
        force_stop(rc);
        return;
    }

    let accepted = {
        let inner = rc.borrow();
        !inner.disposed
            && inner.state.dragging
            && inner.state.attached
            && inner.strategy.accepts(kind)
    };
    if accepted {
        sample(rc, event);
    }
}

/// Stop the loop and detach the tracking tier
fn force_stop(rc: &Rc<RefCell<Inner>>) {
    let handles = {
        let mut guard = rc.borrow_mut();
        let inner = &mut *guard;
        inner.engine.stop(&mut inner.state);
        if !inner.state.attached {
            return;
        }
        inner.state.attached = false;
        mem::take(&mut inner.tracking)
    };
    debug!("tracking tier detached ({} listeners)", handles.len());
    drop(handles);
}

fn sample(rc: &Rc<RefCell<Inner>>, event: &InputEvent) {
    let Some(point) = event.position() else {
        return;
    };

    let (rect, horizontal, vertical) = {
        let mut guard = rc.borrow_mut();
        let inner = &mut *guard;
        let now = inner.clock.now();
        let Some((horizontal, vertical)) = inner.sampler.admit(now) else {
            trace!("{} at {:?} throttled", event.kind(), point);
            return;
        };
        let rect = inner.engine.container().bounding_rect();
        (rect, horizontal, vertical)
    };

    let velocity = measure(&*horizontal, &*vertical, rect, point);
    trace!("{} at {:?} -> {:?}", event.kind(), point, velocity);

    {
        let mut guard = rc.borrow_mut();
        let inner = &mut *guard;
        // A strength function may have ended the drag or disposed us
        if inner.disposed || !inner.state.attached {
            return;
        }
        inner.engine.set_velocity(&mut inner.state, velocity);
    }
    start_scrolling(rc);
}

fn start_scrolling(rc: &Rc<RefCell<Inner>>) {
    let started = {
        let mut guard = rc.borrow_mut();
        let inner = &mut *guard;
        inner.engine.start(&mut inner.state)
    };
    if started {
        tick(rc);
    }
}

fn tick(rc: &Rc<RefCell<Inner>>) {
    let (outcome, callback) = {
        let mut guard = rc.borrow_mut();
        let inner = &mut *guard;
        if inner.disposed {
            return;
        }
        // Whichever frame is running has been consumed
        inner.state.frame = None;
        (
            inner.engine.step(&mut inner.state),
            inner.on_scroll_change.clone(),
        )
    };

    match outcome {
        TickOutcome::Stopped => return,
        TickOutcome::Scrolled { left, top } => {
            if let Some(callback) = callback {
                callback(left, top);
            }
        }
        TickOutcome::Skipped => {}
    }

    let weak = Rc::downgrade(rc);
    let mut guard = rc.borrow_mut();
    let inner = &mut *guard;
    // The callback may have stopped, disposed, or already restarted the loop
    if inner.disposed || inner.state.is_running() || !inner.engine.can_scroll(&inner.state) {
        return;
    }
    inner.engine.schedule(
        &mut inner.state,
        Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                tick(&inner);
            }
        }),
    );
}

fn dispose(rc: &Rc<RefCell<Inner>>) {
    let (subscription, probe, tracking) = {
        let mut guard = rc.borrow_mut();
        let inner = &mut *guard;
        if inner.disposed {
            return;
        }
        inner.disposed = true;
        inner.engine.stop(&mut inner.state);
        inner.state.attached = false;
        inner.state.dragging = false;
        (
            inner.subscription.take(),
            mem::take(&mut inner.probe),
            mem::take(&mut inner.tracking),
        )
    };
    drop(subscription);
    drop(probe);
    drop(tracking);
    debug!("scrollzone disposed");
}
