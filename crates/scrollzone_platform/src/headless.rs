//! Headless host
//!
//! A deterministic, single-threaded implementation of every host trait. No
//! real display or input device is involved: tests and the CLI simulator
//! dispatch events by hand, advance a manual clock, and run frames one at a
//! time.
//!
//! ```
//! use scrollzone_platform::headless::HeadlessHost;
//! use scrollzone_platform::prelude::*;
//!
//! let host = HeadlessHost::new(Rect::new(0.0, 0.0, 300.0, 300.0), 300.0, 900.0);
//! host.begin_drag();
//! assert!(host.drag_monitor().unwrap().is_dragging());
//!
//! // Nothing is listening yet
//! assert_eq!(host.dispatch_from(EventScope::Container, &InputEvent::drag_over(10.0, 10.0)), 0);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::clock::Clock;
use crate::container::ScrollContainer;
use crate::event::{EventKind, EventScope, InputEvent};
use crate::frame::{FrameCallback, FrameHandle, FrameScheduler};
use crate::geometry::Rect;
use crate::host::Host;
use crate::monitor::{DragMonitor, StateChangeCallback, Subscription, SubscriptionId};
use crate::target::{EventTarget, Listener, ListenerId};

/// Default frame interval (~60fps)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

// ============================================================================
// Container
// ============================================================================

/// In-memory scroll container
///
/// The client extents follow the bounding rect; the scroll extents are the
/// content size. Offsets written through [`ScrollContainer`] are counted so
/// tests can tell which axes the controller touched.
#[derive(Debug)]
pub struct HeadlessContainer {
    rect: Cell<Rect>,
    scroll_left: Cell<f32>,
    scroll_top: Cell<f32>,
    scroll_width: Cell<f32>,
    scroll_height: Cell<f32>,
    left_writes: Cell<usize>,
    top_writes: Cell<usize>,
}

impl HeadlessContainer {
    pub fn new(rect: Rect, content_width: f32, content_height: f32) -> Self {
        Self {
            rect: Cell::new(rect),
            scroll_left: Cell::new(0.0),
            scroll_top: Cell::new(0.0),
            scroll_width: Cell::new(content_width),
            scroll_height: Cell::new(content_height),
            left_writes: Cell::new(0),
            top_writes: Cell::new(0),
        }
    }

    /// Move or resize the container (page scroll, window resize...)
    pub fn set_rect(&self, rect: Rect) {
        self.rect.set(rect);
    }

    /// Change the scrollable content size
    pub fn set_content_size(&self, width: f32, height: f32) {
        self.scroll_width.set(width);
        self.scroll_height.set(height);
    }

    /// Host-side scroll that bypasses the write counters
    pub fn scroll_to(&self, left: f32, top: f32) {
        self.scroll_left.set(left);
        self.scroll_top.set(top);
    }

    /// Number of `set_scroll_left` calls
    pub fn left_writes(&self) -> usize {
        self.left_writes.get()
    }

    /// Number of `set_scroll_top` calls
    pub fn top_writes(&self) -> usize {
        self.top_writes.get()
    }
}

impl ScrollContainer for HeadlessContainer {
    fn bounding_rect(&self) -> Rect {
        self.rect.get()
    }

    fn scroll_left(&self) -> f32 {
        self.scroll_left.get()
    }

    fn set_scroll_left(&self, value: f32) {
        self.left_writes.set(self.left_writes.get() + 1);
        self.scroll_left.set(value);
    }

    fn scroll_top(&self) -> f32 {
        self.scroll_top.get()
    }

    fn set_scroll_top(&self, value: f32) {
        self.top_writes.set(self.top_writes.get() + 1);
        self.scroll_top.set(value);
    }

    fn scroll_width(&self) -> f32 {
        self.scroll_width.get()
    }

    fn scroll_height(&self) -> f32 {
        self.scroll_height.get()
    }

    fn client_width(&self) -> f32 {
        self.rect.get().w
    }

    fn client_height(&self) -> f32 {
        self.rect.get().h
    }
}

// ============================================================================
// Event Target
// ============================================================================

#[derive(Default)]
struct TargetInner {
    ids: SlotMap<ListenerId, EventKind>,
    /// Listeners per kind, in registration order
    listeners: FxHashMap<EventKind, Vec<(ListenerId, Listener)>>,
}

/// In-memory event target for one [`EventScope`]
pub struct HeadlessTarget {
    scope: EventScope,
    inner: RefCell<TargetInner>,
}

impl HeadlessTarget {
    pub fn new(scope: EventScope) -> Self {
        Self {
            scope,
            inner: RefCell::new(TargetInner::default()),
        }
    }

    pub fn scope(&self) -> EventScope {
        self.scope
    }

    /// Invoke every listener registered for the event's kind
    ///
    /// Listeners may add or remove registrations while the event is being
    /// dispatched. A listener removed mid-dispatch is not called; one added
    /// mid-dispatch waits for the next event. Returns the number of
    /// listeners called.
    pub fn dispatch(&self, event: &InputEvent) -> usize {
        let kind = event.kind();
        let snapshot: Vec<(ListenerId, Listener)> = self
            .inner
            .borrow()
            .listeners
            .get(&kind)
            .cloned()
            .unwrap_or_default();

        let mut called = 0;
        for (id, listener) in snapshot {
            let live = self.inner.borrow().ids.contains_key(id);
            if live {
                listener(event);
                called += 1;
            }
        }

        tracing::trace!("{}: dispatched {} to {} listener(s)", self.scope, kind, called);
        called
    }

    /// Listeners registered for `kind`
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.inner
            .borrow()
            .listeners
            .get(&kind)
            .map_or(0, |listeners| listeners.len())
    }

    /// Listeners registered for any kind
    pub fn total_listeners(&self) -> usize {
        self.inner.borrow().ids.len()
    }
}

impl EventTarget for HeadlessTarget {
    fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.ids.insert(kind);
        inner.listeners.entry(kind).or_default().push((id, listener));
        id
    }

    fn remove_listener(&self, kind: EventKind, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.ids.remove(id).is_none() {
            return false;
        }
        if let Some(listeners) = inner.listeners.get_mut(&kind) {
            listeners.retain(|(existing, _)| *existing != id);
            if listeners.is_empty() {
                inner.listeners.remove(&kind);
            }
        }
        true
    }
}

// ============================================================================
// Drag Monitor
// ============================================================================

#[derive(Default)]
struct MonitorInner {
    dragging: bool,
    subscribers: SlotMap<SubscriptionId, StateChangeCallback>,
}

/// Drag monitor driven by [`begin_drag`](Self::begin_drag) /
/// [`end_drag`](Self::end_drag)
#[derive(Default)]
pub struct HeadlessDragMonitor {
    inner: Rc<RefCell<MonitorInner>>,
}

impl HeadlessDragMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a drag and notify subscribers
    pub fn begin_drag(&self) {
        self.inner.borrow_mut().dragging = true;
        self.notify();
    }

    /// End the drag and notify subscribers
    pub fn end_drag(&self) {
        self.inner.borrow_mut().dragging = false;
        self.notify();
    }

    /// Notify subscribers without changing state
    pub fn notify(&self) {
        let snapshot: Vec<(SubscriptionId, StateChangeCallback)> = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .map(|(id, callback)| (id, Rc::clone(callback)))
            .collect();

        for (id, callback) in snapshot {
            let live = self.inner.borrow().subscribers.contains_key(id);
            if live {
                callback();
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl DragMonitor for HeadlessDragMonitor {
    fn is_dragging(&self) -> bool {
        self.inner.borrow().dragging
    }

    fn subscribe_to_state_change(&self, callback: StateChangeCallback) -> Subscription {
        let id = self.inner.borrow_mut().subscribers.insert(callback);
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().subscribers.remove(id);
            }
        })
    }
}

// ============================================================================
// Frames
// ============================================================================

#[derive(Default)]
struct FramesInner {
    callbacks: SlotMap<FrameHandle, FrameCallback>,
    order: VecDeque<FrameHandle>,
    frames_run: u64,
}

/// Frame scheduler whose frames run only when asked
#[derive(Default)]
pub struct HeadlessFrames {
    inner: RefCell<FramesInner>,
}

impl HeadlessFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback that was pending when the frame started
    ///
    /// Callbacks requested during the frame run on the next one. Returns the
    /// number of callbacks run.
    pub fn run_frame(&self) -> usize {
        let due: Vec<FrameHandle> = {
            let mut inner = self.inner.borrow_mut();
            inner.frames_run += 1;
            inner.order.drain(..).collect()
        };

        let mut ran = 0;
        for handle in due {
            let callback = self.inner.borrow_mut().callbacks.remove(handle);
            if let Some(callback) = callback {
                callback();
                ran += 1;
            }
        }
        ran
    }

    /// Callbacks waiting for the next frame
    pub fn pending(&self) -> usize {
        self.inner.borrow().callbacks.len()
    }

    /// Frames run so far
    pub fn frames_run(&self) -> u64 {
        self.inner.borrow().frames_run
    }
}

impl FrameScheduler for HeadlessFrames {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let mut inner = self.inner.borrow_mut();
        let handle = inner.callbacks.insert(callback);
        inner.order.push_back(handle);
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let mut inner = self.inner.borrow_mut();
        if inner.callbacks.remove(handle).is_some() {
            inner.order.retain(|pending| *pending != handle);
        }
    }
}

// ============================================================================
// Clock
// ============================================================================

/// Clock that only moves when advanced
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

// ============================================================================
// Host
// ============================================================================

/// A complete in-memory host
pub struct HeadlessHost {
    root: Rc<HeadlessContainer>,
    scrolling_element: Option<Rc<HeadlessContainer>>,
    targets: FxHashMap<EventScope, Rc<HeadlessTarget>>,
    monitor: Option<Rc<HeadlessDragMonitor>>,
    frames: Rc<HeadlessFrames>,
    clock: Rc<ManualClock>,
    frame_interval: Duration,
}

impl HeadlessHost {
    /// Host whose root container occupies `rect` and scrolls over
    /// `content_width` x `content_height` of content
    pub fn new(rect: Rect, content_width: f32, content_height: f32) -> Self {
        let targets = EventScope::BUBBLE_ORDER
            .into_iter()
            .map(|scope| (scope, Rc::new(HeadlessTarget::new(scope))))
            .collect();

        Self {
            root: Rc::new(HeadlessContainer::new(rect, content_width, content_height)),
            scrolling_element: None,
            targets,
            monitor: Some(Rc::new(HeadlessDragMonitor::new())),
            frames: Rc::new(HeadlessFrames::new()),
            clock: Rc::new(ManualClock::new()),
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }

    /// Add a document-level scrolling element
    pub fn with_scrolling_element(mut self, element: HeadlessContainer) -> Self {
        self.scrolling_element = Some(Rc::new(element));
        self
    }

    /// Remove the drag monitor (drags are never reported)
    pub fn without_drag_monitor(mut self) -> Self {
        self.monitor = None;
        self
    }

    /// Remove the event target for `scope`
    pub fn without_target(mut self, scope: EventScope) -> Self {
        self.targets.remove(&scope);
        self
    }

    /// Clock advance per [`step_frame`](Self::step_frame)
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// The root container
    pub fn root(&self) -> &Rc<HeadlessContainer> {
        &self.root
    }

    /// The document scrolling element, if configured
    pub fn document_scroller(&self) -> Option<&Rc<HeadlessContainer>> {
        self.scrolling_element.as_ref()
    }

    /// The concrete target for `scope`
    pub fn event_target(&self, scope: EventScope) -> Option<&Rc<HeadlessTarget>> {
        self.targets.get(&scope)
    }

    /// The concrete drag monitor
    pub fn monitor(&self) -> Option<&Rc<HeadlessDragMonitor>> {
        self.monitor.as_ref()
    }

    /// The concrete frame scheduler
    pub fn frame_queue(&self) -> &Rc<HeadlessFrames> {
        &self.frames
    }

    /// The concrete clock
    pub fn manual_clock(&self) -> &Rc<ManualClock> {
        &self.clock
    }

    /// Start a drag (no-op without a monitor)
    pub fn begin_drag(&self) {
        if let Some(monitor) = &self.monitor {
            monitor.begin_drag();
        }
    }

    /// End the drag (no-op without a monitor)
    pub fn end_drag(&self) {
        if let Some(monitor) = &self.monitor {
            monitor.end_drag();
        }
    }

    /// Dispatch to a single scope without bubbling
    pub fn dispatch_to(&self, scope: EventScope, event: &InputEvent) -> usize {
        self.targets
            .get(&scope)
            .map_or(0, |target| target.dispatch(event))
    }

    /// Dispatch starting at `scope` and bubbling outward
    pub fn dispatch_from(&self, scope: EventScope, event: &InputEvent) -> usize {
        scope
            .bubble_path()
            .map(|scope| self.dispatch_to(scope, event))
            .sum()
    }

    /// Move the clock without running frames
    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    /// Advance the clock by one frame interval and run one frame
    pub fn step_frame(&self) -> usize {
        self.clock.advance(self.frame_interval);
        self.frames.run_frame()
    }

    /// Run `count` frames, returning the total callbacks run
    pub fn run_frames(&self, count: usize) -> usize {
        (0..count).map(|_| self.step_frame()).sum()
    }

    /// Listeners registered on `scope`
    pub fn listener_count(&self, scope: EventScope) -> usize {
        self.targets
            .get(&scope)
            .map_or(0, |target| target.total_listeners())
    }
}

impl Host for HeadlessHost {
    fn container(&self) -> Rc<dyn ScrollContainer> {
        self.root.clone()
    }

    fn scrolling_element(&self) -> Option<Rc<dyn ScrollContainer>> {
        self.scrolling_element
            .as_ref()
            .map(|element| Rc::clone(element) as Rc<dyn ScrollContainer>)
    }

    fn target(&self, scope: EventScope) -> Option<Rc<dyn EventTarget>> {
        self.targets
            .get(&scope)
            .map(|target| Rc::clone(target) as Rc<dyn EventTarget>)
    }

    fn drag_monitor(&self) -> Option<Rc<dyn DragMonitor>> {
        self.monitor
            .as_ref()
            .map(|monitor| Rc::clone(monitor) as Rc<dyn DragMonitor>)
    }

    fn frames(&self) -> Rc<dyn FrameScheduler> {
        self.frames.clone()
    }

    fn clock(&self) -> Rc<dyn Clock> {
        self.clock.clone()
    }
}
