//! The host bundle a controller is mounted against

use std::rc::Rc;

use crate::clock::Clock;
use crate::container::ScrollContainer;
use crate::event::EventScope;
use crate::frame::FrameScheduler;
use crate::monitor::DragMonitor;
use crate::target::EventTarget;

/// Everything a host UI layer supplies to one mounted controller
pub trait Host {
    /// The wrapped component's own root node
    fn container(&self) -> Rc<dyn ScrollContainer>;

    /// The document-level scrolling element, if the host has one
    fn scrolling_element(&self) -> Option<Rc<dyn ScrollContainer>> {
        None
    }

    /// Event target for `scope`, if the host exposes one
    fn target(&self, scope: EventScope) -> Option<Rc<dyn EventTarget>>;

    /// The drag monitor. `None` means drags are never reported.
    fn drag_monitor(&self) -> Option<Rc<dyn DragMonitor>>;

    /// Frame scheduler
    fn frames(&self) -> Rc<dyn FrameScheduler>;

    /// Clock used for rate limiting
    fn clock(&self) -> Rc<dyn Clock>;
}
