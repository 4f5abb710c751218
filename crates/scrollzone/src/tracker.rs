//! Drag signal tracking

use std::rc::Rc;

use scrollzone_platform::{DragMonitor, StateChangeCallback, Subscription};

use crate::state::ScrollState;

/// Result of re-reading the drag monitor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragTransition {
    /// false -> true
    Started,
    /// true -> false
    Ended,
    /// No change
    Unchanged,
}

/// Follows the host's drag monitor
///
/// Without a monitor the tracker reports "not dragging" forever, which
/// leaves the controller inert instead of failing.
pub struct DragSignalTracker {
    monitor: Option<Rc<dyn DragMonitor>>,
}

impl DragSignalTracker {
    pub fn new(monitor: Option<Rc<dyn DragMonitor>>) -> Self {
        Self { monitor }
    }

    pub fn has_monitor(&self) -> bool {
        self.monitor.is_some()
    }

    /// Current monitor reading
    pub fn is_dragging(&self) -> bool {
        self.monitor
            .as_ref()
            .map_or(false, |monitor| monitor.is_dragging())
    }

    /// Re-read the monitor into `state.dragging`
    pub fn refresh(&self, state: &mut ScrollState) -> DragTransition {
        let dragging = self.is_dragging();
        let transition = match (state.dragging, dragging) {
            (false, true) => DragTransition::Started,
            (true, false) => DragTransition::Ended,
            _ => DragTransition::Unchanged,
        };
        state.dragging = dragging;
        transition
    }

    /// Subscribe to monitor notifications, if there is a monitor
    pub fn subscribe(&self, callback: StateChangeCallback) -> Option<Subscription> {
        self.monitor
            .as_ref()
            .map(|monitor| monitor.subscribe_to_state_change(callback))
    }
}
