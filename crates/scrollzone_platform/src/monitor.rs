//! Drag monitor abstraction

use std::rc::Rc;

use slotmap::new_key_type;

new_key_type! {
    /// Identifies one state-change subscription on a monitor
    pub struct SubscriptionId;
}

/// Called whenever the drag state may have changed
///
/// The callback receives no payload; subscribers re-query
/// [`DragMonitor::is_dragging`].
pub type StateChangeCallback = Rc<dyn Fn()>;

/// Reports whether a drag is in progress
///
/// This is the drag-and-drop layer's view of the world (a `react-dnd`
/// style monitor, a native drag session, a gesture recognizer...).
pub trait DragMonitor {
    /// Whether an item is currently being dragged
    fn is_dragging(&self) -> bool;

    /// Subscribe to state-change notifications
    fn subscribe_to_state_change(&self, callback: StateChangeCallback) -> Subscription;
}

/// An owned monitor subscription
///
/// Unsubscribes when [`unsubscribe`](Subscription::unsubscribe) is called or
/// when dropped.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap the monitor-specific unsubscribe action
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Whether the subscription is still live
    pub fn is_active(&self) -> bool {
        self.unsubscribe.is_some()
    }

    /// Stop receiving notifications
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
