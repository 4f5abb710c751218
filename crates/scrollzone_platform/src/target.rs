//! Event targets and owned listener handles

use std::rc::Rc;

use slotmap::new_key_type;

use crate::event::{EventKind, InputEvent};

new_key_type! {
    /// Identifies one listener registration on an [`EventTarget`]
    pub struct ListenerId;
}

/// Callback invoked for each dispatched event
///
/// Uses Rc since the host UI is single-threaded.
pub type Listener = Rc<dyn Fn(&InputEvent)>;

/// Somewhere listeners can be registered (element, body, document, window)
pub trait EventTarget {
    /// Register `listener` for events of `kind`
    fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId;

    /// Remove a registration. Returns false if it was already gone.
    fn remove_listener(&self, kind: EventKind, id: ListenerId) -> bool;
}

/// An owned listener registration
///
/// The registration lives exactly as long as the handle: [`detach`] or
/// dropping the handle removes it from the target. Controllers keep the
/// handles they created and tear down by dropping them.
///
/// [`detach`]: ListenerHandle::detach
pub struct ListenerHandle {
    target: Rc<dyn EventTarget>,
    kind: EventKind,
    id: Option<ListenerId>,
}

impl ListenerHandle {
    /// Register `listener` on `target` and take ownership of the registration
    pub fn attach(target: &Rc<dyn EventTarget>, kind: EventKind, listener: Listener) -> Self {
        let id = target.add_listener(kind, listener);
        Self {
            target: Rc::clone(target),
            kind,
            id: Some(id),
        }
    }

    /// Event kind this handle listens for
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Whether the registration is still live
    pub fn is_attached(&self) -> bool {
        self.id.is_some()
    }

    /// Remove the registration
    pub fn detach(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.target.remove_listener(self.kind, id);
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .finish()
    }
}
