//! Input events delivered by the host while a drag is in flight

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::geometry::Point;

/// Kind of a raw input event, used as the listener registration key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// HTML5 `dragover`: pointer moving while a native drag is active
    DragOver,
    /// Generic pointer move (`mousemove`), used by mouse-emulating backends
    MouseMove,
    /// `touchmove`, coordinates carried in `changed_touches[0]`
    TouchMove,
    /// `dragend`: the drag source finished
    DragEnd,
    /// `drop`: the item was dropped on a target
    Drop,
}

impl EventKind {
    /// Events that carry a pointer position
    pub fn is_positional(self) -> bool {
        matches!(
            self,
            EventKind::DragOver | EventKind::MouseMove | EventKind::TouchMove
        )
    }

    /// Events that end the drag from the container's point of view
    pub fn is_terminal(self) -> bool {
        matches!(self, EventKind::DragEnd | EventKind::Drop)
    }

    /// DOM event name
    pub fn name(self) -> &'static str {
        match self {
            EventKind::DragOver => "dragover",
            EventKind::MouseMove => "mousemove",
            EventKind::TouchMove => "touchmove",
            EventKind::DragEnd => "dragend",
            EventKind::Drop => "drop",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a listener is registered
///
/// Events bubble in declaration order: `Container` -> `Body` -> `Document`
/// -> `Window`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventScope {
    /// The wrapped component's own root node
    Container,
    /// `document.body`
    Body,
    /// `document`
    Document,
    /// `window`
    Window,
}

impl EventScope {
    /// All scopes in bubbling order
    pub const BUBBLE_ORDER: [EventScope; 4] = [
        EventScope::Container,
        EventScope::Body,
        EventScope::Document,
        EventScope::Window,
    ];

    /// This scope and every scope an event bubbles to after it
    pub fn bubble_path(self) -> impl Iterator<Item = EventScope> {
        Self::BUBBLE_ORDER.into_iter().filter(move |scope| *scope >= self)
    }
}

impl fmt::Display for EventScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventScope::Container => "container",
            EventScope::Body => "body",
            EventScope::Document => "document",
            EventScope::Window => "window",
        };
        f.write_str(name)
    }
}

/// One touch point of a touch event
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Touch {
    pub identifier: u32,
    pub client_x: f32,
    pub client_y: f32,
}

/// Touches changed by a touch event (usually exactly one)
pub type TouchList = SmallVec<[Touch; 2]>;

/// Raw input events
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer moved during a native drag
    DragOver {
        /// X position in client coordinates
        client_x: f32,
        /// Y position in client coordinates
        client_y: f32,
    },
    /// Pointer moved
    MouseMove {
        /// X position in client coordinates
        client_x: f32,
        /// Y position in client coordinates
        client_y: f32,
    },
    /// Touch points moved
    TouchMove {
        /// Touches that changed in this event
        changed_touches: TouchList,
    },
    /// Drag source finished
    DragEnd,
    /// Item dropped
    Drop,
}

impl InputEvent {
    /// `dragover` at a position
    pub fn drag_over(x: f32, y: f32) -> Self {
        InputEvent::DragOver {
            client_x: x,
            client_y: y,
        }
    }

    /// `mousemove` at a position
    pub fn mouse_move(x: f32, y: f32) -> Self {
        InputEvent::MouseMove {
            client_x: x,
            client_y: y,
        }
    }

    /// `touchmove` with a single changed touch
    pub fn touch_move(x: f32, y: f32) -> Self {
        let mut changed_touches = TouchList::new();
        changed_touches.push(Touch {
            identifier: 0,
            client_x: x,
            client_y: y,
        });
        InputEvent::TouchMove { changed_touches }
    }

    /// Registration key for this event
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::DragOver { .. } => EventKind::DragOver,
            InputEvent::MouseMove { .. } => EventKind::MouseMove,
            InputEvent::TouchMove { .. } => EventKind::TouchMove,
            InputEvent::DragEnd => EventKind::DragEnd,
            InputEvent::Drop => EventKind::Drop,
        }
    }

    /// Normalized pointer position, if the event carries one
    ///
    /// Touch events report the first changed touch.
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::DragOver { client_x, client_y }
            | InputEvent::MouseMove { client_x, client_y } => {
                Some(Point::new(*client_x, *client_y))
            }
            InputEvent::TouchMove { changed_touches } => changed_touches
                .first()
                .map(|touch| Point::new(touch.client_x, touch.client_y)),
            InputEvent::DragEnd | InputEvent::Drop => None,
        }
    }
}
