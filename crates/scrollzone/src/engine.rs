//! Scroll engine
//!
//! Drives the container's scroll offsets from the current [`Velocity`], one
//! step per display frame. The engine owns no state of its own: every call
//! takes the controller's [`ScrollState`].
//!
//! Only odd ticks move the container. Some engines (Safari) will not deliver
//! a `dragover` to an element that emitted a `scroll` in the same frame, so
//! mutating at half the frame rate leaves room for a fresh position sample
//! to land between scrolls.

use std::rc::Rc;

use scrollzone_platform::{FrameCallback, FrameScheduler, ScrollContainer};

use crate::clamp::clamp_int;
use crate::state::{ScrollState, Velocity};

/// Called with `(left, top)` after each mutating tick
pub type ScrollChangeCallback = Rc<dyn Fn(f32, f32)>;

/// What a single tick did
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Nothing to do; the loop was stopped and must not be rescheduled
    Stopped,
    /// Even tick; offsets untouched
    Skipped,
    /// Offsets written (axes with zero velocity keep their value)
    Scrolled { left: f32, top: f32 },
}

/// Per-frame scroll driver for one container
pub struct ScrollEngine {
    container: Rc<dyn ScrollContainer>,
    frames: Rc<dyn FrameScheduler>,
    strength_multiplier: f32,
}

impl ScrollEngine {
    pub fn new(
        container: Rc<dyn ScrollContainer>,
        frames: Rc<dyn FrameScheduler>,
        strength_multiplier: f32,
    ) -> Self {
        Self {
            container,
            frames,
            strength_multiplier,
        }
    }

    pub fn container(&self) -> &Rc<dyn ScrollContainer> {
        &self.container
    }

    pub fn strength_multiplier(&self) -> f32 {
        self.strength_multiplier
    }

    /// Replace the velocity read by the next tick
    pub fn set_velocity(&self, state: &mut ScrollState, velocity: Velocity) {
        state.velocity = velocity;
    }

    /// Whether a tick with the current velocity would move anything
    pub fn can_scroll(&self, state: &ScrollState) -> bool {
        // Either non-zero component keeps the loop alive. Not a sum check:
        // opposite corners such as (1, -1) must still scroll.
        self.strength_multiplier != 0.0 && !state.velocity.is_zero()
    }

    /// Prepare a new loop
    ///
    /// Returns false (and changes nothing) if the loop is already running or
    /// there is nothing to scroll. On true the caller runs the first tick.
    pub fn start(&self, state: &mut ScrollState) -> bool {
        if state.is_running() || !self.can_scroll(state) {
            return false;
        }
        state.tick = 0;
        tracing::debug!(
            "scroll loop starting (velocity {:?}, multiplier {})",
            state.velocity,
            self.strength_multiplier
        );
        true
    }

    /// Cancel any pending frame and zero the velocity
    ///
    /// Safe to call at any time; calling it twice leaves the same state as
    /// calling it once. Returns whether a frame was pending.
    pub fn stop(&self, state: &mut ScrollState) -> bool {
        let pending = state.frame.take();
        if let Some(frame) = pending {
            self.frames.cancel_frame(frame);
            tracing::debug!("scroll loop stopped");
        }
        state.velocity = Velocity::ZERO;
        pending.is_some()
    }

    /// Run one tick
    ///
    /// The caller is responsible for rescheduling unless the outcome is
    /// [`TickOutcome::Stopped`].
    pub fn step(&self, state: &mut ScrollState) -> TickOutcome {
        if !self.can_scroll(state) {
            self.stop(state);
            return TickOutcome::Stopped;
        }

        let tick = state.tick;
        state.tick += 1;
        if tick % 2 == 0 {
            return TickOutcome::Skipped;
        }

        let Velocity { scale_x, scale_y } = state.velocity;
        let mut left = self.container.scroll_left();
        let mut top = self.container.scroll_top();

        if scale_x != 0.0 {
            left = clamp_int(
                0.0,
                self.container.max_scroll_left(),
                left + scale_x * self.strength_multiplier,
            ) as f32;
            self.container.set_scroll_left(left);
        }
        if scale_y != 0.0 {
            top = clamp_int(
                0.0,
                self.container.max_scroll_top(),
                top + scale_y * self.strength_multiplier,
            ) as f32;
            self.container.set_scroll_top(top);
        }

        tracing::trace!("tick {}: scrolled to ({}, {})", tick, left, top);
        TickOutcome::Scrolled { left, top }
    }

    /// Schedule `callback` for the next frame and record its handle
    pub fn schedule(&self, state: &mut ScrollState, callback: FrameCallback) {
        state.frame = Some(self.frames.request_frame(callback));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollzone_platform::headless::{HeadlessContainer, HeadlessFrames};
    use scrollzone_platform::Rect;

    fn engine(multiplier: f32) -> (ScrollEngine, Rc<HeadlessContainer>, Rc<HeadlessFrames>) {
        let container = Rc::new(HeadlessContainer::new(
            Rect::new(0.0, 0.0, 600.0, 600.0),
            1200.0,
            2400.0,
        ));
        let frames = Rc::new(HeadlessFrames::new());
        let engine = ScrollEngine::new(container.clone(), frames.clone(), multiplier);
        (engine, container, frames)
    }

    #[test]
    fn test_odd_ticks_mutate() {
        let (engine, container, _) = engine(30.0);
        let mut state = ScrollState::new();
        container.scroll_to(0.0, 100.0);
        engine.set_velocity(&mut state, Velocity::new(0.0, 1.0));

        assert!(engine.start(&mut state));
        assert_eq!(engine.step(&mut state), TickOutcome::Skipped);
        assert_eq!(
            engine.step(&mut state),
            TickOutcome::Scrolled {
                left: 0.0,
                top: 130.0
            }
        );
        assert_eq!(engine.step(&mut state), TickOutcome::Skipped);
        assert_eq!(container.scroll_top(), 130.0);
        assert_eq!(state.tick, 3);
    }

    #[test]
    fn test_zero_axis_is_not_written() {
        let (engine, container, _) = engine(30.0);
        let mut state = ScrollState::new();
        engine.set_velocity(&mut state, Velocity::new(0.0, 0.5));

        engine.step(&mut state);
        engine.step(&mut state);

        assert_eq!(container.top_writes(), 1);
        assert_eq!(container.left_writes(), 0);
        assert_eq!(container.scroll_top(), 15.0);
    }

    #[test]
    fn test_offsets_are_clamped_and_floored() {
        let (engine, container, _) = engine(30.0);
        let mut state = ScrollState::new();
        container.scroll_to(10.0, 2390.0);
        engine.set_velocity(&mut state, Velocity::new(-0.5, 1.0));

        engine.step(&mut state);
        assert_eq!(
            engine.step(&mut state),
            TickOutcome::Scrolled {
                left: 0.0,
                top: 1800.0
            }
        );

        engine.set_velocity(&mut state, Velocity::new(0.3, 0.0));
        container.scroll_to(100.0, 0.0);
        engine.step(&mut state);
        // 100 + 0.3 * 30 = 109.0 (fractional part floored)
        assert_eq!(engine.step(&mut state), TickOutcome::Scrolled { left: 109.0, top: 0.0 });
    }

    #[test]
    fn test_zero_velocity_stops() {
        let (engine, _, frames) = engine(30.0);
        let mut state = ScrollState::new();

        assert!(!engine.start(&mut state));

        engine.set_velocity(&mut state, Velocity::new(1.0, 0.0));
        engine.schedule(&mut state, Box::new(|| {}));
        engine.set_velocity(&mut state, Velocity::ZERO);

        assert_eq!(engine.step(&mut state), TickOutcome::Stopped);
        assert!(!state.is_running());
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn test_zero_multiplier_disables_scrolling() {
        let (engine, container, _) = engine(0.0);
        let mut state = ScrollState::new();
        engine.set_velocity(&mut state, Velocity::new(1.0, 1.0));

        assert_eq!(engine.strength_multiplier(), 0.0);
        assert!(!engine.start(&mut state));
        assert_eq!(engine.step(&mut state), TickOutcome::Stopped);
        assert_eq!(container.left_writes() + container.top_writes(), 0);
    }

    #[test]
    fn test_opposite_components_keep_scrolling() {
        let (engine, container, _) = engine(30.0);
        let mut state = ScrollState::new();
        container.scroll_to(300.0, 300.0);
        engine.set_velocity(&mut state, Velocity::new(1.0, -1.0));

        assert!(engine.can_scroll(&state));
        assert!(engine.start(&mut state));
        engine.step(&mut state);
        assert_eq!(
            engine.step(&mut state),
            TickOutcome::Scrolled {
                left: 330.0,
                top: 270.0
            }
        );
        engine.step(&mut state);
        assert_eq!(
            engine.step(&mut state),
            TickOutcome::Scrolled {
                left: 360.0,
                top: 240.0
            }
        );
    }

    #[test]
    fn test_clamp_follows_content_size() {
        let (engine, container, _) = engine(30.0);
        let mut state = ScrollState::new();
        container.scroll_to(0.0, 590.0);
        engine.set_velocity(&mut state, Velocity::new(0.0, 1.0));

        // 600px viewport over 1000px of content leaves 400px of travel
        container.set_content_size(1200.0, 1000.0);
        engine.step(&mut state);
        assert_eq!(
            engine.step(&mut state),
            TickOutcome::Scrolled {
                left: 0.0,
                top: 400.0
            }
        );
    }

    #[test]
    fn test_start_is_guarded_while_running() {
        let (engine, _, _) = engine(30.0);
        let mut state = ScrollState::new();
        engine.set_velocity(&mut state, Velocity::new(1.0, 0.0));

        assert!(engine.start(&mut state));
        engine.schedule(&mut state, Box::new(|| {}));
        state.tick = 7;

        assert!(!engine.start(&mut state));
        assert_eq!(state.tick, 7);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (engine, _, frames) = engine(30.0);
        let mut state = ScrollState::new();
        engine.set_velocity(&mut state, Velocity::new(-1.0, 0.0));
        engine.schedule(&mut state, Box::new(|| {}));

        assert!(engine.stop(&mut state));
        assert!(!engine.stop(&mut state));

        assert!(state.frame.is_none());
        assert_eq!(state.velocity, Velocity::ZERO);
        assert_eq!(frames.pending(), 0);
    }
}
