//! Leading-edge throttle
//!
//! The first call in a window goes through immediately; every later call in
//! the same window is dropped. There is no trailing call: once activity
//! stops, nothing fires late.

use std::time::Duration;

/// Leading-edge rate limiter
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Duration>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a call at `now` may proceed
    ///
    /// An admitted call opens a new window starting at `now`.
    pub fn admit(&mut self, now: Duration) -> bool {
        match self.last {
            Some(last) if now.saturating_sub(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the current window so the next call is admitted
    pub fn reset(&mut self) {
        self.last = None;
    }
}
