//! Display-refresh scheduling (`requestAnimationFrame` equivalent)

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a pending frame callback
    pub struct FrameHandle;
}

/// Callback run once on the next display refresh
pub type FrameCallback = Box<dyn FnOnce()>;

/// Schedules callbacks for the next display refresh
pub trait FrameScheduler {
    /// Run `callback` on the next frame
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Cancel a pending callback
    ///
    /// Cancelling a handle that already ran or was already cancelled is a
    /// no-op.
    fn cancel_frame(&self, handle: FrameHandle);
}
