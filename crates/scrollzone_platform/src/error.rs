//! Platform error types

use thiserror::Error;

use crate::event::EventScope;

/// Platform-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The host could not provide the requested scroll container
    #[error("Scroll container unavailable: {0}")]
    ContainerUnavailable(String),

    /// The host has no event target for the requested scope
    #[error("Event target unavailable: {0}")]
    TargetUnavailable(EventScope),
}
