//! Scrollzone error types

use scrollzone_platform::PlatformError;
use thiserror::Error;

/// Errors raised while configuring or mounting a controller
///
/// Nothing past mount time fails: sampling, ticking, and teardown are
/// infallible.
#[derive(Error, Debug)]
pub enum ScrollzoneError {
    /// The host could not supply something the controller needs
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Configuration file could not be read
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for scrollzone operations
pub type Result<T> = std::result::Result<T, ScrollzoneError>;
