//! Error types for device discovery and transport.

use thiserror::Error;

/// Errors that can occur while finding, opening or talking to a device.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// No attached device satisfies the query.
    #[error("no such device: {query}")]
    NoDeviceFound {
        /// The query that matched nothing.
        query: String,
    },

    /// More than one attached device satisfies the query.
    #[error("device is not unique: {count} devices match {query}")]
    NoUniqueDeviceFound {
        /// The ambiguous query.
        query: String,
        /// How many devices matched.
        count: usize,
    },

    /// Query string could not be parsed.
    #[error("invalid device query: {0}")]
    InvalidQuery(String),

    /// Device path cannot be handed to the HID library.
    #[error("invalid device path: {0}")]
    InvalidPath(String),

    /// Error reported by the HID library.
    #[error("HID error: {0}")]
    Hid(#[from] hidapi::HidError),

    /// Error reported by a non-HID transport.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Result type for device operations.
pub type Result<T> = std::result::Result<T, DeviceError>;
