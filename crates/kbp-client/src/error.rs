//! Error types for keyboard operations.

use kbp_device::DeviceError;
use kbp_protocol::{AbortReason, Opcode, ProtocolError};
use thiserror::Error;

/// Errors that can end a keyboard operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Device could not be resolved or opened.
    #[error(transparent)]
    Device(#[from] DeviceError),

    /// The segmented transfer engine only carries layer updates.
    #[error("unsupported command: {0}")]
    UnsupportedCommand(Opcode),

    /// A handshake step was not acknowledged.
    #[error("transfer aborted: {0}")]
    TransferAborted(AbortReason),

    /// A frame could not be built from the given arguments.
    #[error("protocol error: {0}")]
    Protocol(ProtocolError),
}

impl From<ProtocolError> for ClientError {
    fn from(e: ProtocolError) -> Self {
        match e {
            ProtocolError::TransferAborted(reason) => ClientError::TransferAborted(reason),
            other => ClientError::Protocol(other),
        }
    }
}

impl ClientError {
    /// Whether the operation failed during the handshake with the device.
    pub fn is_transfer_aborted(&self) -> bool {
        matches!(self, ClientError::TransferAborted(_))
    }
}

/// Result type alias for keyboard operations.
pub type ClientResult<T> = Result<T, ClientError>;
