//! Protocol error types.

use thiserror::Error;

/// Errors that can occur when encoding or decoding frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Frame is not exactly one report long.
    #[error("invalid frame size: expected {expected} bytes, got {actual}")]
    FrameSize {
        /// Required frame size.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Frame does not start with the `ml` sync bytes.
    #[error("bad frame magic: 0x{0:02X} 0x{1:02X}")]
    BadMagic(u8, u8),

    /// Opcode outside the closed opcode set.
    #[error("unknown opcode: 0x{0:02X}")]
    UnknownOpcode(u8),

    /// Payload does not fit in a single frame.
    #[error("payload too large: maximum {max} bytes, got {actual}")]
    PayloadTooLarge {
        /// Maximum payload length.
        max: usize,
        /// Actual payload length.
        actual: usize,
    },

    /// Layer chunk does not fit alongside the layer header.
    #[error("chunk too large: maximum {max} bytes, got {actual}")]
    ChunkTooLarge {
        /// Maximum chunk length.
        max: usize,
        /// Actual chunk length.
        actual: usize,
    },

    /// Layer index outside 0..LAYER_COUNT.
    #[error("invalid layer {0}: the device has layers 0-3")]
    InvalidLayer(u8),

    /// Opcode is not valid for the requested frame kind.
    #[error("opcode {0} does not carry a layer header")]
    NotALayerOpcode(u8),

    /// A handshake step was not acknowledged.
    #[error("transfer aborted: {0}")]
    TransferAborted(AbortReason),
}

/// Why a handshake step failed to produce an ACK.
///
/// All reasons lead to the same outcome; they only differ in the message shown
/// to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// The transport reported an error while reading.
    ReadFailed(String),
    /// The transport reported an error while writing.
    WriteFailed(String),
    /// Fewer bytes than a full frame were written.
    ShortWrite {
        /// Bytes accepted by the transport.
        written: usize,
    },
    /// Nothing was read before the timeout expired.
    NoResponse,
    /// The firmware answered with NACK.
    Nack,
    /// The firmware answered with something other than ACK or NACK.
    UnexpectedResponse(u8),
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbortReason::ReadFailed(e) => write!(f, "read failed: {}", e),
            AbortReason::WriteFailed(e) => write!(f, "write failed: {}", e),
            AbortReason::ShortWrite { written } => write!(f, "short write ({} bytes)", written),
            AbortReason::NoResponse => write!(f, "no response from device"),
            AbortReason::Nack => write!(f, "device replied NACK"),
            AbortReason::UnexpectedResponse(code) => {
                write!(f, "unexpected response code 0x{:02X}", code)
            }
        }
    }
}

/// Result type alias for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
