//! Firmware replies and the ACK/NACK handshake decoder.
//!
//! The firmware answers every host frame with one 32-byte report whose first
//! byte is the response code. An ACK echoes the acknowledged opcode in byte 1;
//! hello and echo replies carry text after that.
//!
//! ```text
//! ACK:   | 0x02 | acked opcode | data...            |
//! ECHO:  | 0x02 | echoed payload...                 |
//! NACK:  | 0x03 | undefined...                      |
//! ```

use crate::constants::*;
use crate::error::{AbortReason, ProtocolError, ProtocolResult};

/// An acknowledged firmware reply.
#[derive(Clone, PartialEq, Eq)]
pub struct AckResponse {
    raw: [u8; FRAME_SIZE],
    len: usize,
}

impl AckResponse {
    /// The full raw response, as read from the device.
    pub fn bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.raw
    }

    /// Number of bytes the transport reported reading.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the transport reported an empty read. Never true for a decoded ACK.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The opcode byte the firmware says it acknowledged.
    pub fn acked_code(&self) -> u8 {
        self.raw[ACKED_OPCODE_OFFSET]
    }

    /// Bytes past `offset` as text, stopping at the first NUL.
    pub fn text_from(&self, offset: usize) -> String {
        let tail = self.raw.get(offset..).unwrap_or_default();
        let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
        String::from_utf8_lossy(&tail[..end]).into_owned()
    }
}

impl std::fmt::Debug for AckResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AckResponse")
            .field("raw", &format_args!("{:02x?}", &self.raw[..]))
            .field("len", &self.len)
            .finish()
    }
}

/// Decode the reply to one handshake step.
///
/// `read` is the transport's read outcome: the byte count, or its error.
/// Transport errors, empty reads (which includes a read timeout) and any
/// response code other than ACK all fail with `TransferAborted`.
pub fn decode_ack<E: std::fmt::Display>(
    raw: &[u8; FRAME_SIZE],
    read: Result<usize, E>,
) -> ProtocolResult<AckResponse> {
    log::trace!("Received message: {:02x?}", &raw[..]);

    let len = match read {
        Err(e) => {
            log::error!("Read failed: {}", e);
            return Err(ProtocolError::TransferAborted(AbortReason::ReadFailed(
                e.to_string(),
            )));
        }
        Ok(0) => {
            log::debug!("Got empty response");
            return Err(ProtocolError::TransferAborted(AbortReason::NoResponse));
        }
        Ok(n) => n,
    };

    match raw[RESPONSE_CODE_OFFSET] {
        OP_ACK => {
            log::trace!("Got ACK for 0x{:02X}", raw[ACKED_OPCODE_OFFSET]);
            Ok(AckResponse { raw: *raw, len })
        }
        OP_NACK => {
            log::error!("Got NACK");
            Err(ProtocolError::TransferAborted(AbortReason::Nack))
        }
        code => {
            log::error!("Got response code 0x{:02X}", code);
            Err(ProtocolError::TransferAborted(
                AbortReason::UnexpectedResponse(code),
            ))
        }
    }
}
