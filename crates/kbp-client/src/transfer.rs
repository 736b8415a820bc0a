//! Segmented layer text transfers.
//!
//! Layer text longer than one frame is sent as a sequence of chunks of at
//! most [`MAX_CHUNK_LEN`] bytes. The first chunk goes out as an `OLED_UPDATE`
//! frame, later chunks as `CONT` frames, and a `COMPLETE` frame ends the
//! transfer. Every frame must be acknowledged before the next one is written;
//! the first step that is not acknowledged abandons the transfer.
//!
//! ```text
//! Idle -> Sending -> AwaitingAck -> Sending ... -> Completing -> AwaitingAck -> Done
//!                         \-> Aborted                                \-> Aborted
//! ```

use std::time::Duration;

use kbp_device::Transport;
use kbp_protocol::{decode_ack, AbortReason, AckResponse, Frame, Opcode, FRAME_SIZE, MAX_CHUNK_LEN};
use tracing::{debug, trace, warn};

use crate::error::{ClientError, ClientResult};

/// How long to wait for the firmware to answer one frame.
pub const ACK_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// Handshake
// ============================================================================

/// Write one frame and wait for its acknowledgment.
pub fn exchange<T: Transport + ?Sized>(
    handle: &mut T,
    frame: &Frame,
    timeout: Duration,
) -> ClientResult<AckResponse> {
    trace!("Sending {:?}", frame);
    let written = handle
        .write(frame.as_bytes())
        .map_err(|e| ClientError::TransferAborted(AbortReason::WriteFailed(e.to_string())))?;
    if written < FRAME_SIZE {
        return Err(ClientError::TransferAborted(AbortReason::ShortWrite { written }));
    }

    let mut response = [0u8; FRAME_SIZE];
    let read = handle.read_timeout(&mut response, timeout);
    Ok(decode_ack(&response, read)?)
}

// ============================================================================
// Transfer State
// ============================================================================

/// State of a segmented transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    /// Nothing sent yet.
    Idle,
    /// Data chunks remain to be sent.
    Sending,
    /// A frame is on the wire; waiting for its acknowledgment.
    AwaitingAck {
        /// Whether the outstanding frame is the completion frame.
        completion: bool,
    },
    /// All chunks acknowledged; the completion frame is next.
    Completing,
    /// Every frame was acknowledged.
    Done,
    /// A step was not acknowledged; nothing more will be sent.
    Aborted,
}

/// Counters reported by a successful transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferSummary {
    /// Data frames sent (start + continuations), excluding the completion frame.
    pub data_frames: usize,
    /// Payload bytes sent.
    pub bytes: usize,
}

/// Single-use state for one segmented transfer.
#[derive(Debug)]
pub struct TransferSession<'a> {
    layer: u8,
    remaining: &'a [u8],
    first: bool,
    in_flight: usize,
    state: TransferState,
    summary: TransferSummary,
}

impl<'a> TransferSession<'a> {
    /// Start a transfer of `payload` to `layer`.
    pub fn new(layer: u8, payload: &'a [u8]) -> Self {
        TransferSession {
            layer,
            remaining: payload,
            first: true,
            in_flight: 0,
            state: TransferState::Idle,
            summary: TransferSummary::default(),
        }
    }

    /// Current state.
    pub fn state(&self) -> TransferState {
        self.state
    }

    /// Bytes not yet acknowledged.
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Counters so far.
    pub fn summary(&self) -> TransferSummary {
        self.summary
    }

    /// Build the next frame to write and start waiting for its ACK.
    ///
    /// Returns `None` once the transfer is done or aborted, or while an
    /// acknowledgment is outstanding.
    pub fn next_frame(&mut self) -> ClientResult<Option<Frame>> {
        match self.state {
            TransferState::Idle | TransferState::Sending if !self.remaining.is_empty() => {
                let len = self.remaining.len().min(MAX_CHUNK_LEN);
                let chunk = &self.remaining[..len];
                let frame = if self.first {
                    Frame::layer_start(Opcode::OledUpdate, self.layer, chunk)?
                } else {
                    Frame::layer_continue(self.layer, chunk)?
                };
                self.in_flight = len;
                self.state = TransferState::AwaitingAck { completion: false };
                Ok(Some(frame))
            }
            TransferState::Idle | TransferState::Sending | TransferState::Completing => {
                let frame = Frame::layer_complete(self.layer)?;
                self.state = TransferState::AwaitingAck { completion: true };
                Ok(Some(frame))
            }
            TransferState::AwaitingAck { .. } | TransferState::Done | TransferState::Aborted => {
                Ok(None)
            }
        }
    }

    /// Record the acknowledgment of the outstanding frame.
    pub fn acknowledge(&mut self) {
        match self.state {
            TransferState::AwaitingAck { completion: false } => {
                self.remaining = &self.remaining[self.in_flight..];
                self.summary.data_frames += 1;
                self.summary.bytes += self.in_flight;
                self.in_flight = 0;
                self.first = false;
                self.state = if self.remaining.is_empty() {
                    TransferState::Completing
                } else {
                    TransferState::Sending
                };
            }
            TransferState::AwaitingAck { completion: true } => {
                self.state = TransferState::Done;
            }
            _ => {}
        }
    }

    /// Abandon the transfer.
    pub fn abort(&mut self) {
        self.state = TransferState::Aborted;
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Send `payload` to `layer` as a segmented transfer.
///
/// Only `OLED_UPDATE` is carried this way; anything else fails with
/// `UnsupportedCommand` before touching the device. Succeeds only if every
/// chunk and the completion frame were acknowledged.
pub fn send_segmented<T: Transport + ?Sized>(
    handle: &mut T,
    opcode: Opcode,
    layer: u8,
    payload: &[u8],
) -> ClientResult<TransferSummary> {
    if opcode != Opcode::OledUpdate {
        return Err(ClientError::UnsupportedCommand(opcode));
    }
    debug!("Sending OLED update: {} bytes to layer {}", payload.len(), layer);

    let mut session = TransferSession::new(layer, payload);
    while let Some(frame) = session.next_frame()? {
        if let Err(e) = exchange(handle, &frame, ACK_TIMEOUT) {
            session.abort();
            warn!(
                "Layer {} update aborted with {} bytes unacknowledged: {}",
                layer,
                session.remaining(),
                e
            );
            return Err(e);
        }
        session.acknowledge();
        trace!("Acknowledged; {} bytes remaining", session.remaining());
    }

    debug_assert_eq!(session.state(), TransferState::Done);
    let summary = session.summary();
    debug!(
        "Layer {} updated: {} bytes in {} data frames",
        layer, summary.bytes, summary.data_frames
    );
    Ok(summary)
}
