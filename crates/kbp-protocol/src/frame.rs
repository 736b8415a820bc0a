//! Frame encoding/decoding.
//!
//! Every message is a single 32-byte HID report:
//!
//! ```text
//! +-----+-----+--------+---------------------------------+
//! | 'm' | 'l' | opcode | payload[0..29], zero padded     |
//! +-----+-----+--------+---------------------------------+
//! ```
//!
//! Layer text updates use the payload for a small header and a chunk:
//!
//! ```text
//! +-----+-----+--------+-------+-----+---------------------------+
//! | 'm' | 'l' | opcode | layer | len | chunk[0..len], 0 <= len <= 25 |
//! +-----+-----+--------+-------+-----+---------------------------+
//! ```

use bytes::BufMut;

use crate::constants::*;
use crate::error::{ProtocolError, ProtocolResult};
use crate::opcode::Opcode;

/// A single 32-byte host → firmware frame.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Frame([u8; FRAME_SIZE]);

impl Frame {
    /// Encode a simple command: magic, opcode and up to 29 payload bytes.
    pub fn simple(opcode: Opcode, payload: &[u8]) -> ProtocolResult<Self> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(ProtocolError::PayloadTooLarge {
                max: MAX_PAYLOAD_LEN,
                actual: payload.len(),
            });
        }
        let mut buf = [0u8; FRAME_SIZE];
        {
            let mut w = &mut buf[..];
            w.put_u8(MAGIC_0);
            w.put_u8(MAGIC_1);
            w.put_u8(opcode.code());
            w.put_slice(payload);
        }
        Ok(Frame(buf))
    }

    /// Encode the first chunk of a layer update.
    pub fn layer_start(opcode: Opcode, layer: u8, chunk: &[u8]) -> ProtocolResult<Self> {
        LayerFrame::new(opcode, layer, chunk).and_then(|f| f.encode())
    }

    /// Encode a continuation chunk of a layer update.
    pub fn layer_continue(layer: u8, chunk: &[u8]) -> ProtocolResult<Self> {
        LayerFrame::new(Opcode::Cont, layer, chunk).and_then(|f| f.encode())
    }

    /// Encode the frame that ends a layer update.
    pub fn layer_complete(layer: u8) -> ProtocolResult<Self> {
        LayerFrame::new(Opcode::Complete, layer, &[]).and_then(|f| f.encode())
    }

    /// Wrap operator-supplied bytes as a frame, zero padded, without validation.
    pub fn from_raw(data: &[u8]) -> ProtocolResult<Self> {
        if data.len() > FRAME_SIZE {
            return Err(ProtocolError::PayloadTooLarge {
                max: FRAME_SIZE,
                actual: data.len(),
            });
        }
        let mut buf = [0u8; FRAME_SIZE];
        buf[..data.len()].copy_from_slice(data);
        Ok(Frame(buf))
    }

    /// Decode and validate a host frame.
    pub fn decode(data: &[u8]) -> ProtocolResult<Self> {
        if data.len() != FRAME_SIZE {
            return Err(ProtocolError::FrameSize {
                expected: FRAME_SIZE,
                actual: data.len(),
            });
        }
        if data[0] != MAGIC_0 || data[1] != MAGIC_1 {
            return Err(ProtocolError::BadMagic(data[0], data[1]));
        }
        Opcode::try_from(data[OPCODE_OFFSET])?;

        let mut buf = [0u8; FRAME_SIZE];
        buf.copy_from_slice(data);
        Ok(Frame(buf))
    }

    /// The frame's opcode.
    ///
    /// Frames built from raw bytes may carry an arbitrary byte here.
    pub fn opcode(&self) -> ProtocolResult<Opcode> {
        Opcode::try_from(self.0[OPCODE_OFFSET])
    }

    /// The 29 payload bytes following the opcode.
    pub fn payload(&self) -> &[u8] {
        &self.0[PAYLOAD_OFFSET..]
    }

    /// The full 32 bytes as written to the wire.
    pub fn as_bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Frame({:02x?})", &self.0[..])
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A layer text frame: start, continue or complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerFrame {
    opcode: Opcode,
    layer: u8,
    chunk: Vec<u8>,
}

impl LayerFrame {
    /// Build a layer frame, validating opcode, layer and chunk size.
    pub fn new(opcode: Opcode, layer: u8, chunk: &[u8]) -> ProtocolResult<Self> {
        if !opcode.is_layer_opcode() {
            return Err(ProtocolError::NotALayerOpcode(opcode.code()));
        }
        if layer >= LAYER_COUNT {
            return Err(ProtocolError::InvalidLayer(layer));
        }
        if chunk.len() > MAX_CHUNK_LEN {
            return Err(ProtocolError::ChunkTooLarge {
                max: MAX_CHUNK_LEN,
                actual: chunk.len(),
            });
        }
        Ok(LayerFrame {
            opcode,
            layer,
            chunk: chunk.to_vec(),
        })
    }

    /// Encode into a 32-byte frame.
    pub fn encode(&self) -> ProtocolResult<Frame> {
        let mut payload = Vec::with_capacity(2 + self.chunk.len());
        payload.put_u8(self.layer);
        payload.put_u8(self.chunk.len() as u8);
        payload.put_slice(&self.chunk);
        Frame::simple(self.opcode, &payload)
    }

    /// Decode the layer header and chunk of a frame.
    pub fn decode(frame: &Frame) -> ProtocolResult<Self> {
        let bytes = frame.as_bytes();
        let opcode = frame.opcode()?;
        let layer = bytes[LAYER_OFFSET];
        let len = bytes[CHUNK_LEN_OFFSET] as usize;
        if len > MAX_CHUNK_LEN {
            return Err(ProtocolError::ChunkTooLarge {
                max: MAX_CHUNK_LEN,
                actual: len,
            });
        }
        LayerFrame::new(opcode, layer, &bytes[CHUNK_OFFSET..CHUNK_OFFSET + len])
    }

    /// The layer opcode (`OLED_UPDATE`, `CONT` or `COMPLETE`).
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Target layer.
    pub fn layer(&self) -> u8 {
        self.layer
    }

    /// Chunk bytes.
    pub fn chunk(&self) -> &[u8] {
        &self.chunk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_frame_layout() {
        let frame = Frame::simple(Opcode::Echo, b"hi").expect("should encode");
        let bytes = frame.as_bytes();
        assert_eq!(bytes.len(), FRAME_SIZE);
        assert_eq!(&bytes[..5], &[b'm', b'l', 0x31, b'h', b'i']);
        assert!(bytes[5..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_simple_frame_without_payload() {
        let frame = Frame::simple(Opcode::OledReset, &[]).expect("should encode");
        assert_eq!(&frame.as_bytes()[..3], &[b'm', b'l', 0x51]);
        assert!(frame.payload().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_simple_frame_payload_limit() {
        assert!(Frame::simple(Opcode::Echo, &[b'x'; 29]).is_ok());
        assert_eq!(
            Frame::simple(Opcode::Echo, &[b'x'; 30]),
            Err(ProtocolError::PayloadTooLarge { max: 29, actual: 30 })
        );
    }

    #[test]
    fn test_layer_start_layout() {
        let frame = Frame::layer_start(Opcode::OledUpdate, 2, b"Media").expect("should encode");
        let bytes = frame.as_bytes();
        assert_eq!(&bytes[..5], &[b'm', b'l', 0x50, 2, 5]);
        assert_eq!(&bytes[5..10], b"Media");
        assert!(bytes[10..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_layer_continue_and_complete() {
        let cont = Frame::layer_continue(1, &[b'a'; 25]).expect("should encode");
        assert_eq!(&cont.as_bytes()[..5], &[b'm', b'l', 0x04, 1, 25]);
        assert_eq!(&cont.as_bytes()[5..30], &[b'a'; 25]);

        let complete = Frame::layer_complete(3).expect("should encode");
        assert_eq!(&complete.as_bytes()[..5], &[b'm', b'l', 0x06, 3, 0]);
        assert!(complete.as_bytes()[5..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_layer_frame_validation() {
        assert_eq!(
            Frame::layer_continue(4, b"x"),
            Err(ProtocolError::InvalidLayer(4))
        );
        assert_eq!(
            Frame::layer_continue(0, &[0u8; 26]),
            Err(ProtocolError::ChunkTooLarge { max: 25, actual: 26 })
        );
        assert_eq!(
            Frame::layer_start(Opcode::Echo, 0, b"x"),
            Err(ProtocolError::NotALayerOpcode(0x31))
        );
    }

    #[test]
    fn test_layer_frame_round_trip() {
        let encoded = Frame::layer_start(Opcode::OledUpdate, 2, b"Zoom\nTalk").expect("should encode");
        let decoded = Frame::decode(encoded.as_bytes()).expect("should decode frame");
        let layer = LayerFrame::decode(&decoded).expect("should decode layer frame");
        assert_eq!(layer.opcode(), Opcode::OledUpdate);
        assert_eq!(layer.layer(), 2);
        assert_eq!(layer.chunk(), b"Zoom\nTalk");

        let complete = LayerFrame::decode(&Frame::layer_complete(1).expect("should encode"))
            .expect("should decode layer frame");
        assert_eq!(complete.opcode(), Opcode::Complete);
        assert_eq!(complete.layer(), 1);
        assert!(complete.chunk().is_empty());
    }

    #[test]
    fn test_simple_frame_round_trip() {
        let encoded = Frame::simple(Opcode::Echo, b"ping").expect("should encode");
        let decoded = Frame::decode(encoded.as_bytes()).expect("should decode");
        assert_eq!(decoded.opcode(), Ok(Opcode::Echo));
        assert_eq!(&decoded.payload()[..4], b"ping");
        assert_eq!(decoded, encoded);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert_eq!(
            Frame::decode(&[b'm', b'l', 0x30]),
            Err(ProtocolError::FrameSize { expected: 32, actual: 3 })
        );

        let mut bad_magic = [0u8; FRAME_SIZE];
        bad_magic[0] = b'x';
        bad_magic[1] = b'l';
        assert_eq!(Frame::decode(&bad_magic), Err(ProtocolError::BadMagic(b'x', b'l')));

        let mut bad_opcode = [0u8; FRAME_SIZE];
        bad_opcode[0] = b'm';
        bad_opcode[1] = b'l';
        bad_opcode[2] = 0x99;
        assert_eq!(Frame::decode(&bad_opcode), Err(ProtocolError::UnknownOpcode(0x99)));
    }

    #[test]
    fn test_decode_rejects_oversized_chunk_length() {
        let mut bytes = *Frame::layer_continue(0, b"abc").expect("should encode").as_bytes();
        bytes[CHUNK_LEN_OFFSET] = 26;
        let frame = Frame::decode(&bytes).expect("header is still valid");
        assert_eq!(
            LayerFrame::decode(&frame),
            Err(ProtocolError::ChunkTooLarge { max: 25, actual: 26 })
        );
    }

    #[test]
    fn test_from_raw_pads() {
        let frame = Frame::from_raw(&[1, 2, 3]).expect("should wrap");
        assert_eq!(&frame.as_bytes()[..3], &[1, 2, 3]);
        assert!(frame.as_bytes()[3..].iter().all(|&b| b == 0));
        assert!(Frame::from_raw(&[0u8; 33]).is_err());
    }
}
