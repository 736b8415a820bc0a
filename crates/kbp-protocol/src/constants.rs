//! Protocol constants
//!
//! These constants define the frame layout and the opcode values shared with
//! the keyboard firmware's raw HID handler.

// ============================================================================
// Frame Layout
// ============================================================================

/// Size of every frame exchanged over the raw HID channel.
pub const FRAME_SIZE: usize = 32;
/// First sync byte of a host → firmware frame.
pub const MAGIC_0: u8 = b'm';
/// Second sync byte of a host → firmware frame.
pub const MAGIC_1: u8 = b'l';
/// Offset of the opcode byte in a host → firmware frame.
pub const OPCODE_OFFSET: usize = 2;
/// Offset of the payload in a host → firmware frame.
pub const PAYLOAD_OFFSET: usize = 3;
/// Maximum payload of a simple frame (32 bytes minus magic and opcode).
pub const MAX_PAYLOAD_LEN: usize = FRAME_SIZE - PAYLOAD_OFFSET;

// ============================================================================
// Layer Frame Layout
// ============================================================================

/// Offset of the layer index in a layer frame.
pub const LAYER_OFFSET: usize = 3;
/// Offset of the chunk length in a layer frame.
pub const CHUNK_LEN_OFFSET: usize = 4;
/// Offset of the chunk data in a layer frame.
pub const CHUNK_OFFSET: usize = 5;
/// Largest chunk that fits alongside the layer header.
pub const MAX_CHUNK_LEN: usize = 25;
/// Number of addressable OLED text layers.
pub const LAYER_COUNT: u8 = 4;
/// Text capacity of one layer in the firmware: 4 lines of 21 columns, plus
/// newlines and the terminator.
pub const LAYER_TEXT_CAPACITY: usize = 4 * 21 + 3;

// ============================================================================
// Response Layout (firmware → host)
// ============================================================================

/// Offset of the response code in a firmware reply.
pub const RESPONSE_CODE_OFFSET: usize = 0;
/// Offset of the acknowledged opcode in an ACK reply.
pub const ACKED_OPCODE_OFFSET: usize = 1;

// ============================================================================
// Opcodes
// ============================================================================

/// No-op.
pub const OP_NOOP: u8 = 0x00;
/// Generic error report.
pub const OP_ERR: u8 = 0x01;
/// Acknowledge.
pub const OP_ACK: u8 = 0x02;
/// Negative acknowledge.
pub const OP_NACK: u8 = 0x03;
/// Continuation chunk of a segmented transfer.
pub const OP_CONT: u8 = 0x04;
/// Abort transfer.
pub const OP_ABORT: u8 = 0x05;
/// End of a segmented transfer.
pub const OP_COMPLETE: u8 = 0x06;

/// Debug hello.
pub const OP_HELLO: u8 = 0x30;
/// Debug echo.
pub const OP_ECHO: u8 = 0x31;

/// Turn the OLED off.
pub const OP_OLED_OFF: u8 = 0x40;
/// Turn the OLED on.
pub const OP_OLED_ON: u8 = 0x41;

/// Begin a layer text update (first chunk of a segmented transfer).
pub const OP_OLED_UPDATE: u8 = 0x50;
/// Reset layer text to the firmware defaults.
pub const OP_OLED_RESET: u8 = 0x51;
