//! ml8 keyboard raw HID protocol
//!
//! This crate provides the frame types and the handshake decoder used to talk
//! to the keyboard firmware's raw HID handler. Every exchange is one fixed
//! 32-byte report in each direction.
//!
//! # Protocol Overview
//!
//! - **Host frames** (host → firmware): `'m' 'l' opcode payload...`
//! - **Replies** (firmware → host): a response code (`ACK`/`NACK`) followed by
//!   the acknowledged opcode or reply data
//! - **Layer updates**: text longer than one frame is sent as a start frame,
//!   continuation frames and a completion frame, each acknowledged before the
//!   next one is written
//!
//! # Example
//!
//! ```rust
//! use kbp_protocol::{decode_ack, Frame, Opcode, FRAME_SIZE};
//!
//! let frame = Frame::layer_start(Opcode::OledUpdate, 2, b"Numpad")?;
//! assert_eq!(frame.as_bytes().len(), FRAME_SIZE);
//!
//! let mut reply = [0u8; FRAME_SIZE];
//! reply[0] = Opcode::Ack.code();
//! let ack = decode_ack::<std::io::Error>(&reply, Ok(FRAME_SIZE))?;
//! assert_eq!(ack.len(), FRAME_SIZE);
//! # Ok::<(), kbp_protocol::ProtocolError>(())
//! ```

mod constants;
mod error;
mod frame;
mod opcode;
mod response;

pub use constants::*;
pub use error::*;
pub use frame::*;
pub use opcode::*;
pub use response::*;
