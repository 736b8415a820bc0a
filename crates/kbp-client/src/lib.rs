//! Keyboard OLED programming over raw HID
//!
//! This crate ties device resolution and the frame protocol together into the
//! operations an operator runs against the keyboard: hello, echo, OLED on/off,
//! layer text reset and update, and raw frames.
//!
//! Each operation is a blocking request/response exchange that resolves exactly
//! one device, holds it open for the duration of the call, and releases it on
//! every exit path. Layer text is sent with the segmented transfer engine in
//! [`transfer`], which waits for an acknowledgment after every frame and gives
//! up at the first step that is not acknowledged.
//!
//! # Example
//!
//! ```no_run
//! use kbp_client::KeyboardClient;
//! use kbp_device::{DeviceQuery, HidContext};
//!
//! let context = HidContext::new()?;
//! let mut keyboard = KeyboardClient::new(context, DeviceQuery::raw_hid_interface());
//! keyboard.layer_update(0, "Media\nPrev | Play | Next")?;
//! # Ok::<(), kbp_client::ClientError>(())
//! ```

mod client;
mod error;
pub mod transfer;

pub use client::KeyboardClient;
pub use error::{ClientError, ClientResult};
pub use transfer::{send_segmented, TransferState, TransferSummary, ACK_TIMEOUT};
