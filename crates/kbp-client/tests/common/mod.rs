//! Scripted in-memory HID backend for exercising the client without hardware.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use kbp_device::{DeviceDescriptor, DeviceError, HidBackend, Transport};
use kbp_protocol::{FRAME_SIZE, OP_ACK, OP_NACK};

/// What the "device" does when the host reads.
#[derive(Debug, Clone)]
pub enum Reply {
    /// ACK followed by the given bytes.
    Ack(Vec<u8>),
    /// NACK.
    Nack,
    /// Echo the last written frame's payload back after an ACK, like the firmware.
    Echo,
    /// Nothing arrives before the timeout.
    Timeout,
    /// The read itself fails.
    ReadError,
    /// A full report with an arbitrary response code.
    Code(u8),
}

/// Everything that crossed the fake wire.
#[derive(Debug, Default)]
pub struct Wire {
    pub writes: Vec<Vec<u8>>,
    pub replies: VecDeque<Reply>,
    pub reads: usize,
    pub timeouts: Vec<Duration>,
    pub opens: usize,
    pub closes: usize,
    pub fail_writes: bool,
    pub short_writes: bool,
}

impl Wire {
    /// The opcode byte of every written frame.
    pub fn written_opcodes(&self) -> Vec<u8> {
        self.writes.iter().map(|w| w[2]).collect()
    }
}

pub struct ScriptedBackend {
    pub devices: Vec<DeviceDescriptor>,
    pub wire: Rc<RefCell<Wire>>,
}

impl ScriptedBackend {
    pub fn new(devices: Vec<DeviceDescriptor>) -> (Self, Rc<RefCell<Wire>>) {
        let wire = Rc::new(RefCell::new(Wire::default()));
        (
            ScriptedBackend {
                devices,
                wire: Rc::clone(&wire),
            },
            wire,
        )
    }
}

impl HidBackend for ScriptedBackend {
    type Handle = ScriptedHandle;

    fn enumerate(&mut self, vendor_id: u16, product_id: u16) -> kbp_device::Result<Vec<DeviceDescriptor>> {
        Ok(self
            .devices
            .iter()
            .filter(|d| vendor_id == 0 || d.vendor_id == vendor_id)
            .filter(|d| product_id == 0 || d.product_id == product_id)
            .cloned()
            .collect())
    }

    fn open(&self, _descriptor: &DeviceDescriptor) -> kbp_device::Result<ScriptedHandle> {
        self.wire.borrow_mut().opens += 1;
        Ok(ScriptedHandle {
            wire: Rc::clone(&self.wire),
        })
    }
}

pub struct ScriptedHandle {
    wire: Rc<RefCell<Wire>>,
}

impl Transport for ScriptedHandle {
    fn write(&mut self, data: &[u8]) -> kbp_device::Result<usize> {
        let mut wire = self.wire.borrow_mut();
        if wire.fail_writes {
            return Err(DeviceError::Transport("write refused".to_string()));
        }
        wire.writes.push(data.to_vec());
        if wire.short_writes {
            return Ok(data.len() / 2);
        }
        Ok(data.len())
    }

    fn read_timeout(&mut self, buf: &mut [u8], timeout: Duration) -> kbp_device::Result<usize> {
        let mut wire = self.wire.borrow_mut();
        wire.reads += 1;
        wire.timeouts.push(timeout);
        let reply = wire.replies.pop_front().unwrap_or(Reply::Timeout);
        match reply {
            Reply::Ack(data) => {
                buf[0] = OP_ACK;
                buf[1..1 + data.len()].copy_from_slice(&data);
                Ok(FRAME_SIZE)
            }
            Reply::Nack => {
                buf[0] = OP_NACK;
                Ok(FRAME_SIZE)
            }
            Reply::Echo => {
                let last = wire.writes.last().cloned().unwrap_or_default();
                buf[0] = OP_ACK;
                let payload = &last[3..];
                buf[1..1 + payload.len()].copy_from_slice(payload);
                Ok(FRAME_SIZE)
            }
            Reply::Timeout => Ok(0),
            Reply::ReadError => Err(DeviceError::Transport("read failed".to_string())),
            Reply::Code(code) => {
                buf[0] = code;
                Ok(FRAME_SIZE)
            }
        }
    }
}

impl Drop for ScriptedHandle {
    fn drop(&mut self) {
        self.wire.borrow_mut().closes += 1;
    }
}

pub fn descriptor(path: &str, vendor_id: u16, product_id: u16, usage_id: u16, usage_page: u16) -> DeviceDescriptor {
    DeviceDescriptor {
        path: path.to_string(),
        vendor_id,
        product_id,
        usage_id,
        usage_page,
        product_name: "ml8_9".to_string(),
        vendor_name: "Marion Lang".to_string(),
        serial_number: String::new(),
        interface_number: 1,
        release_number: 1,
        bus_type: "Usb".to_string(),
    }
}

/// The keyboard's interfaces: a boot keyboard, the raw HID interface and a
/// consumer control interface.
pub fn keyboard() -> Vec<DeviceDescriptor> {
    vec![
        descriptor("kbd-boot", 0x6d6c, 0x3333, 0x06, 0x01),
        descriptor("kbd-raw", 0x6d6c, 0x3333, 0x61, 0xff60),
        descriptor("kbd-consumer", 0x6d6c, 0x3333, 0x01, 0x0c),
    ]
}
